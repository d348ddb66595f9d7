mod assignment;
mod client;

pub use assignment::*;
pub use client::*;
