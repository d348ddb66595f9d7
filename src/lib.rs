//! crew-planner: plan which crew visits which client on each day of a
//! month, and export the month as a printable spreadsheet.
//!
//! Storage, calendar math and plan projection live in `planner-core`; this
//! crate adds configuration, the HTTP server and the xlsx export.

pub mod api;
pub mod config;
pub mod export;
pub mod views;

pub use config::Config;
