//! Core library for crew-planner.
//!
//! Domain models, month arithmetic, the SQLite store for clients and monthly
//! plans, and the projection that lays a plan onto a calendar. Independent of
//! any transport layer (HTTP, spreadsheet export, etc.).
//!
//! # Usage
//!
//! ```no_run
//! use planner_core::calendar::{month_grid, YearMonth};
//! use planner_core::db::{Database, DatabaseConfig};
//! use planner_core::projection::PlanProjection;
//!
//! let db = Database::new(DatabaseConfig::new("planner.db"))?;
//! db.migrate()?;
//!
//! let march = YearMonth::new(2024, 3)?;
//! let grid = month_grid(march);
//! let plan = PlanProjection::build(&db.assignments_for(march)?, &db.list_clients()?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod calendar;
pub mod db;
pub mod error;
pub mod models;
pub mod projection;

// Re-export commonly used types at crate root
pub use calendar::{month_grid, MonthGrid, YearMonth};
pub use db::{Database, DatabaseConfig};
pub use error::PlanError;
pub use projection::PlanProjection;
