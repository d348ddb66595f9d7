use thiserror::Error;

/// Domain validation failures raised before anything touches the database.
///
/// `Database` methods return `anyhow::Result`; callers that need to tell a
/// bad request from a storage failure can `downcast_ref::<PlanError>()`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid month {month}: expected 1-12")]
    InvalidMonth { month: i64 },

    #[error("Year {year} is outside the supported calendar range")]
    InvalidYear { year: i32 },

    #[error("Invalid day {day} for {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("Client name is required")]
    EmptyClientName,

    #[error("Unknown crew '{0}': expected R1 or R2")]
    UnknownCrew(String),
}

impl PlanError {
    /// Find a validation error anywhere in an `anyhow` chain.
    pub fn find(err: &anyhow::Error) -> Option<&PlanError> {
        err.chain().find_map(|cause| cause.downcast_ref::<PlanError>())
    }
}
