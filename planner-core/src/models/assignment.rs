use serde::{Deserialize, Serialize};

/// One of the two fixed work teams a visit can be allocated to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Crew {
    R1,
    R2,
}

impl Crew {
    pub const ALL: [Crew; 2] = [Crew::R1, Crew::R2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::R1 => "R1",
            Self::R2 => "R2",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "R1" => Some(Self::R1),
            "R2" => Some(Self::R2),
            _ => None,
        }
    }

    /// Label used in printed schedules.
    pub fn label(&self) -> &'static str {
        match self {
            Self::R1 => "R01",
            Self::R2 => "R02",
        }
    }
}

/// A stored visit: `client_id` goes out with `crew` on `year-month-day`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub client_id: i64,
    pub crew: Crew,
    #[serde(default)]
    pub external_lab: bool,
}

/// One item of a month save request. Year and month come from the request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanEntry {
    pub day: u32,
    pub client_id: i64,
    pub crew: Crew,
    #[serde(default)]
    pub external_lab: bool,
}

impl PlanEntry {
    pub fn new(day: u32, client_id: i64, crew: Crew) -> Self {
        Self {
            day,
            client_id,
            crew,
            external_lab: false,
        }
    }

    pub fn with_external_lab(mut self) -> Self {
        self.external_lab = true;
        self
    }
}

impl From<&Assignment> for PlanEntry {
    fn from(a: &Assignment) -> Self {
        Self {
            day: a.day,
            client_id: a.client_id,
            crew: a.crew,
            external_lab: a.external_lab,
        }
    }
}
