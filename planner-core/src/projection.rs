//! Groups a month's assignments by (day, crew) with client names resolved.

use std::collections::{BTreeMap, HashMap};

use crate::calendar::GRID_DAYS;
use crate::models::{Assignment, Client, Crew};

/// Prefix marking a visit that needs external laboratory follow-up.
pub const EXTERNAL_LAB_MARK: &str = "★";

/// Shown when an assignment points at a client the registry no longer has.
pub const UNKNOWN_CLIENT: &str = "Unknown client";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanProjection {
    cells: BTreeMap<(u32, Crew), Vec<String>>,
    /// At least one name carries the external-lab mark.
    pub has_external_lab: bool,
}

impl PlanProjection {
    pub fn build(assignments: &[Assignment], clients: &[Client]) -> Self {
        let names: HashMap<i64, &str> = clients
            .iter()
            .map(|c| (c.id, c.name.as_str()))
            .collect();

        let mut projection = Self::default();
        for a in assignments {
            let name = names.get(&a.client_id).copied().unwrap_or(UNKNOWN_CLIENT);
            let display = if a.external_lab {
                projection.has_external_lab = true;
                format!("{EXTERNAL_LAB_MARK} {name}")
            } else {
                name.to_string()
            };
            projection
                .cells
                .entry((a.day, a.crew))
                .or_default()
                .push(display);
        }
        projection
    }

    pub fn clients_for(&self, day: u32, crew: Crew) -> &[String] {
        self.cells
            .get(&(day, crew))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Largest number of clients any day of `week` has for `crew`.
    pub fn max_per_crew(&self, week: &[u32; GRID_DAYS], crew: Crew) -> usize {
        week.iter()
            .filter(|&&day| day != 0)
            .map(|&day| self.clients_for(day, crew).len())
            .max()
            .unwrap_or(0)
    }
}

/// Raw rows keyed by day, the shape the month editor page loads.
pub fn by_day(assignments: &[Assignment]) -> BTreeMap<u32, Vec<Assignment>> {
    let mut days: BTreeMap<u32, Vec<Assignment>> = BTreeMap::new();
    for a in assignments {
        days.entry(a.day).or_default().push(a.clone());
    }
    days
}
