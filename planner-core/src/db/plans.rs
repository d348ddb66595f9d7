use anyhow::{Context, Result};
use rusqlite::{params, types::Type, Row};

use super::Database;
use crate::calendar::YearMonth;
use crate::error::PlanError;
use crate::models::{Assignment, Crew, PlanEntry};

fn row_to_assignment(row: &Row<'_>) -> rusqlite::Result<Assignment> {
    let crew: String = row.get("crew")?;
    let crew = Crew::from_str(&crew).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            Box::new(PlanError::UnknownCrew(crew.clone())),
        )
    })?;
    Ok(Assignment {
        year: row.get("year")?,
        month: row.get("month")?,
        day: row.get("day")?,
        client_id: row.get("client_id")?,
        crew,
        external_lab: row.get("external_lab")?,
    })
}

impl Database {
    /// Every stored visit for `month`, in insertion order.
    pub fn assignments_for(&self, month: YearMonth) -> Result<Vec<Assignment>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT year, month, day, client_id, crew, external_lab
             FROM plan_assignments
             WHERE year = ?1 AND month = ?2
             ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map(params![month.year(), month.month()], row_to_assignment)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Replace the whole plan of `month` with `entries`.
    ///
    /// Runs as one transaction: if any row fails to insert the previous
    /// plan is kept untouched. Returns the number of rows written.
    pub fn replace_month(&self, month: YearMonth, entries: &[PlanEntry]) -> Result<usize> {
        if let Some(bad) = entries.iter().find(|e| !month.contains_day(e.day)) {
            return Err(PlanError::InvalidDay {
                year: month.year(),
                month: month.month(),
                day: bad.day,
            }
            .into());
        }

        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM plan_assignments WHERE year = ?1 AND month = ?2",
            params![month.year(), month.month()],
        )?;

        {
            let mut insert = tx.prepare(
                "INSERT INTO plan_assignments (year, month, day, client_id, crew, external_lab)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for entry in entries {
                insert
                    .execute(params![
                        month.year(),
                        month.month(),
                        entry.day,
                        entry.client_id,
                        entry.crew.as_str(),
                        entry.external_lab,
                    ])
                    .with_context(|| {
                        format!(
                            "Failed to save client {} on day {} of {}",
                            entry.client_id, entry.day, month
                        )
                    })?;
            }
        }

        tx.commit()?;
        tracing::info!(%month, removed, saved = entries.len(), "month plan replaced");
        Ok(entries.len())
    }

    /// The plan of the month before `month`, unchanged, to seed an editor.
    /// Empty when `month` is the earliest one representable.
    pub fn copy_previous_month(&self, month: YearMonth) -> Result<Vec<Assignment>> {
        match month.checked_previous() {
            Some(previous) => self.assignments_for(previous),
            None => Ok(Vec::new()),
        }
    }

    /// Months that have at least one visit, most recent first.
    pub fn months_with_plans(&self) -> Result<Vec<YearMonth>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT year, month FROM plan_assignments ORDER BY year DESC, month DESC",
        )?;
        let pairs = stmt
            .query_map([], |row| Ok((row.get::<_, i32>(0)?, row.get::<_, u32>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        pairs
            .into_iter()
            .map(|(year, month)| YearMonth::new(year, month).map_err(anyhow::Error::from))
            .collect()
    }
}
