//! Monthly schedule spreadsheet.
//!
//! `layout` decides what goes in every cell; `excel` writes it with
//! `rust_xlsxwriter`. Nothing is written to disk: the workbook is built in
//! memory and streamed back to the caller.

pub mod excel;
pub mod layout;

use std::path::PathBuf;

use chrono::NaiveDateTime;
use planner_core::calendar::{month_grid, YearMonth};
use planner_core::projection::PlanProjection;
use planner_core::Database;
use thiserror::Error;

use crate::config::ExportConfig;
pub use excel::ExcelWriter;
pub use layout::SheetLayout;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum ExportError {
    /// A configured file (the header logo) is not on disk.
    #[error("Export asset not found: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("Failed to create Excel: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to load plan: {0:#}")]
    Store(#[from] anyhow::Error),
}

/// Download name, e.g. `Plan_March_2024.xlsx`.
pub fn file_name(month: YearMonth) -> String {
    format!("Plan_{}_{}.xlsx", month.month_name(), month.year())
}

/// A rendered workbook ready to send.
#[derive(Debug)]
pub struct ExportedPlan {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub has_external_lab: bool,
}

pub struct MonthExporter<'a> {
    db: &'a Database,
    config: &'a ExportConfig,
}

impl<'a> MonthExporter<'a> {
    pub fn new(db: &'a Database, config: &'a ExportConfig) -> Self {
        Self { db, config }
    }

    /// Load the month's plan and lay it out, without writing a workbook.
    pub fn layout(
        &self,
        month: YearMonth,
        generated_at: NaiveDateTime,
    ) -> Result<SheetLayout, ExportError> {
        let assignments = self.db.assignments_for(month)?;
        let clients = self.db.list_clients()?;
        let plan = PlanProjection::build(&assignments, &clients);
        let grid = month_grid(month);
        Ok(SheetLayout::build(&grid, &plan, self.config, generated_at))
    }

    pub fn export(
        &self,
        month: YearMonth,
        generated_at: NaiveDateTime,
    ) -> Result<ExportedPlan, ExportError> {
        let layout = self.layout(month, generated_at)?;
        let bytes = ExcelWriter::new()
            .logo(self.config.logo.as_deref())
            .render_to_bytes(&layout)?;

        tracing::info!(%month, size = bytes.len(), "plan exported");
        Ok(ExportedPlan {
            file_name: file_name(month),
            bytes,
            has_external_lab: layout.legend_row.is_some(),
        })
    }
}
