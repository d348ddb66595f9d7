//! Cell-by-cell layout of the monthly schedule sheet.
//!
//! The layout is plain data so it can be checked without opening an xlsx
//! file; `excel.rs` turns it into a workbook.
//!
//! ```text
//! | logo | title (B:D)          | Code  | Date  | Revision |
//! |      |                      | F.082 | 22/03 | 01       |
//! | Records | Updated on | date | Responsible | .. | Approved by | .. |
//! | Sunday  | Monday     | ...                                       |
//! | (filler)| 1          | 2    | ...   <- day row         ┐
//! |         | R01: ...   | ...          <- crew R1 row      ├ per week
//! |         | R02: ...   | ...          <- crew R2 row      ┘
//! | ★ = External laboratory follow-up                        (if any)
//! | Generated on ...                                                 |
//! ```

use chrono::NaiveDateTime;
use planner_core::calendar::{MonthGrid, GRID_DAYS, WEEKDAY_NAMES};
use planner_core::models::Crew;
use planner_core::projection::{PlanProjection, EXTERNAL_LAB_MARK};

use crate::config::ExportConfig;

pub const LAST_COL: u16 = GRID_DAYS as u16 - 1;
pub const COLUMN_WIDTH: f64 = 25.0;
pub const WEEKDAY_ROW: u32 = 4;
pub const FIRST_WEEK_ROW: u32 = 5;

const HEADER_ROW_HEIGHT: f64 = 25.0;
const RECORDS_ROW_HEIGHT: f64 = 20.0;
const WEEKDAY_ROW_HEIGHT: f64 = 30.0;
const DAY_ROW_HEIGHT: f64 = 20.0;
const LINE_HEIGHT: f64 = 15.0;

pub const LEGEND_TEXT: &str = "= External laboratory follow-up";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    Logo,
    Title,
    HeaderLabel,
    HeaderValue,
    Weekday,
    DayNumber,
    /// Crew list; `shaded` on Monday to Friday.
    Crew { crew: Crew, shaded: bool },
    /// Grid slot that belongs to another month.
    Filler,
    Legend,
    Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub col: u16,
    pub value: CellValue,
    pub style: CellStyle,
}

/// A merged block; its text lives in the top-left cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
    pub text: String,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub cells: Vec<Cell>,
    pub merges: Vec<Merge>,
    pub row_heights: Vec<(u32, f64)>,
    pub legend_row: Option<u32>,
    pub footer_row: u32,
}

impl SheetLayout {
    pub fn build(
        grid: &MonthGrid,
        plan: &PlanProjection,
        config: &ExportConfig,
        generated_at: NaiveDateTime,
    ) -> Self {
        let month = grid.month;
        let mut layout = Self {
            sheet_name: format!("{} {}", month.month_name(), month.year()),
            cells: Vec::new(),
            merges: Vec::new(),
            row_heights: Vec::new(),
            legend_row: None,
            footer_row: 0,
        };

        layout.header(grid, config, generated_at);

        let mut row = FIRST_WEEK_ROW;
        for week in grid.visible_weeks() {
            layout.week(row, week, plan);
            row += 3;
        }

        if plan.has_external_lab {
            layout.merge(
                (row, 0),
                (row, LAST_COL),
                format!("{EXTERNAL_LAB_MARK} {LEGEND_TEXT}"),
                CellStyle::Legend,
            );
            layout.legend_row = Some(row);
            row += 1;
        }

        layout.merge(
            (row, 0),
            (row, LAST_COL),
            format!(
                "Generated on {} by crew-planner {}",
                generated_at.format("%d/%m/%Y %H:%M"),
                env!("CARGO_PKG_VERSION")
            ),
            CellStyle::Footer,
        );
        layout.footer_row = row;
        layout
    }

    fn header(&mut self, grid: &MonthGrid, config: &ExportConfig, generated_at: NaiveDateTime) {
        let month = grid.month;
        self.merge((0, 0), (2, 0), String::new(), CellStyle::Logo);
        self.merge(
            (0, 1),
            (2, 3),
            format!(
                "Collection Schedule - {}/{}",
                month.month_name(),
                month.year()
            ),
            CellStyle::Title,
        );

        let control = [
            ("Code", &config.form_code),
            ("Date", &config.form_date),
            ("Revision", &config.form_revision),
        ];
        for (col, (label, value)) in (4u16..).zip(control) {
            self.text(0, col, label, CellStyle::HeaderLabel);
            self.merge((1, col), (2, col), value.clone(), CellStyle::HeaderValue);
        }

        let updated = generated_at.format("%d/%m/%Y").to_string();
        let records = [
            "Records",
            "Updated on",
            updated.as_str(),
            "Responsible",
            config.responsible.as_str(),
            "Approved by",
            config.approved_by.as_str(),
        ];
        for (col, text) in (0u16..).zip(records) {
            self.text(3, col, text, CellStyle::HeaderLabel);
        }

        for (col, name) in (0u16..).zip(WEEKDAY_NAMES) {
            self.text(WEEKDAY_ROW, col, name, CellStyle::Weekday);
        }

        for r in 0..3 {
            self.row_heights.push((r, HEADER_ROW_HEIGHT));
        }
        self.row_heights.push((3, RECORDS_ROW_HEIGHT));
        self.row_heights.push((WEEKDAY_ROW, WEEKDAY_ROW_HEIGHT));
    }

    fn week(&mut self, row: u32, week: &[u32; GRID_DAYS], plan: &PlanProjection) {
        self.row_heights.push((row, DAY_ROW_HEIGHT));
        for (offset, crew) in (1u32..).zip(Crew::ALL) {
            let lines = plan.max_per_crew(week, crew).max(1) + 1;
            self.row_heights
                .push((row + offset, lines as f64 * LINE_HEIGHT));
        }

        for (col, &day) in (0u16..).zip(week) {
            if day == 0 {
                self.merge((row, col), (row + 2, col), String::new(), CellStyle::Filler);
                continue;
            }

            self.cells.push(Cell {
                row,
                col,
                value: CellValue::Number(f64::from(day)),
                style: CellStyle::DayNumber,
            });

            let shaded = col != 0 && col != LAST_COL;
            for (offset, crew) in (1u32..).zip(Crew::ALL) {
                let text = crew_cell_text(crew, plan.clients_for(day, crew));
                self.text(row + offset, col, &text, CellStyle::Crew { crew, shaded });
            }
        }
    }

    fn text(&mut self, row: u32, col: u16, text: &str, style: CellStyle) {
        self.cells.push(Cell {
            row,
            col,
            value: CellValue::Text(text.to_string()),
            style,
        });
    }

    fn merge(&mut self, first: (u32, u16), last: (u32, u16), text: String, style: CellStyle) {
        self.merges.push(Merge {
            first_row: first.0,
            first_col: first.1,
            last_row: last.0,
            last_col: last.1,
            text,
            style,
        });
    }

    /// Text shown at (row, col), looking at plain cells and merge anchors.
    pub fn text_at(&self, row: u32, col: u16) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.col == col)
            .and_then(|c| c.value.as_text())
            .or_else(|| {
                self.merges
                    .iter()
                    .find(|m| m.first_row == row && m.first_col == col)
                    .map(|m| m.text.as_str())
            })
    }

    /// Grid position of `day`: its day-number row and column.
    pub fn locate_day(&self, day: u32) -> Option<(u32, u16)> {
        self.cells
            .iter()
            .find(|c| c.style == CellStyle::DayNumber && c.value == CellValue::Number(f64::from(day)))
            .map(|c| (c.row, c.col))
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights
            .iter()
            .find(|(r, _)| *r == row)
            .map(|(_, h)| *h)
    }
}

/// `"R01:\n- Acme\n- Bakery"`; just the label when nobody is planned.
pub fn crew_cell_text(crew: Crew, clients: &[String]) -> String {
    let mut text = format!("{}:\n", crew.label());
    let lines: Vec<String> = clients.iter().map(|c| format!("- {c}")).collect();
    text.push_str(&lines.join("\n"));
    text
}
