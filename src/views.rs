//! Askama page templates and the view models they render.

use askama::Template;
use planner_core::calendar::{MonthGrid, YearMonth, WEEKDAY_NAMES};
use planner_core::models::{Client, Crew};

pub struct CrewSlot {
    pub code: &'static str,
    pub label: &'static str,
}

pub struct DayCell {
    /// 0 for slots outside the month.
    pub day: u32,
    pub weekend: bool,
    pub crews: Vec<CrewSlot>,
}

impl DayCell {
    pub fn in_month(&self) -> bool {
        self.day != 0
    }
}

pub struct NavLink {
    pub href: String,
    pub label: String,
}

impl NavLink {
    pub fn to_month(month: YearMonth) -> Self {
        Self {
            href: month_href(month),
            label: format!("{} {}", month.month_name(), month.year()),
        }
    }
}

pub fn month_href(month: YearMonth) -> String {
    format!("/{}/{}", month.year(), month.month())
}

#[derive(Template)]
#[template(path = "calendar.html")]
pub struct CalendarPage {
    pub title: String,
    pub year: i32,
    pub month: u32,
    pub weekdays: [&'static str; 7],
    pub weeks: Vec<Vec<DayCell>>,
    pub clients: Vec<Client>,
    /// Saved plan keyed by day, as JSON for the editor script.
    pub plan_json: String,
    pub previous: NavLink,
    pub next: NavLink,
    pub planned_months: Vec<NavLink>,
    pub export_href: String,
}

impl CalendarPage {
    pub fn new(
        grid: &MonthGrid,
        clients: Vec<Client>,
        plan_json: String,
        planned_months: &[YearMonth],
    ) -> Self {
        let month = grid.month;
        let weeks = grid
            .visible_weeks()
            .map(|week| {
                week.iter()
                    .enumerate()
                    .map(|(col, &day)| DayCell {
                        day,
                        weekend: col == 0 || col == 6,
                        crews: Crew::ALL
                            .iter()
                            .map(|crew| CrewSlot {
                                code: crew.as_str(),
                                label: crew.label(),
                            })
                            .collect(),
                    })
                    .collect()
            })
            .collect();

        Self {
            title: format!("{} {}", month.month_name(), month.year()),
            year: month.year(),
            month: month.month(),
            weekdays: WEEKDAY_NAMES,
            weeks,
            clients,
            plan_json,
            previous: NavLink::to_month(month.previous()),
            next: NavLink::to_month(month.next()),
            planned_months: planned_months.iter().copied().map(NavLink::to_month).collect(),
            export_href: format!("/export_excel/{}/{}", month.year(), month.month()),
        }
    }
}

#[derive(Template)]
#[template(path = "clients.html")]
pub struct ClientsPage {
    pub clients: Vec<Client>,
    pub notice: Option<String>,
    pub calendar_href: String,
}
