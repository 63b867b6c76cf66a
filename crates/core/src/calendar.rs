//! # Calendar Window Resolver
//!
//! Computes which dates a day, week or month view covers and arranges the
//! events that fall in that window for rendering.
//!
//! Every function here takes "today" as an argument; nothing reads the
//! system clock.
//!
//! ## Windows
//!
//! - **Day**: `[today, today]`
//! - **Week**: Monday of the current ISO week through the following Sunday
//! - **Month**: first through last day of the requested month, with a
//!   Monday-first grid and previous/next navigation

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::errors::{CalError, CalResult};
use crate::models::event::{Event, EventView};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Earliest and latest year a month view can be requested for.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
}

impl ViewMode {
    /// Unknown or missing modes fall back to the month view.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("day") => ViewMode::Day,
            Some("week") => ViewMode::Week,
            _ => ViewMode::Month,
        }
    }
}

/// A validated (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRef {
    year: i32,
    month: u32,
    first: NaiveDate,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> CalResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalError::BadRequest(format!(
                "year must be between {} and {}, got {}",
                MIN_YEAR, MAX_YEAR, year
            )));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            CalError::BadRequest(format!("month must be between 1 and 12, got {}", month))
        })?;
        Ok(Self { year, month, first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month0()]
    }

    fn month0(&self) -> usize {
        (self.month - 1) as usize
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first + Duration::days(i64::from(self.days_in_month() - 1))
    }

    pub fn prev(&self) -> MonthNav {
        if self.month > 1 {
            MonthNav {
                year: self.year,
                month: self.month - 1,
            }
        } else {
            MonthNav {
                year: self.year - 1,
                month: 12,
            }
        }
    }

    pub fn next(&self) -> MonthNav {
        if self.month < 12 {
            MonthNav {
                year: self.year,
                month: self.month + 1,
            }
        } else {
            MonthNav {
                year: self.year + 1,
                month: 1,
            }
        }
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Target of a previous/next month link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthNav {
    pub year: i32,
    pub month: u32,
}

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn day(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today,
        }
    }

    pub fn week(today: NaiveDate) -> Self {
        let start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn month(month: MonthRef) -> Self {
        Self {
            start: month.first_day(),
            end: month.last_day(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|day| *day <= self.end)
            .collect()
    }
}

/// One row of the month grid, Monday first. `None` cells fall outside the month.
pub type Week = [Option<u32>; 7];

pub fn month_grid(month: MonthRef) -> Vec<Week> {
    let offset = month.first_day().weekday().num_days_from_monday() as usize;
    let mut cells: Vec<Option<u32>> = vec![None; offset];
    cells.extend((1..=month.days_in_month()).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    cells
        .chunks(7)
        .map(|chunk| {
            let mut week = [None; 7];
            week.copy_from_slice(chunk);
            week
        })
        .collect()
}

/// Orders events by date, then time with all-day events first, then id.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| (a.date, a.time, a.id).cmp(&(b.date, b.time, b.id)));
}

pub fn bucket_by_date(events: &[EventView]) -> BTreeMap<NaiveDate, Vec<EventView>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<EventView>> = BTreeMap::new();
    for view in events {
        buckets
            .entry(view.event.date)
            .or_default()
            .push(view.clone());
    }
    buckets
}

/// A parsed calendar query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarRequest {
    pub mode: ViewMode,
    pub month: MonthRef,
}

impl CalendarRequest {
    /// Builds a request from raw query parameters.
    ///
    /// `year` and `month` default to today's. When present they must be
    /// integers in range, whatever the view mode.
    pub fn from_params(
        view: Option<&str>,
        year: Option<&str>,
        month: Option<&str>,
        today: NaiveDate,
    ) -> CalResult<Self> {
        let mode = ViewMode::parse(view);
        let year = match param(year) {
            Some(raw) => raw.parse::<i32>().map_err(|_| {
                CalError::BadRequest(format!("year must be an integer, got {:?}", raw))
            })?,
            None => today.year(),
        };
        let month = match param(month) {
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                CalError::BadRequest(format!("month must be an integer, got {:?}", raw))
            })?,
            None => today.month(),
        };

        Ok(Self {
            mode,
            month: MonthRef::new(year, month)?,
        })
    }

    pub fn window(&self, today: NaiveDate) -> DateWindow {
        match self.mode {
            ViewMode::Day => DateWindow::day(today),
            ViewMode::Week => DateWindow::week(today),
            ViewMode::Month => DateWindow::month(self.month),
        }
    }
}

fn param(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view_type", rename_all = "lowercase")]
pub enum CalendarView {
    Day {
        current_date: NaiveDate,
        events: Vec<EventView>,
    },
    Week {
        start_week: NaiveDate,
        end_week: NaiveDate,
        days: Vec<NaiveDate>,
        events: Vec<EventView>,
    },
    Month {
        current_year: i32,
        current_month: u32,
        month_name: &'static str,
        calendar: Vec<Week>,
        events: Vec<EventView>,
        events_by_date: BTreeMap<NaiveDate, Vec<EventView>>,
        prev_month: u32,
        prev_year: i32,
        next_month: u32,
        next_year: i32,
    },
}

impl CalendarView {
    pub fn events(&self) -> &[EventView] {
        match self {
            CalendarView::Day { events, .. }
            | CalendarView::Week { events, .. }
            | CalendarView::Month { events, .. } => events,
        }
    }
}

/// Arranges `events` for the view described by `request`.
///
/// Events outside the request's window are dropped.
pub fn build_view(
    request: &CalendarRequest,
    today: NaiveDate,
    mut events: Vec<Event>,
) -> CalendarView {
    let window = request.window(today);
    events.retain(|event| window.contains(event.date));
    sort_events(&mut events);
    let events: Vec<EventView> = events.iter().map(|event| event.view(today)).collect();

    match request.mode {
        ViewMode::Day => CalendarView::Day {
            current_date: today,
            events,
        },
        ViewMode::Week => CalendarView::Week {
            start_week: window.start,
            end_week: window.end,
            days: window.days(),
            events,
        },
        ViewMode::Month => {
            let month = request.month;
            let prev = month.prev();
            let next = month.next();
            CalendarView::Month {
                current_year: month.year(),
                current_month: month.month(),
                month_name: month.name(),
                calendar: month_grid(month),
                events_by_date: bucket_by_date(&events),
                events,
                prev_month: prev.month,
                prev_year: prev.year,
                next_month: next.month,
                next_year: next.year,
            }
        }
    }
}
