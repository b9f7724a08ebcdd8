//! Time utilities - business timezone and "today"
//!
//! Goal status depends on the calendar date in the store's timezone, not on
//! UTC. Every "has the end date passed" decision goes through a [`Clock`].

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::{AppError, AppResult, ErrorCode};

/// Source of the current business date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the business timezone
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse an IANA timezone name (e.g. "Europe/Paris")
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.parse::<Tz>().map_err(|_| {
        AppError::with_message(ErrorCode::ConfigError, format!("Invalid timezone: {}", name))
    })
}

/// The end date has passed once today is strictly after it
#[inline]
pub fn end_passed(end_date: NaiveDate, today: NaiveDate) -> bool {
    today > end_date
}
