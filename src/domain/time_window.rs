use std::{convert::Infallible, fmt, str::FromStr};

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::transaction::Transaction;

/// Days covered by the rolling weekly window.
const WEEK_DAYS: i64 = 7;

/// Relative period used to narrow the transactions fed into aggregations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimeWindow {
    /// The last seven days up to and including `now`.
    #[default]
    Weekly,
    /// The calendar month of `now`.
    Monthly,
    /// The calendar year of `now`.
    Yearly,
    /// No filtering.
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::Weekly,
        TimeWindow::Monthly,
        TimeWindow::Yearly,
        TimeWindow::All,
    ];

    /// Resolves a window name. Unknown names behave as [`TimeWindow::All`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" => TimeWindow::Weekly,
            "monthly" | "month" => TimeWindow::Monthly,
            "yearly" | "year" => TimeWindow::Yearly,
            _ => TimeWindow::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Weekly => "weekly",
            TimeWindow::Monthly => "monthly",
            TimeWindow::Yearly => "yearly",
            TimeWindow::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Weekly => "Last 7 days",
            TimeWindow::Monthly => "This month",
            TimeWindow::Yearly => "This year",
            TimeWindow::All => "All time",
        }
    }

    /// Monthly and yearly compare calendar fields in `now`'s time zone, so
    /// "this month" follows the user's calendar rather than UTC.
    pub fn contains<Tz: TimeZone>(&self, date: DateTime<Utc>, now: DateTime<Tz>) -> bool {
        let local = date.with_timezone(&now.timezone());
        match self {
            TimeWindow::Weekly => {
                let now = now.with_timezone(&Utc);
                date >= now - Duration::days(WEEK_DAYS) && date <= now
            }
            TimeWindow::Monthly => local.year() == now.year() && local.month() == now.month(),
            TimeWindow::Yearly => local.year() == now.year(),
            TimeWindow::All => true,
        }
    }

    /// Borrows the transactions dated inside this window, preserving order.
    pub fn select<'a, Tz: TimeZone>(
        &self,
        transactions: &'a [Transaction],
        now: DateTime<Tz>,
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|txn| self.contains(txn.date, now.clone()))
            .collect()
    }
}

/// Free-standing form of [`TimeWindow::select`].
pub fn select<Tz: TimeZone>(
    transactions: &[Transaction],
    window: TimeWindow,
    now: DateTime<Tz>,
) -> Vec<&Transaction> {
    window.select(transactions, now)
}

impl FromStr for TimeWindow {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TimeWindow::parse(s))
    }
}

impl From<String> for TimeWindow {
    fn from(value: String) -> Self {
        TimeWindow::parse(&value)
    }
}

impl From<TimeWindow> for String {
    fn from(value: TimeWindow) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
