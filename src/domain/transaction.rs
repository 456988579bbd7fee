use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::common::{Displayable, Identifiable};

/// Category assigned to entries that were recorded before categories existed.
pub const DEFAULT_CATEGORY: &str = "General";

/// A single recorded income (positive amount) or expense (negative amount).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub text: String,
    pub amount: f64,
    pub category: String,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        id: u64,
        text: impl Into<String>,
        amount: f64,
        category: Option<&str>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            amount,
            category: normalize_category(category),
            date,
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} ({})", self.text, self.category)
    }
}

/// Record shape as found in the persisted slot. Older entries may lack a
/// category or a date, and unreadable amounts were stored as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawTransaction {
    pub id: u64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl RawTransaction {
    /// Backfills missing fields so the record becomes a first-class [`Transaction`].
    pub fn migrate(self, now: DateTime<Utc>) -> Transaction {
        let date = match self.date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match DateTime::parse_from_rfc3339(raw) {
                Ok(parsed) => parsed.with_timezone(&Utc),
                Err(err) => {
                    warn!(id = self.id, date = raw, %err, "unreadable entry date, using load time");
                    now
                }
            },
            _ => now,
        };
        let amount = match self.amount {
            Some(value) if value.is_finite() => value,
            _ => {
                warn!(id = self.id, "entry without a usable amount, treating as zero");
                0.0
            }
        };
        Transaction {
            id: self.id,
            text: self.text,
            amount,
            category: match self.category {
                Some(category) if !category.is_empty() => category,
                _ => DEFAULT_CATEGORY.to_string(),
            },
            date,
        }
    }

    /// True when a field is absent or empty. Whitespace counts as a value.
    pub fn needs_migration(&self) -> bool {
        let missing = |value: &Option<String>| value.as_deref().map_or(true, str::is_empty);
        missing(&self.category) || missing(&self.date) || self.amount.is_none()
    }
}

impl From<Transaction> for RawTransaction {
    fn from(txn: Transaction) -> Self {
        Self {
            id: txn.id,
            text: txn.text,
            amount: Some(txn.amount),
            category: Some(txn.category),
            date: Some(txn.date.to_rfc3339()),
        }
    }
}

/// Applies [`RawTransaction::migrate`] to every loaded record.
pub fn migrate(raw: Vec<RawTransaction>, now: DateTime<Utc>) -> Vec<Transaction> {
    raw.into_iter().map(|record| record.migrate(now)).collect()
}

fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn legacy(id: u64) -> RawTransaction {
        RawTransaction {
            id,
            text: "Rent".into(),
            amount: Some(-500.0),
            category: None,
            date: None,
        }
    }

    #[test]
    fn migrate_backfills_category_and_date() {
        let txn = legacy(7).migrate(now());
        assert_eq!(txn.category, DEFAULT_CATEGORY);
        assert_eq!(txn.date, now());
        assert_eq!(txn.amount, -500.0);
        assert_eq!(txn.text, "Rent");
    }

    #[test]
    fn migrate_keeps_existing_fields() {
        let raw = RawTransaction {
            category: Some("Housing".into()),
            date: Some("2023-12-01T08:30:00.000Z".into()),
            ..legacy(3)
        };
        let txn = raw.migrate(now());
        assert_eq!(txn.category, "Housing");
        assert_eq!(txn.date, Utc.with_ymd_and_hms(2023, 12, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn empty_category_counts_as_missing() {
        let raw = RawTransaction {
            category: Some(String::new()),
            date: Some(String::new()),
            ..legacy(4)
        };
        assert!(raw.needs_migration());
        let txn = raw.migrate(now());
        assert_eq!(txn.category, DEFAULT_CATEGORY);
        assert_eq!(txn.date, now());
    }

    #[test]
    fn migrate_keeps_stored_category_verbatim() {
        let padded = RawTransaction {
            category: Some(" Food ".into()),
            date: Some("2024-03-01T10:00:00Z".into()),
            ..legacy(5)
        };
        assert!(!padded.needs_migration());
        assert_eq!(padded.migrate(now()).category, " Food ");

        let spaces = RawTransaction {
            category: Some("   ".into()),
            date: Some("2024-03-01T10:00:00Z".into()),
            ..legacy(6)
        };
        assert_eq!(spaces.migrate(now()).category, "   ");
    }

    #[test]
    fn new_entries_trim_their_category() {
        let txn = Transaction::new(1, "Tea", -2.0, Some("  Food "), now());
        assert_eq!(txn.category, "Food");
        let blank = Transaction::new(2, "Tea", -2.0, Some("   "), now());
        assert_eq!(blank.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn migrate_is_idempotent() {
        let later = now() + chrono::Duration::days(30);
        let once = migrate(vec![legacy(1), legacy(2)], now());
        let twice = migrate(once.iter().cloned().map(RawTransaction::from).collect(), later);
        assert_eq!(once, twice);
    }

    #[test]
    fn null_amount_becomes_zero() {
        let raw = RawTransaction {
            amount: None,
            ..legacy(9)
        };
        assert_eq!(raw.migrate(now()).amount, 0.0);
    }

    #[test]
    fn legacy_json_without_new_fields_deserializes() {
        let raw: RawTransaction =
            serde_json::from_str(r#"{"id":12345678,"text":"Book","amount":-20}"#).unwrap();
        assert!(raw.needs_migration());
        assert_eq!(raw.amount, Some(-20.0));
    }
}
