use serde::{Deserialize, Serialize};

use crate::domain::time_window::TimeWindow;

/// Rounds to two decimal places, normalizing negative zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Balance and totals over the whole ledger. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: f64,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeExpense {
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Expense magnitude per category, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn accumulate(&mut self, category: &str, amount: f64) {
        match self.entries.iter_mut().find(|entry| entry.category == category) {
            Some(entry) => entry.amount += amount,
            None => self.entries.push(CategoryTotal {
                category: category.to_string(),
                amount,
            }),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.amount)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.category.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.amount).sum()
    }
}

/// Everything a front end needs to redraw its charts for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowReport {
    pub window: TimeWindow,
    pub transaction_count: usize,
    pub by_category: CategoryBreakdown,
    pub income_vs_expense: IncomeExpense,
}
