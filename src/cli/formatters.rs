use colored::Colorize;

use crate::domain::{
    summary::round_to_cents, CategoryBreakdown, Displayable, IncomeExpense, Summary, Transaction,
};

const BAR_WIDTH: usize = 30;

/// Renders amounts the way the ledger list shows them: `-₹50.00`, `+₹1000.00`.
pub struct MoneyFormatter {
    symbol: String,
}

impl MoneyFormatter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn plain(&self, amount: f64) -> String {
        let value = round_to_cents(amount);
        if value < 0.0 {
            format!("-{}{:.2}", self.symbol, value.abs())
        } else {
            format!("{}{:.2}", self.symbol, value)
        }
    }

    pub fn signed(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { '-' } else { '+' };
        format!("{}{}{:.2}", sign, self.symbol, round_to_cents(amount.abs()))
    }

    pub fn transaction_row(&self, txn: &Transaction) -> String {
        let amount = self.signed(txn.amount);
        let amount = if txn.is_expense() {
            amount.red().to_string()
        } else {
            amount.green().to_string()
        };
        format!(
            "#{:<6} {:<32} {:>14}  {}",
            txn.id,
            txn.display_label(),
            amount,
            txn.date.format("%Y-%m-%d %H:%M")
        )
    }

    pub fn summary_lines(&self, summary: &Summary) -> Vec<String> {
        vec![
            format!("Balance: {}", self.plain(summary.total).bold()),
            format!("Income:  {}", format!("+{}{:.2}", self.symbol, summary.income).green()),
            format!("Expense: {}", format!("-{}{:.2}", self.symbol, summary.expense).red()),
        ]
    }

    /// One row per category with its share of the window's expenses.
    pub fn breakdown_lines(&self, breakdown: &CategoryBreakdown) -> Vec<String> {
        let total = breakdown.total();
        breakdown
            .iter()
            .map(|entry| {
                let share = if total > 0.0 {
                    entry.amount / total * 100.0
                } else {
                    0.0
                };
                format!(
                    "{:<20} {:>14} {:>6.1}%",
                    entry.category,
                    self.plain(entry.amount),
                    share
                )
            })
            .collect()
    }

    /// Horizontal bars scaled to the larger of the two totals.
    pub fn income_expense_bars(&self, totals: &IncomeExpense) -> Vec<String> {
        let peak = totals.income.max(totals.expense);
        let bar = |value: f64| {
            if peak <= 0.0 {
                String::new()
            } else {
                "#".repeat(((value / peak) * BAR_WIDTH as f64).round() as usize)
            }
        };
        vec![
            format!(
                "Income  {:<width$} {}",
                bar(totals.income).green(),
                self.plain(totals.income),
                width = BAR_WIDTH
            ),
            format!(
                "Expense {:<width$} {}",
                bar(totals.expense).red(),
                self.plain(totals.expense),
                width = BAR_WIDTH
            ),
        ]
    }
}
