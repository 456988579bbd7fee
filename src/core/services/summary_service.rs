use chrono::{DateTime, TimeZone};
use tracing::debug;

use crate::domain::{
    summary::round_to_cents, CategoryBreakdown, IncomeExpense, Summary, TimeWindow, Transaction,
    WindowReport,
};

/// Pure aggregations over any subset of transactions.
pub struct SummaryService;

impl SummaryService {
    /// Balance, income and expense over `transactions`, rounded to cents.
    pub fn summarize<'a, I>(transactions: I) -> Summary
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut total = 0.0;
        let mut income = 0.0;
        let mut expense = 0.0;
        for txn in transactions {
            total += txn.amount;
            if txn.is_income() {
                income += txn.amount;
            } else if txn.is_expense() {
                expense += txn.amount;
            }
        }
        Summary {
            total: round_to_cents(total),
            income: round_to_cents(income),
            expense: round_to_cents(expense.abs()),
        }
    }

    /// Sums expense magnitudes per category. Income and zero entries are skipped.
    pub fn by_category<'a, I>(transactions: I) -> CategoryBreakdown
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut breakdown = CategoryBreakdown::new();
        for txn in transactions.into_iter().filter(|txn| txn.is_expense()) {
            breakdown.accumulate(&txn.category, txn.amount.abs());
        }
        breakdown
    }

    pub fn income_vs_expense<'a, I>(transactions: I) -> IncomeExpense
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(IncomeExpense::default(), |mut acc, txn| {
                if txn.is_income() {
                    acc.income += txn.amount;
                } else if txn.is_expense() {
                    acc.expense += txn.amount.abs();
                }
                acc
            })
    }

    /// Filters `transactions` to `window` and computes both chart datasets.
    pub fn window_report<Tz: TimeZone>(
        transactions: &[Transaction],
        window: TimeWindow,
        now: DateTime<Tz>,
    ) -> WindowReport {
        let selected = window.select(transactions, now);
        debug!(%window, selected = selected.len(), total = transactions.len(), "window selected");
        WindowReport {
            window,
            transaction_count: selected.len(),
            by_category: Self::by_category(selected.iter().copied()),
            income_vs_expense: Self::income_vs_expense(selected.iter().copied()),
        }
    }
}
