mod common;

use std::fs;

use chrono::{Duration, TimeZone, Utc};
use common::{fixed_now, ledger_at, temp_base};
use expense_ledger::{
    core::services::SummaryService,
    core::utils::slot_file_in,
    domain::{time_window, TimeWindow},
};

fn seeded_ledger() -> expense_ledger::core::services::LedgerService {
    let base = temp_base();
    fs::write(
        slot_file_in(&base, "transactions"),
        r#"[
            {"id": 1, "text": "Last year rent", "amount": -800, "category": "Housing", "date": "2023-03-20T12:00:00Z"},
            {"id": 2, "text": "Groceries", "amount": -60, "category": "Food", "date": "2024-03-02T09:00:00Z"},
            {"id": 3, "text": "Salary", "amount": 1000, "category": "Income", "date": "2024-03-19T09:00:00Z"},
            {"id": 4, "text": "Train", "amount": -15, "category": "Transport", "date": "2024-01-05T07:45:00Z"}
        ]"#,
    )
    .unwrap();
    ledger_at(&base, fixed_now())
}

fn ids(entries: &[&expense_ledger::domain::Transaction]) -> Vec<u64> {
    entries.iter().map(|txn| txn.id).collect()
}

#[test]
fn monthly_excludes_same_month_last_year() {
    let ledger = seeded_ledger();
    assert_eq!(ids(&ledger.windowed(TimeWindow::Monthly)), vec![2, 3]);

    let report = ledger.report(TimeWindow::Monthly);
    assert_eq!(report.by_category.get("Food"), Some(60.0));
    assert!(report.by_category.get("Housing").is_none());
}

#[test]
fn each_window_narrows_the_previous() {
    let ledger = seeded_ledger();
    assert_eq!(ids(&ledger.windowed(TimeWindow::Weekly)), vec![3]);
    assert_eq!(ids(&ledger.windowed(TimeWindow::Yearly)), vec![2, 3, 4]);
    assert_eq!(ids(&ledger.windowed(TimeWindow::All)), vec![1, 2, 3, 4]);
}

#[test]
fn unknown_window_name_selects_everything() {
    let ledger = seeded_ledger();
    let window = TimeWindow::parse("fortnightly");
    assert_eq!(window, TimeWindow::All);
    assert_eq!(ledger.windowed(window).len(), ledger.transactions().len());
}

#[test]
fn weekly_boundary_is_inclusive() {
    let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
    let edge = now - Duration::days(7);
    assert!(TimeWindow::Weekly.contains(edge, now));
    assert!(!TimeWindow::Weekly.contains(edge - Duration::seconds(1), now));
    assert!(!TimeWindow::Weekly.contains(now + Duration::seconds(1), now));
}

#[test]
fn aggregating_a_window_only_sees_its_entries() {
    let ledger = seeded_ledger();
    let selected = time_window::select(ledger.transactions(), TimeWindow::Yearly, ledger.now());
    let summary = SummaryService::summarize(selected);
    assert_eq!(summary.total, 925.0);
    assert_eq!(summary.expense, 75.0);
}
