//! Shell command handlers. Each one calls into the ledger service and renders
//! the plain data it gets back.

use crate::cli::{
    core::{CommandError, CommandResult},
    output,
    registry::{CommandEntry, CommandRegistry},
    shell_context::ShellContext,
};
use crate::domain::TimeWindow;

pub(crate) fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(CommandEntry::new(
        "add",
        "Record an income (positive) or expense (negative) entry",
        "add <text> <amount> [category]",
        cmd_add,
    ));
    registry.register(CommandEntry::new(
        "remove",
        "Delete an entry by id",
        "remove <id>",
        cmd_remove,
    ));
    registry.register(CommandEntry::new(
        "list",
        "Show every recorded entry",
        "list",
        cmd_list,
    ));
    registry.register(CommandEntry::new(
        "balance",
        "Show balance, income and expense totals",
        "balance",
        cmd_balance,
    ));
    registry.register(CommandEntry::new(
        "window",
        "Show or change the time window used by `breakdown`",
        "window [weekly|monthly|yearly|all]",
        cmd_window,
    ));
    registry.register(CommandEntry::new(
        "breakdown",
        "Expenses by category and income vs expense for the current window",
        "breakdown",
        cmd_breakdown,
    ));
    registry.register(CommandEntry::new(
        "help",
        "List available commands",
        "help",
        cmd_help,
    ));
    registry.register(CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit));
    registry.alias("rm", "remove");
    registry.alias("quit", "exit");
    registry
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (text, amount, category) = match args {
        [text, amount] => (*text, *amount, None),
        [text, amount, category] => (*text, *amount, Some(*category)),
        _ => {
            return Err(CommandError::InvalidArguments(
                "Usage: add <text> <amount> [category]".into(),
            ))
        }
    };
    let txn = context.ledger.add(text, amount, category)?;
    output::success(format!(
        "Recorded #{} {} {}",
        txn.id,
        txn.text,
        context.money.signed(txn.amount)
    ));
    refresh(context);
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id] = args else {
        return Err(CommandError::InvalidArguments("Usage: remove <id>".into()));
    };
    let id = raw_id
        .trim_start_matches('#')
        .parse::<u64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw_id}` is not an entry id")))?;
    if context.ledger.remove(id)? {
        output::success(format!("Removed #{id}"));
    } else {
        output::info(format!("No entry #{id}, nothing removed"));
    }
    refresh(context);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let transactions = context.ledger.transactions();
    output::section(format!("History ({})", transactions.len()));
    if transactions.is_empty() {
        output::info("No entries yet.");
        return Ok(());
    }
    for txn in transactions {
        println!("{}", context.money.transaction_row(txn));
    }
    Ok(())
}

fn cmd_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_summary(context);
    Ok(())
}

fn cmd_window(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {}
        [name] => context.window = TimeWindow::parse(name),
        _ => {
            return Err(CommandError::InvalidArguments(
                "Usage: window [weekly|monthly|yearly|all]".into(),
            ))
        }
    }
    output::info(format!(
        "Window: {} ({})",
        context.window,
        context.window.label()
    ));
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.ledger.report(context.window);
    output::section(format!(
        "Expense breakdown: {} ({} entries)",
        report.window.label(),
        report.transaction_count
    ));
    if report.by_category.is_empty() {
        output::info("No expenses in this window.");
    } else {
        for line in context.money.breakdown_lines(&report.by_category) {
            println!("{line}");
        }
    }
    output::section("Income vs Expense");
    for line in context.money.income_expense_bars(&report.income_vs_expense) {
        println!("{line}");
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Commands");
    for entry in context.registry().list() {
        println!("  {:<38} {}", entry.usage, entry.description);
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

/// Mirrors the full re-render after each mutation.
fn refresh(context: &ShellContext) {
    print_summary(context);
}

fn print_summary(context: &ShellContext) {
    for line in context.money.summary_lines(&context.ledger.summary()) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::CliMode;
    use crate::config::Config;
    use crate::core::{clock::FixedClock, services::LedgerService};
    use crate::errors::LedgerError;
    use crate::storage::MemoryStorage;
    use chrono::{TimeZone, Utc};

    fn context() -> ShellContext {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap());
        let ledger = LedgerService::with_clock(Box::new(MemoryStorage::new()), Box::new(clock))
            .expect("ledger");
        ShellContext::with_ledger(CliMode::Script, ledger, Config::default())
    }

    #[test]
    fn add_and_remove_update_the_ledger() {
        let mut ctx = context();
        cmd_add(&mut ctx, &["Salary", "1000", "Income"]).unwrap();
        cmd_add(&mut ctx, &["Coffee", "-50", "Food"]).unwrap();
        assert_eq!(ctx.ledger.summary().total, 950.0);

        let id = ctx.ledger.transactions()[1].id.to_string();
        cmd_remove(&mut ctx, &[id.as_str()]).unwrap();
        cmd_remove(&mut ctx, &[id.as_str()]).unwrap();
        assert_eq!(ctx.ledger.transactions().len(), 1);
    }

    #[test]
    fn blank_text_surfaces_validation_error() {
        let mut ctx = context();
        let err = cmd_add(&mut ctx, &["", "10", "General"]).unwrap_err();
        assert!(matches!(err, CommandError::Ledger(LedgerError::Validation(_))));
        assert!(ctx.ledger.transactions().is_empty());
    }

    #[test]
    fn wrong_arity_is_a_usage_error() {
        let mut ctx = context();
        assert!(matches!(
            cmd_add(&mut ctx, &["only-text"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            cmd_remove(&mut ctx, &["abc"]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn window_command_falls_back_to_all() {
        let mut ctx = context();
        assert_eq!(ctx.window(), TimeWindow::Weekly);
        cmd_window(&mut ctx, &["monthly"]).unwrap();
        assert_eq!(ctx.window(), TimeWindow::Monthly);
        cmd_window(&mut ctx, &[]).unwrap();
        assert_eq!(ctx.window(), TimeWindow::Monthly);
        cmd_window(&mut ctx, &["decade"]).unwrap();
        assert_eq!(ctx.window(), TimeWindow::All);
    }

    #[test]
    fn aliases_resolve_to_commands() {
        let registry = registry();
        assert!(registry.get("rm").is_some());
        assert_eq!(registry.get("quit").map(|e| e.name), Some("exit"));
        assert!(registry.get("nope").is_none());
    }
}
