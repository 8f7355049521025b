use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::api::{self, FinanceApi};
use crate::models::{Category, NewTransaction, SetBudgetRequest, TransactionType};
use crate::report::{self, Totals};
use crate::ui::form::parse_amount;
use crate::ui::util::{format_amount, signed_amount, text_bar, truncate};

pub(crate) fn as_cli(args: &[String], api: &dyn FinanceApi) -> Result<()> {
    let rest = args.get(2..).unwrap_or_default();
    match args.get(1).map(String::as_str).unwrap_or_default() {
        "summary" | "s" => cli_summary(api),
        "transactions" | "t" => cli_transactions(api),
        "budgets" | "b" => cli_budgets(api),
        "add" => cli_add(rest, api),
        "delete" => cli_delete(rest, api),
        "set-budget" => cli_set_budget(rest, api),
        "export" => cli_export(rest, api),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("fintrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("fintrack: personal finance tracker client");
    println!();
    println!("Usage: fintrack [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                  Launch interactive TUI");
    println!("  summary, s                              Print totals and budget progress");
    println!("  transactions, t                         List all transactions");
    println!("  budgets, b                              List budgets with progress");
    println!("  add <income|expense> <amount> <category> <description...>");
    println!("                                          Record a transaction");
    println!("  delete <id>                             Delete a transaction");
    println!("  set-budget <category> <amount>          Set this month's budget");
    println!("  export [path]                           Export transactions to CSV");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
    println!();
    println!("Categories: {}, Other, or \"Other: <label>\"", Category::fixed_names());
    println!();
    println!("Environment:");
    println!("  FINTRACK_API_URL      Store address (default http://localhost:5000)");
    println!("  FINTRACK_ACCOUNT_ID   Account new transactions are recorded against");
    println!("  FINTRACK_LOG          Log filter (default info)");
}

fn cli_summary(api: &dyn FinanceApi) -> Result<()> {
    let (transactions, budgets) = api::fetch_all(api).context("Failed to load data")?;
    let totals = Totals::from_transactions(&transactions);

    println!("fintrack summary");
    println!("{}", "─".repeat(40));
    println!("  Income:     {:>14}", format_amount(totals.income));
    println!("  Expenses:   {:>14}", format_amount(totals.expense));
    println!("  Balance:    {:>14}", format_amount(totals.balance));
    println!("  Total Txns: {:>14}", transactions.len());

    let rows = report::all_progress(&budgets, &transactions);
    if !rows.is_empty() {
        println!();
        println!("Budget Progress:");
        for (budget, progress) in rows {
            println!(
                "  {:<20} {} {:>4.0}%  {} of {}{}",
                truncate(&budget.category.to_string(), 20),
                text_bar(progress.ratio(), 20),
                progress.percent,
                format_amount(progress.spent),
                format_amount(progress.total),
                if progress.is_over { "  OVER" } else { "" }
            );
        }
    }
    Ok(())
}

fn cli_transactions(api: &dyn FinanceApi) -> Result<()> {
    let mut transactions = api
        .list_transactions()
        .context("Failed to load transactions")?;
    if transactions.is_empty() {
        println!("No transactions");
        return Ok(());
    }
    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    println!(
        "{:<38} {:<10} {:<20} {:<30} {:>14}",
        "ID", "Date", "Category", "Description", "Amount"
    );
    println!("{}", "─".repeat(116));
    for txn in &transactions {
        println!(
            "{:<38} {:<10} {:<20} {:<30} {:>14}",
            txn.id,
            txn.date.format("%Y-%m-%d"),
            truncate(&txn.category.to_string(), 20),
            truncate(&txn.description, 30),
            signed_amount(txn),
        );
    }
    Ok(())
}

fn cli_budgets(api: &dyn FinanceApi) -> Result<()> {
    let (transactions, budgets) = api::fetch_all(api).context("Failed to load data")?;
    if budgets.is_empty() {
        println!("No budgets");
        return Ok(());
    }

    println!(
        "{:<20} {:<7} {:>12} {:>12} {:>6}",
        "Category", "Month", "Spent", "Budget", "Used"
    );
    println!("{}", "─".repeat(61));
    for (budget, progress) in report::all_progress(&budgets, &transactions) {
        println!(
            "{:<20} {}-{:02} {:>12} {:>12} {:>5.0}%{}",
            truncate(&budget.category.to_string(), 20),
            budget.year,
            budget.month,
            format_amount(progress.spent),
            format_amount(progress.total),
            progress.percent,
            if progress.is_over { " OVER" } else { "" }
        );
    }
    Ok(())
}

fn cli_add(args: &[String], api: &dyn FinanceApi) -> Result<()> {
    let txn = parse_add_args(args)?;
    api.create_transaction(&txn)
        .context("Failed to add transaction")?;
    println!(
        "Added {} {} ({}): {}",
        txn.transaction_type.as_str().to_lowercase(),
        format_amount(txn.amount),
        txn.category,
        txn.description
    );
    Ok(())
}

fn cli_delete(args: &[String], api: &dyn FinanceApi) -> Result<()> {
    let [id] = args else {
        anyhow::bail!("Usage: fintrack delete <id>");
    };
    api.delete_transaction(id)
        .with_context(|| format!("Failed to delete transaction {id}"))?;
    println!("Deleted transaction {id}");
    Ok(())
}

fn cli_set_budget(args: &[String], api: &dyn FinanceApi) -> Result<()> {
    let req = parse_budget_args(args, chrono::Local::now().date_naive())?;
    api.set_budget(&req).context("Failed to set budget")?;
    println!(
        "Budget set: {} = {} for {}-{:02}",
        req.category,
        format_amount(req.amount),
        req.year,
        req.month
    );
    Ok(())
}

fn cli_export(args: &[String], api: &dyn FinanceApi) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(default_export_path);

    let transactions = api
        .list_transactions()
        .context("Failed to load transactions")?;
    let count = crate::export::export_to_csv(&output_path, &transactions)?;
    if count == 0 {
        println!("No transactions to export (wrote header only)");
    } else {
        println!("Exported {count} transactions to {}", output_path.display());
    }
    Ok(())
}

// ── Argument parsing ─────────────────────────────────────────

/// `<income|expense> <amount> <category> <description...>`
pub(crate) fn parse_add_args(args: &[String]) -> Result<NewTransaction> {
    let [kind, amount, category, description @ ..] = args else {
        anyhow::bail!(
            "Usage: fintrack add <income|expense> <amount> <category> <description...>"
        );
    };
    let transaction_type = TransactionType::parse(kind)
        .with_context(|| format!("Invalid type '{kind}', expected income or expense"))?;
    let amount = parse_amount(amount).with_context(|| format!("Invalid amount: {amount}"))?;
    let category = parse_category(category)?;
    let description = description.join(" ");
    if description.is_empty() {
        anyhow::bail!("A description is required");
    }
    NewTransaction::new(amount, transaction_type, category, description)
}

/// `<category> <amount>`, for the month containing `today`.
pub(crate) fn parse_budget_args(args: &[String], today: NaiveDate) -> Result<SetBudgetRequest> {
    let [category, amount] = args else {
        anyhow::bail!("Usage: fintrack set-budget <category> <amount>");
    };
    let category = parse_category(category)?;
    let amount = parse_amount(amount).with_context(|| format!("Invalid amount: {amount}"))?;
    SetBudgetRequest::for_month(category, amount, today)
}

fn parse_category(raw: &str) -> Result<Category> {
    match Category::parse(raw) {
        Category::Unlisted(raw) => anyhow::bail!(
            "Unknown category '{raw}'. Use one of {}, Other, or \"Other: <label>\"",
            Category::fixed_names()
        ),
        category => Ok(category),
    }
}

// ── Paths ────────────────────────────────────────────────────

fn home_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub(crate) fn default_export_path() -> PathBuf {
    home_dir().join("fintrack-export.csv")
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest).display().to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
