use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, Screen};
use super::form::parse_amount;
use crate::api::FinanceApi;
use crate::models::{Category, SetBudgetRequest};

type CommandFn = fn(&str, &mut App, &dyn FinanceApi) -> anyhow::Result<()>;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: CommandFn,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("new", "Open the New Transaction form", cmd_new, r);
    register_command!("set-budget", "Open the Set Budget form", cmd_set_budget, r);
    register_command!(
        "budget",
        "Set budget for this month (e.g. :budget Other: Gym 50)",
        cmd_budget,
        r
    );
    register_command!("reload", "Reload transactions and budgets", cmd_reload, r);
    register_command!("r", "Reload transactions and budgets", cmd_reload, r);
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/finances.csv)",
        cmd_export,
        r
    );
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    api: &dyn FinanceApi,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, api)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _api: &dyn FinanceApi) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _api: &dyn FinanceApi) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _api: &dyn FinanceApi) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, _api: &dyn FinanceApi) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_new(_args: &str, app: &mut App, _api: &dyn FinanceApi) -> anyhow::Result<()> {
    app.screen = Screen::NewTransaction;
    app.txn_form.field_index = 0;
    Ok(())
}

fn cmd_set_budget(_args: &str, app: &mut App, _api: &dyn FinanceApi) -> anyhow::Result<()> {
    app.screen = Screen::SetBudget;
    app.budget_form.field_index = 0;
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, api: &dyn FinanceApi) -> anyhow::Result<()> {
    // Last token is the amount, everything before is the category
    let Some((category, amount_str)) = args.rsplit_once(' ') else {
        app.set_status("Usage: :budget <category> <amount>. Example: :budget Groceries 400");
        return Ok(());
    };

    let Some(amount) = parse_amount(amount_str) else {
        app.set_status(format!("Invalid amount: {amount_str}"));
        return Ok(());
    };

    let category = Category::parse(category.trim());
    if let Category::Unlisted(raw) = &category {
        app.set_status(format!(
            "Unknown category '{raw}'. Use one of {} or 'Other: <label>'",
            Category::fixed_names()
        ));
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    let req = SetBudgetRequest::for_month(category, amount, today)?;
    app.set_budget(api, &req);
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_reload(_args: &str, app: &mut App, api: &dyn FinanceApi) -> anyhow::Result<()> {
    if app.load(api) {
        app.set_status("Reloaded");
    } else {
        app.set_status("Reload failed, showing last loaded data");
    }
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, _api: &dyn FinanceApi) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }
    app.request_delete();
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _api: &dyn FinanceApi) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        crate::run::default_export_path()
    } else {
        PathBuf::from(crate::run::shellexpand(args))
    };

    let count = crate::export::export_to_csv(&path, &app.transactions)?;
    app.set_status(format!(
        "Exported {count} transactions to {}",
        path.display()
    ));
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _api: &dyn FinanceApi) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}
