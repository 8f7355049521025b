use chrono::NaiveDate;
use tracing::{error, info};

use crate::api::{self, ApiError, FinanceApi};
use crate::models::*;
use crate::report::{self, BudgetProgress, Totals};
use crate::ui::form::{parse_amount, BudgetForm, EntryForm, FormField, TransactionForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
    NewTransaction,
    SetBudget,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Budgets,
            Self::NewTransaction,
            Self::SetBudget,
        ]
    }

    pub(crate) fn is_form(&self) -> bool {
        matches!(self, Self::NewTransaction | Self::SetBudget)
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
            Self::NewTransaction => write!(f, "New Transaction"),
            Self::SetBudget => write!(f, "Set Budget"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, description: String },
}

/// All state behind the TUI. Every change goes through one of the action
/// methods below, so the whole flow can be driven without a terminal.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    /// Failure of the last user action, shown until the next one.
    pub(crate) alert: Option<String>,
    pub(crate) show_help: bool,
    pub(crate) loading: bool,

    // Collections, refetched in full after every change
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) budgets: Vec<Budget>,
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Forms
    pub(crate) txn_form: TransactionForm,
    pub(crate) budget_form: BudgetForm,
    /// Field the inline editor writes back to.
    pub(crate) editing_field: Option<FormField>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            alert: None,
            show_help: false,
            loading: false,

            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,
            budgets: Vec::new(),
            budget_index: 0,
            budget_scroll: 0,

            txn_form: TransactionForm::default(),
            budget_form: BudgetForm::default(),
            editing_field: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    // ── Derived figures ──────────────────────────────────────

    pub(crate) fn totals(&self) -> Totals {
        Totals::from_transactions(&self.transactions)
    }

    pub(crate) fn progress_for(&self, category: &Category) -> Option<BudgetProgress> {
        report::budget_progress(category, &self.budgets, &self.transactions)
    }

    pub(crate) fn budget_rows(&self) -> Vec<(&Budget, BudgetProgress)> {
        report::all_progress(&self.budgets, &self.transactions)
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    // ── Actions ──────────────────────────────────────────────

    /// Refetch both collections together. On failure the error is logged
    /// and the previous contents stay on screen.
    pub(crate) fn load(&mut self, api: &dyn FinanceApi) -> bool {
        self.loading = true;
        let result = api::fetch_all(api);
        self.loading = false;

        match result {
            Ok((transactions, budgets)) => {
                info!(
                    transactions = transactions.len(),
                    budgets = budgets.len(),
                    "loaded data"
                );
                self.transactions = transactions;
                self.budgets = budgets;
                self.clamp_cursors();
                true
            }
            Err(e) => {
                error!(error = %e, "failed to load data");
                false
            }
        }
    }

    /// Post the transaction form, then reload.
    pub(crate) fn submit_transaction(&mut self, api: &dyn FinanceApi) {
        self.alert = None;
        let form = &self.txn_form;
        let Some(amount) = parse_amount(&form.amount) else {
            self.set_status("Enter an amount greater than zero");
            return;
        };
        if form.description.is_empty() {
            self.set_status("Enter a description");
            return;
        }

        let txn = NewTransaction {
            amount,
            transaction_type: form.kind,
            category: form.category.value().clone(),
            description: form.description.clone(),
        };
        match api.create_transaction(&txn) {
            Ok(()) => {
                info!(kind = %txn.transaction_type, category = %txn.category, %amount, "transaction added");
                self.txn_form.reset_entry();
                self.set_status(format!(
                    "Added {}: {} ${amount}",
                    txn.transaction_type.as_str().to_lowercase(),
                    txn.description
                ));
                self.load(api);
            }
            Err(e) => self.fail("add transaction", &e),
        }
    }

    /// Post the budget form for the month containing `today`, then reload.
    pub(crate) fn submit_budget(&mut self, api: &dyn FinanceApi, today: NaiveDate) {
        self.alert = None;
        let Some(amount) = parse_amount(&self.budget_form.amount) else {
            self.set_status("Enter a budget amount greater than zero");
            return;
        };
        let category = self.budget_form.category.value().clone();
        match SetBudgetRequest::for_month(category, amount, today) {
            Ok(req) => self.set_budget(api, &req),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub(crate) fn set_budget(&mut self, api: &dyn FinanceApi, req: &SetBudgetRequest) {
        self.alert = None;
        match api.set_budget(req) {
            Ok(()) => {
                info!(category = %req.category, amount = %req.amount, month = req.month, year = req.year, "budget set");
                self.budget_form.amount.clear();
                self.set_status(format!(
                    "Budget set: {} = ${} for {}-{:02}",
                    req.category, req.amount, req.year, req.month
                ));
                self.load(api);
            }
            Err(e) => self.fail("set budget", &e),
        }
    }

    /// Ask before deleting the selected transaction.
    pub(crate) fn request_delete(&mut self) {
        let Some(txn) = self.selected_transaction() else {
            self.set_status("No transaction selected");
            return;
        };
        let id = txn.id.clone();
        let description = txn.description.clone();
        self.confirm_message = format!("Delete '{description}'?");
        self.pending_action = Some(PendingAction::DeleteTransaction { id, description });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm(&mut self, api: &dyn FinanceApi) {
        if let Some(PendingAction::DeleteTransaction { id, description }) =
            self.pending_action.take()
        {
            self.delete_transaction(api, &id, &description);
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
    }

    pub(crate) fn cancel_confirm(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    pub(crate) fn delete_transaction(&mut self, api: &dyn FinanceApi, id: &str, description: &str) {
        self.alert = None;
        match api.delete_transaction(id) {
            Ok(()) => {
                info!(id, "transaction deleted");
                self.set_status(format!("Deleted: {description}"));
                self.load(api);
            }
            Err(e) => self.fail("delete transaction", &e),
        }
    }

    /// Prefill the budget form from an existing budget.
    pub(crate) fn edit_budget(&mut self, index: usize) {
        let Some(budget) = self.budgets.get(index) else {
            return;
        };
        let category = budget.category.clone();
        self.budget_form.amount = budget.amount.to_string();
        self.budget_form.category.set(&category);
        self.budget_form.field_index = 0;
        self.screen = Screen::SetBudget;
        self.set_status(format!("Editing budget for {category}"));
    }

    // ── Form editing ─────────────────────────────────────────

    /// Form of the current screen, if it is a form screen.
    pub(crate) fn active_form(&mut self) -> Option<&mut dyn EntryForm> {
        match self.screen {
            Screen::NewTransaction => Some(&mut self.txn_form),
            Screen::SetBudget => Some(&mut self.budget_form),
            _ => None,
        }
    }

    /// Open the inline editor on the selected text field.
    pub(crate) fn begin_edit(&mut self) {
        let Some(form) = self.active_form() else {
            return;
        };
        let field = form.selected_field();
        if !field.is_text() {
            return;
        }
        let current = form.text(field);
        self.command_input = current;
        self.editing_field = Some(field);
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn commit_edit(&mut self) {
        let value = std::mem::take(&mut self.command_input);
        if let Some(field) = self.editing_field.take() {
            if let Some(form) = self.active_form() {
                form.set_text(field, value);
                form.clamp_cursor();
            }
        }
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.command_input.clear();
        self.editing_field = None;
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn adjust_field(&mut self, forward: bool) {
        if let Some(form) = self.active_form() {
            let field = form.selected_field();
            form.adjust(field, forward);
            form.clamp_cursor();
        }
    }

    /// The "Change" link next to a custom label.
    pub(crate) fn change_category(&mut self) {
        if let Some(form) = self.active_form() {
            form.category_mut().change();
            form.clamp_cursor();
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn fail(&mut self, action: &str, err: &ApiError) {
        error!(error = %err, "failed to {action}");
        let reason = match err {
            ApiError::Rejected { .. } => "the server rejected the request",
            ApiError::Transport { .. } => "the server could not be reached",
            ApiError::Decode { .. } => "the server sent a response that could not be read",
            ApiError::InvalidUrl(_) => "the API URL is invalid",
            ApiError::ClientInit(_) => "the HTTP client could not start",
        };
        self.alert = Some(format!("Failed to {action}: {reason}"));
    }

    fn clamp_cursors(&mut self) {
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        if self.budget_index >= self.budgets.len() {
            self.budget_index = self.budgets.len().saturating_sub(1);
        }
        if self.budget_scroll > self.budget_index {
            self.budget_scroll = self.budget_index;
        }
    }
}
