use rust_decimal::Decimal;

use crate::models::{Budget, Category, Transaction, TransactionType};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Spend against one category's budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BudgetProgress {
    pub(crate) spent: Decimal,
    pub(crate) total: Decimal,
    /// Always within 0..=100, even when `spent` overshoots.
    pub(crate) percent: Decimal,
    pub(crate) is_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProgressLevel {
    Ok,
    Warning,
    Over,
}

impl BudgetProgress {
    pub(crate) fn level(&self) -> ProgressLevel {
        if self.is_over {
            ProgressLevel::Over
        } else if self.percent > Decimal::from(70) {
            ProgressLevel::Warning
        } else {
            ProgressLevel::Ok
        }
    }

    /// `percent` as a 0.0..=1.0 ratio, for bar widgets.
    pub(crate) fn ratio(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        (self.percent / HUNDRED).to_f64().unwrap_or(0.0)
    }
}

/// Progress of the first budget for `category`, or `None` when no budget
/// exists for it.
///
/// Matching is by category only. Budgets carry a month and year, but neither
/// the budget lookup nor the spend sum looks at them.
pub(crate) fn budget_progress(
    category: &Category,
    budgets: &[Budget],
    transactions: &[Transaction],
) -> Option<BudgetProgress> {
    let budget = budgets.iter().find(|b| &b.category == category)?;

    let spent = transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Expense && &t.category == category)
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount));

    let total = budget.amount;
    // A non-positive cap is treated as fully consumed.
    let percent = if total <= Decimal::ZERO {
        HUNDRED
    } else {
        // Near Decimal::MAX the scaled spend overflows, so fall back to
        // dividing first. A quotient too large to represent is over 100.
        spent
            .checked_mul(HUNDRED)
            .and_then(|scaled| scaled.checked_div(total))
            .or_else(|| spent.checked_div(total)?.checked_mul(HUNDRED))
            .map_or(HUNDRED, |p| p.clamp(Decimal::ZERO, HUNDRED))
    };

    Some(BudgetProgress {
        spent,
        total,
        percent,
        is_over: spent > total,
    })
}

/// Progress for every budget, in list order. Budgets sharing a category
/// all report the first one's figures, as `budget_progress` does.
pub(crate) fn all_progress<'a>(
    budgets: &'a [Budget],
    transactions: &[Transaction],
) -> Vec<(&'a Budget, BudgetProgress)> {
    budgets
        .iter()
        .filter_map(|b| budget_progress(&b.category, budgets, transactions).map(|p| (b, p)))
        .collect()
}

/// Income, expense and balance over every transaction, no date filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
    pub(crate) balance: Decimal,
}

impl Totals {
    pub(crate) fn from_transactions(transactions: &[Transaction]) -> Self {
        let (income, expense) =
            transactions
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| {
                    match t.transaction_type {
                        TransactionType::Income => (inc.saturating_add(t.amount), exp),
                        TransactionType::Expense => (inc, exp.saturating_add(t.amount)),
                    }
                });
        Self {
            income,
            expense,
            balance: income.saturating_sub(expense),
        }
    }
}
