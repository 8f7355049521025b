use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, signed_amount, truncate};

use super::budgets::budget_line;

const RECENT: usize = 10;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Totals
            Constraint::Min(6),    // Budgets + recent
        ])
        .split(area);

    render_totals(f, chunks[0], app);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_budget_progress(f, lower[0], app);
    render_recent(f, lower[1], app);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let totals = app.totals();
    let income_count = app.transactions.iter().filter(|t| t.is_income()).count();
    let expense_count = app.transactions.iter().filter(|t| t.is_expense()).count();
    let balance_color = if totals.balance >= Decimal::ZERO {
        theme::GREEN
    } else {
        theme::RED
    };

    render_card(f, cards[0], "Income", totals.income, theme::GREEN, format!("{income_count} txns"));
    render_card(
        f,
        cards[1],
        "Expenses",
        totals.expense,
        theme::RED,
        format!("{expense_count} txns"),
    );
    render_card(f, cards[2], "Balance", totals.balance, balance_color, String::new());
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: Color, subtitle: String) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(theme::panel(title));

    f.render_widget(text, area);
}

fn render_budget_progress(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.budget_rows();
    if rows.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No budgets yet. Use :budget <category> <amount>",
            theme::dim_style(),
        )))
        .centered()
        .block(theme::panel("Budget Progress"));
        f.render_widget(msg, area);
        return;
    }

    let bar_width = (area.width as usize).saturating_sub(50).clamp(5, 20);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|(budget, progress)| {
            ListItem::new(budget_line(budget, progress, theme::normal_style(), bar_width))
        })
        .collect();
    f.render_widget(List::new(items).block(theme::panel("Budget Progress")), area);
}

fn render_recent(f: &mut Frame, area: Rect, app: &App) {
    let mut recent: Vec<_> = app.transactions.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));

    let desc_width = (area.width as usize).saturating_sub(28).max(8);
    let items: Vec<ListItem> = recent
        .into_iter()
        .take(RECENT)
        .map(|txn| {
            let style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", txn.date.format("%m-%d")), theme::dim_style()),
                Span::styled(
                    format!("{:<desc_width$} ", truncate(&txn.description, desc_width)),
                    theme::normal_style(),
                ),
                Span::styled(signed_amount(txn), style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(theme::panel("Recent Transactions")), area);
}
