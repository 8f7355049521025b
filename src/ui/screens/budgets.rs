use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::models::Budget;
use crate::report::BudgetProgress;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, text_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.budget_rows();
    if rows.is_empty() {
        render_empty(f, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, (budget, progress))| {
            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            ListItem::new(budget_line(budget, progress, style, 20))
        })
        .collect();

    let list = List::new(items).block(theme::panel("Budgets (Enter to edit)"));
    f.render_widget(list, area);
}

/// One budget row: name, spent/total, bar and percentage.
pub(crate) fn budget_line(
    budget: &Budget,
    progress: &BudgetProgress,
    name_style: Style,
    bar_width: usize,
) -> Line<'static> {
    let color = theme::progress_color(progress.level());
    let name = truncate(&budget.category.to_string(), 19);
    let mut spans = vec![
        Span::styled(format!("{name:<20}"), name_style),
        Span::styled(
            format!(
                "{}/{} ",
                format_amount(progress.spent),
                format_amount(progress.total)
            ),
            Style::default().fg(color),
        ),
        Span::styled(text_bar(progress.ratio(), bar_width), Style::default().fg(color)),
        Span::styled(
            format!(" {:.0}%", progress.percent),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ];
    if progress.is_over {
        spans.push(Span::styled(" OVER", theme::expense_style().add_modifier(Modifier::BOLD)));
    }
    Line::from(spans)
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No budgets set", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Press 5 or use :budget <category> <amount> to set a spending limit",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(theme::panel("Budgets"));
    f.render_widget(msg, area);
}
