use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::models::Category;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::form::{EntryForm, FormField};
use crate::ui::theme;
use crate::ui::util::{format_amount, text_bar};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let (form, title) = match app.screen {
        Screen::SetBudget => (&app.budget_form as &dyn EntryForm, "Set Budget (this month)"),
        _ => (&app.txn_form as &dyn EntryForm, "New Transaction"),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(4)])
        .split(area);

    render_fields(f, chunks[0], app, form, title);
    render_category_progress(f, chunks[1], app, form.category().value());
}

fn render_fields(f: &mut Frame, area: Rect, app: &App, form: &dyn EntryForm, title: &str) {
    let selected = form.field_index();
    let items: Vec<ListItem> = form
        .fields()
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let is_cursor = i == selected;
            let editing = app.input_mode == InputMode::Editing && app.editing_field == Some(field);
            ListItem::new(field_line(form, field, is_cursor, editing, &app.command_input))
        })
        .collect();

    let hints = Line::from(Span::styled(
        " j/k move | h/l cycle | Enter edit/submit | c change label ",
        theme::dim_style(),
    ));
    let list = List::new(items).block(theme::panel(title).title_bottom(hints));
    f.render_widget(list, area);
}

fn field_line<'a>(
    form: &dyn EntryForm,
    field: FormField,
    is_cursor: bool,
    editing: bool,
    input: &'a str,
) -> Line<'a> {
    let label_style = if is_cursor {
        theme::selected_style()
    } else {
        theme::dim_style()
    };
    let label = Span::styled(format!(" {:<14}", field.title()), label_style);

    let value = match field {
        FormField::Submit => Span::styled(
            format!("[ {} ]", form.text(field)),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        FormField::Type | FormField::Category => Span::styled(
            format!(" < {} >", form.text(field)),
            theme::normal_style(),
        ),
        _ if editing => Span::styled(format!(" {input}_"), Style::default().fg(theme::GREEN)),
        _ => {
            let text = form.text(field);
            if text.is_empty() {
                Span::styled(" (empty)", theme::dim_style())
            } else {
                Span::styled(format!(" {text}"), theme::normal_style())
            }
        }
    };

    let mut spans = vec![label, value];
    if field == FormField::Label && matches!(form.category().value(), Category::Custom(_)) {
        spans.push(Span::styled("   [c] Change", Style::default().fg(theme::YELLOW)));
    }
    Line::from(spans)
}

fn render_category_progress(f: &mut Frame, area: Rect, app: &App, category: &Category) {
    let line = match app.progress_for(category) {
        Some(p) => {
            let color = theme::progress_color(p.level());
            Line::from(vec![
                Span::styled(
                    format!(" {} of {} ", format_amount(p.spent), format_amount(p.total)),
                    Style::default().fg(color),
                ),
                Span::styled(text_bar(p.ratio(), 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {:.0}%{}", p.percent, if p.is_over { " over budget" } else { "" }),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ])
        }
        None => Line::from(Span::styled(" No budget for this category", theme::dim_style())),
    };
    let panel = theme::panel(&format!("{category} budget"));
    f.render_widget(Paragraph::new(line).block(panel), area);
}
