use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io;
use tracing::{error, info};

use crate::api::FinanceApi;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::form::{EntryForm, FormField};
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(api: &dyn FinanceApi) -> Result<()> {
    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result =
        initial_load(&mut terminal, &mut app, api).and_then(|()| run_app(&mut terminal, &mut app, api));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!(error = ?e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

/// Shows the loading indicator for one frame, then blocks on the first fetch.
fn initial_load<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    api: &dyn FinanceApi,
) -> Result<()> {
    app.loading = true;
    draw(terminal, app)?;
    if !app.load(api) {
        app.set_status("Could not load data from the server. Press r to retry");
    }
    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    terminal.draw(|f| {
        // Tab bar, status bar, command bar, borders and table header
        let content_height = f.area().height.saturating_sub(6) as usize;
        app.visible_rows = content_height.max(1);
        crate::ui::render::render(f, app);
    })?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api: &dyn FinanceApi,
) -> Result<()> {
    info!("tui started");
    while app.running {
        draw(terminal, app)?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, api),
                InputMode::Command => handle_command_input(key, app, api),
                InputMode::Editing => handle_editing_input(key, app),
                InputMode::Confirm => handle_confirm_input(key, app, api),
            }
        }
    }
    info!("tui stopped");
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, api: &dyn FinanceApi) {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            if let Some(screen) = Screen::all().get(idx) {
                switch_screen(app, *screen);
            }
        }
        KeyCode::Tab => cycle_screen(app, true),
        KeyCode::BackTab => cycle_screen(app, false),
        _ if app.screen.is_form() => handle_form_input(key, app, api),
        _ => handle_list_input(key, app, api),
    }
}

fn handle_list_input(key: KeyEvent, app: &mut App, api: &dyn FinanceApi) {
    let page = app.visible_rows.max(1);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => match app.screen {
            Screen::Transactions => scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                page,
            ),
            Screen::Budgets => scroll_down(
                &mut app.budget_index,
                &mut app.budget_scroll,
                app.budgets.len(),
                page,
            ),
            _ => {}
        },
        KeyCode::Char('k') | KeyCode::Up => match app.screen {
            Screen::Transactions => scroll_up(&mut app.transaction_index, &mut app.transaction_scroll),
            Screen::Budgets => scroll_up(&mut app.budget_index, &mut app.budget_scroll),
            _ => {}
        },
        KeyCode::Char('g') => match app.screen {
            Screen::Transactions => scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll),
            Screen::Budgets => scroll_to_top(&mut app.budget_index, &mut app.budget_scroll),
            _ => {}
        },
        KeyCode::Char('G') => match app.screen {
            Screen::Transactions => scroll_to_bottom(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                page,
            ),
            Screen::Budgets => scroll_to_bottom(
                &mut app.budget_index,
                &mut app.budget_scroll,
                app.budgets.len(),
                page,
            ),
            _ => {}
        },
        KeyCode::Char('r') => run_command("reload", app, api),
        KeyCode::Char('D') if app.screen == Screen::Transactions => {
            run_command("delete-txn", app, api);
        }
        KeyCode::Enter if app.screen == Screen::Budgets => app.edit_budget(app.budget_index),
        KeyCode::Esc => {
            app.status_message.clear();
            app.alert = None;
        }
        _ => {}
    }
}

fn handle_form_input(key: KeyEvent, app: &mut App, api: &dyn FinanceApi) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if let Some(form) = app.active_form() {
                form.move_down();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if let Some(form) = app.active_form() {
                form.move_up();
            }
        }
        KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
            app.adjust_field(true);
        }
        KeyCode::Char('h') | KeyCode::Char('-') | KeyCode::Left => app.adjust_field(false),
        KeyCode::Char('c') => app.change_category(),
        KeyCode::Enter => {
            let Some(field) = app.active_form().map(|form| form.selected_field()) else {
                return;
            };
            match field {
                FormField::Submit => submit_form(app, api),
                FormField::Type | FormField::Category => app.adjust_field(true),
                _ => app.begin_edit(),
            }
        }
        KeyCode::Esc => switch_screen(app, Screen::Dashboard),
        _ => {}
    }
}

fn submit_form(app: &mut App, api: &dyn FinanceApi) {
    match app.screen {
        Screen::NewTransaction => app.submit_transaction(api),
        Screen::SetBudget => app.submit_budget(api, chrono::Local::now().date_naive()),
        _ => {}
    }
}

fn handle_command_input(key: KeyEvent, app: &mut App, api: &dyn FinanceApi) {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            run_command(&input, app, api);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_editing_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => {
            app.cancel_edit();
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, api: &dyn FinanceApi) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm(api),
        // Any other key = cancel
        _ => app.cancel_confirm(),
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn run_command(input: &str, app: &mut App, api: &dyn FinanceApi) {
    if let Err(e) = commands::handle_command(input, app, api) {
        error!(command = input, error = %e, "command failed");
        app.set_status(format!("Error: {e}"));
    }
}

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    app.status_message.clear();
}

fn cycle_screen(app: &mut App, forward: bool) {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
    let next = if forward {
        (idx + 1) % screens.len()
    } else if idx == 0 {
        screens.len() - 1
    } else {
        idx - 1
    };
    switch_screen(app, screens[next]);
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
