use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;

use crate::tui_app::{App, InputMode, View};

/// Poll for and handle events. Returns true if an event was processed.
pub fn handle_events(app: &mut App) -> std::io::Result<bool> {
    if event::poll(Duration::from_millis(100))?
        && let Event::Key(key) = event::read()?
    {
        // Only handle Press events (ignore Release on some platforms)
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }
        match app.input_mode {
            InputMode::Normal => handle_normal_mode(app, key),
            InputMode::ProviderPopup => handle_provider_popup_mode(app, key),
        }
        return Ok(true);
    }
    Ok(false)
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.back(),

        // Sub-views only support going back
        _ if app.view != View::Table => {}

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::Home | KeyCode::Char('g') => app.home(),
        KeyCode::End | KeyCode::Char('G') => app.end(),

        // Sort column
        KeyCode::Char('s') => app.cycle_sort_column(),

        // Filters
        KeyCode::Char('p') => app.open_provider_popup(),
        KeyCode::Char('L') => app.cycle_license(),
        KeyCode::Tab => app.toggle_range_focus(),
        KeyCode::Char('<') | KeyCode::Char(',') => app.nudge_low(-1),
        KeyCode::Char('>') | KeyCode::Char('.') => app.nudge_low(1),
        KeyCode::Char('-') => app.nudge_high(-1),
        KeyCode::Char('+') | KeyCode::Char('=') => app.nudge_high(1),
        KeyCode::Char('x') => app.reset_filters(),

        // Refetch the catalog
        KeyCode::Char('r') => app.reload(),

        // Detail and comparison
        KeyCode::Enter => app.open_detail(),
        KeyCode::Char('c') => app.mark_for_compare(),

        _ => {}
    }
}

fn handle_provider_popup_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('q') => app.close_provider_popup(),

        KeyCode::Up | KeyCode::Char('k') => app.provider_popup_up(),
        KeyCode::Down | KeyCode::Char('j') => app.provider_popup_down(),

        KeyCode::Char(' ') | KeyCode::Enter => app.provider_popup_toggle(),

        KeyCode::Char('a') => app.provider_popup_clear(),

        _ => {}
    }
}
