use crate::app::state::{App, Focus};
use crossterm::event::KeyCode;

mod filters;
mod help;
mod modes;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    // Typing into a filter field swallows every key until Enter or Esc
    if app.editing {
        filters::handle_text_input(app, key);
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    if help::handle_animation_toggle(app, key) {
        return;
    }

    if handle_global_keys(app, key) {
        return;
    }

    match app.focus {
        Focus::Modes => modes::handle_modes_input(app, key),
        Focus::Filters => filters::handle_filters_input(app, key),
    }
}

fn handle_global_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Tab | KeyCode::BackTab => app.focus = app.focus.other(),
        KeyCode::Char('a') => app.apply_filters(),
        KeyCode::Char('R') => app.reset_filters(),
        KeyCode::Char('e') => app.request_export(),
        KeyCode::Char('p') => app.toggle_playback(),
        KeyCode::Char('x') => app.reset_playback(),
        KeyCode::Char('r') => {
            app.regenerate();
            app.status_message = "Data regenerated".to_string();
        }
        KeyCode::Char('q') => app.teardown(),
        _ => return false,
    }
    true
}
