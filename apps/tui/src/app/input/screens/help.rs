use crate::app::state::{App, Focus};
use crossterm::event::KeyCode;

pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::F(1) | KeyCode::Char('?')) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

/// Space freezes the pulse and beacon animations while the mode list has
/// focus. The filter panel keeps Space for its own fields.
pub fn handle_animation_toggle(app: &mut App, key: KeyCode) -> bool {
    if key != KeyCode::Char(' ') || app.focus == Focus::Filters {
        return false;
    }

    app.toggle_animation_pause();
    true
}
