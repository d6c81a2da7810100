use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, FilterField};
use crossterm::event::KeyCode;

pub fn handle_filters_input(app: &mut App, key: KeyCode) {
    let fields = FilterField::ALL.len();
    match key {
        KeyCode::Up => app.field_index = wrap_decrement(app.field_index, fields),
        KeyCode::Down => app.field_index = wrap_increment(app.field_index, fields),
        KeyCode::Left => app.cycle_field(false),
        KeyCode::Right => app.cycle_field(true),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.filter_field() == FilterField::Identifiers {
                app.toggle_identifier_at_cursor();
            } else if app.filter_field().is_text() {
                app.begin_edit();
            } else {
                app.cycle_field(true);
            }
        }
        KeyCode::Esc => app.focus = app.focus.other(),
        _ => {}
    }
}

pub fn handle_text_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => app.edit_buffer.push(c),
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        _ => {}
    }
}
