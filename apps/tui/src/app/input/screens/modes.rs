use crate::app::state::App;
use crossterm::event::KeyCode;
use indoor_analytics::domain::ModeFamily;

pub fn handle_modes_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => app.previous_mode(),
        KeyCode::Down => app.next_mode(),
        KeyCode::Left | KeyCode::Right => app.toggle_family(),
        KeyCode::Char('1') => switch_family(app, ModeFamily::Spatial),
        KeyCode::Char('2') => switch_family(app, ModeFamily::Statistical),
        _ => {}
    }
}

fn switch_family(app: &mut App, family: ModeFamily) {
    if app.family() != family {
        app.toggle_family();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoor_analytics::config::AppConfig;
    use indoor_analytics::registry::VisualizationMode;

    #[test]
    fn arrows_step_within_the_family() {
        let mut app = App::new(AppConfig::default());
        handle_modes_input(&mut app, KeyCode::Down);
        assert_eq!(app.mode(), VisualizationMode::ClusterColoring);
        handle_modes_input(&mut app, KeyCode::Up);
        handle_modes_input(&mut app, KeyCode::Up);
        assert_eq!(app.mode(), VisualizationMode::SteppedPlayback);
    }

    #[test]
    fn number_keys_pick_a_family_tab() {
        let mut app = App::new(AppConfig::default());
        handle_modes_input(&mut app, KeyCode::Char('2'));
        assert_eq!(app.mode(), VisualizationMode::GuidTimeline);
        handle_modes_input(&mut app, KeyCode::Char('2'));
        assert_eq!(app.mode(), VisualizationMode::GuidTimeline);
        handle_modes_input(&mut app, KeyCode::Char('1'));
        assert_eq!(app.mode(), VisualizationMode::DensityField);
    }
}
