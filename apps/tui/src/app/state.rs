use chrono::Utc;
use indoor_analytics::animation::Pulse;
use indoor_analytics::config::AppConfig;
use indoor_analytics::dispatch::{self, Frame, ModeSelection, Visual};
use indoor_analytics::domain::ModeFamily;
use indoor_analytics::error::Result;
use indoor_analytics::export::{build_export, write_export};
use indoor_analytics::filter::{FilterEditor, FilterSnapshot};
use indoor_analytics::playback::Playback;
use indoor_analytics::registry::VisualizationMode;
use indoor_analytics::stats::StatView;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Modes,
    Filters,
}

impl Focus {
    pub const fn other(self) -> Self {
        match self {
            Self::Modes => Self::Filters,
            Self::Filters => Self::Modes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Building,
    Floor,
    Area,
    Identifiers,
    DateStart,
    DateEnd,
    DayType,
    TimeStart,
    TimeEnd,
    StayMin,
    StayMax,
}

impl FilterField {
    pub const ALL: [Self; 11] = [
        Self::Building,
        Self::Floor,
        Self::Area,
        Self::Identifiers,
        Self::DateStart,
        Self::DateEnd,
        Self::DayType,
        Self::TimeStart,
        Self::TimeEnd,
        Self::StayMin,
        Self::StayMax,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Building => "Building",
            Self::Floor => "Floor",
            Self::Area => "Area",
            Self::Identifiers => "GUIDs",
            Self::DateStart => "Date from",
            Self::DateEnd => "Date to",
            Self::DayType => "Day type",
            Self::TimeStart => "Time from",
            Self::TimeEnd => "Time to",
            Self::StayMin => "Stay min",
            Self::StayMax => "Stay max",
        }
    }

    /// Fields edited by typing rather than by cycling options.
    pub const fn is_text(self) -> bool {
        matches!(
            self,
            Self::DateStart
                | Self::DateEnd
                | Self::TimeStart
                | Self::TimeEnd
                | Self::StayMin
                | Self::StayMax
        )
    }

    pub fn value(self, edits: &FilterSnapshot) -> String {
        match self {
            Self::Building => edits.building_id.clone(),
            Self::Floor => edits.floor_id.clone(),
            Self::Area => edits.area_id.clone(),
            Self::Identifiers => edits.selected_identifiers.len().to_string(),
            Self::DateStart => edits.date_range.start.clone(),
            Self::DateEnd => edits.date_range.end.clone(),
            Self::DayType => edits.day_type.label().to_string(),
            Self::TimeStart => edits.time_range.start.clone(),
            Self::TimeEnd => edits.time_range.end.clone(),
            Self::StayMin => edits.stay_duration.min.clone(),
            Self::StayMax => edits.stay_duration.max.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub total_records: u32,
}

pub struct App {
    pub running: bool,
    pub config: AppConfig,
    pub editor: FilterEditor,
    pub applied: FilterSnapshot,
    pub selection: ModeSelection,
    pub playback: Playback,
    pub stat_view: Option<StatView>,
    pub focus: Focus,
    pub field_index: usize,
    pub identifier_cursor: usize,
    pub editing: bool,
    pub edit_buffer: String,
    pub export_requested: bool,
    pub status_message: String,
    pub pulse: Pulse,
    pub last_frame: Instant,
    pub show_help: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let editor = FilterEditor::new();
        let applied = editor.apply();
        Self {
            running: true,
            config,
            editor,
            applied,
            selection: ModeSelection::default(),
            playback: Playback::new(),
            stat_view: None,
            focus: Focus::Modes,
            field_index: 0,
            identifier_cursor: 0,
            editing: false,
            edit_buffer: String::new(),
            export_requested: false,
            status_message: "Press ? for help".to_string(),
            pulse: Pulse::default(),
            last_frame: Instant::now(),
            show_help: false,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.pulse.advance(now.duration_since(self.last_frame));
        self.last_frame = now;
        self.playback.poll(now);
    }

    pub fn toggle_animation_pause(&mut self) {
        self.pulse.toggle_pause();
        self.status_message = if self.pulse.is_paused() {
            "Animations paused".to_string()
        } else {
            "Animations resumed".to_string()
        };
    }

    pub const fn mode(&self) -> VisualizationMode {
        self.selection.mode()
    }

    pub const fn family(&self) -> ModeFamily {
        self.selection.family()
    }

    pub const fn frame(&self) -> Frame {
        Frame {
            progress: self.playback.progress(),
            pulse_phase: self.pulse.ring_phase(),
        }
    }

    pub const fn filter_field(&self) -> FilterField {
        FilterField::ALL[self.field_index % FilterField::ALL.len()]
    }

    /// The visualization for the applied filter. Maps are rebuilt from the
    /// current frame; charts come from the last regeneration.
    pub fn visual(&self) -> Visual {
        match self.family() {
            ModeFamily::Spatial => dispatch::render(
                self.mode(),
                &self.applied,
                self.frame(),
                &mut rand::thread_rng(),
            ),
            ModeFamily::Statistical => self
                .stat_view
                .clone()
                .map_or(Visual::Empty, Visual::Statistical),
        }
    }

    pub fn record_count(&self) -> usize {
        match self.visual() {
            Visual::Spatial(view) => view.points.len(),
            Visual::Statistical(view) => view.record_count(),
            Visual::Empty => 0,
        }
    }

    /// Draws a fresh chart dataset for the applied filter.
    pub fn regenerate(&mut self) {
        let visual = dispatch::render(
            self.mode(),
            &self.applied,
            self.frame(),
            &mut rand::thread_rng(),
        );
        self.stat_view = match visual {
            Visual::Statistical(view) => {
                tracing::debug!(
                    mode = %view.mode,
                    records = view.record_count(),
                    "chart regenerated"
                );
                Some(view)
            }
            Visual::Spatial(_) | Visual::Empty => None,
        };
    }

    pub fn apply_filters(&mut self) {
        self.applied = self.editor.apply();
        self.regenerate();
        let count = self.applied.selection_count();
        self.status_message = if count == 0 {
            "Filters applied: all GUIDs".to_string()
        } else {
            format!("Filters applied: {count} GUIDs selected")
        };
        tracing::info!(
            building = %self.applied.building_id,
            floor = %self.applied.floor_id,
            area = %self.applied.area_id,
            selected = count,
            "filters applied"
        );
    }

    /// Resets the edits only; the applied filter changes on the next apply.
    pub fn reset_filters(&mut self) {
        self.editor.reset();
        self.identifier_cursor = 0;
        self.editing = false;
        self.edit_buffer.clear();
        self.status_message = "Filters reset to defaults (press a to apply)".to_string();
    }

    pub fn select_mode(&mut self, mode: VisualizationMode) {
        let mut selection = self.selection;
        selection.select(mode);
        self.change_selection(selection);
    }

    pub fn next_mode(&mut self) {
        let mut selection = self.selection;
        selection.next();
        self.change_selection(selection);
    }

    pub fn previous_mode(&mut self) {
        let mut selection = self.selection;
        selection.previous();
        self.change_selection(selection);
    }

    pub fn toggle_family(&mut self) {
        let mut selection = self.selection;
        selection.toggle_family();
        self.change_selection(selection);
    }

    fn change_selection(&mut self, selection: ModeSelection) {
        if selection == self.selection {
            return;
        }
        let previous = self.selection;
        self.selection = selection;

        if previous.family() == ModeFamily::Spatial && selection.family() != ModeFamily::Spatial {
            self.playback.reset();
        } else if previous.mode() == VisualizationMode::SteppedPlayback {
            self.playback.stop();
        }

        self.regenerate();
        self.status_message = format!("Mode: {}", selection.mode().descriptor().label);
        tracing::debug!(mode = %selection.mode(), "mode selected");
    }

    pub fn toggle_playback(&mut self) {
        if self.mode() != VisualizationMode::SteppedPlayback {
            self.status_message = "Playback is only available in the animation map".to_string();
            return;
        }
        if self.playback.is_finished() {
            self.status_message = "Playback finished, press x to rewind".to_string();
            return;
        }
        self.playback.toggle(Instant::now());
        self.status_message = if self.playback.is_running() {
            "Playback running".to_string()
        } else {
            format!("Playback paused at {}%", self.playback.progress())
        };
    }

    pub fn reset_playback(&mut self) {
        self.playback.reset();
        if self.mode() == VisualizationMode::SteppedPlayback {
            self.status_message = "Playback rewound".to_string();
        }
    }

    pub fn request_export(&mut self) {
        self.export_requested = true;
    }

    /// Writes the export document for the applied filter and current mode.
    pub fn export(&mut self) -> Result<ExportReceipt> {
        let now = Utc::now();
        let document = build_export(&self.applied, self.mode(), now, &mut rand::thread_rng());
        let path = write_export(&self.config.export_dir, &document, now)?;
        Ok(ExportReceipt {
            path,
            total_records: document.total_records,
        })
    }

    /// Releases the playback timer before exit.
    pub fn teardown(&mut self) {
        self.playback.reset();
        self.running = false;
    }

    pub fn begin_edit(&mut self) {
        let field = self.filter_field();
        if field.is_text() {
            self.edit_buffer = field.value(self.editor.current_edits());
            self.editing = true;
        }
    }

    pub fn commit_edit(&mut self) {
        if !self.editing {
            return;
        }
        let value = self.edit_buffer.trim().to_string();
        match self.filter_field() {
            FilterField::DateStart => self.editor.set_date_start(&value),
            FilterField::DateEnd => self.editor.set_date_end(&value),
            FilterField::TimeStart => self.editor.set_time_start(&value),
            FilterField::TimeEnd => self.editor.set_time_end(&value),
            FilterField::StayMin => self.editor.set_stay_min(&value),
            FilterField::StayMax => self.editor.set_stay_max(&value),
            FilterField::Building
            | FilterField::Floor
            | FilterField::Area
            | FilterField::Identifiers
            | FilterField::DayType => {}
        }
        self.cancel_edit();
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.edit_buffer.clear();
    }

    /// Steps an option field (building, floor, area, day type).
    pub fn cycle_field(&mut self, forward: bool) {
        match self.filter_field() {
            FilterField::Building => {
                self.editor.cycle_building(forward);
                self.identifier_cursor = 0;
            }
            FilterField::Floor => {
                self.editor.cycle_floor(forward);
                self.identifier_cursor = 0;
            }
            FilterField::Area => self.editor.cycle_area(forward),
            FilterField::DayType => {
                let current = self.editor.current_edits().day_type;
                let next = if forward {
                    current.cycle_next()
                } else {
                    current.cycle_prev()
                };
                self.editor.set_day_type(next);
            }
            FilterField::Identifiers => {
                let len = self.editor.available_identifiers().len();
                self.identifier_cursor = if forward {
                    crate::app::input::wrap_increment(self.identifier_cursor, len)
                } else {
                    crate::app::input::wrap_decrement(self.identifier_cursor, len)
                };
            }
            FilterField::DateStart
            | FilterField::DateEnd
            | FilterField::TimeStart
            | FilterField::TimeEnd
            | FilterField::StayMin
            | FilterField::StayMax => {}
        }
    }

    pub fn toggle_identifier_at_cursor(&mut self) {
        let identifiers = self.editor.available_identifiers();
        if let Some(identifier) = identifiers.get(self.identifier_cursor) {
            self.editor.toggle_identifier(identifier);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoor_analytics::stats::StatBody;

    fn app() -> App {
        let dir = std::env::temp_dir().join("indoor-analytics-app-tests");
        App::new(AppConfig {
            export_dir: dir.join("exports"),
            log_dir: dir.join("logs"),
            debug: false,
        })
    }

    #[test]
    fn starts_on_the_density_map_with_default_filters() {
        let app = app();
        assert_eq!(app.mode(), VisualizationMode::DensityField);
        assert_eq!(app.applied, FilterSnapshot::default());
        assert_eq!(app.record_count(), 100);
    }

    #[test]
    fn edits_are_invisible_until_applied() {
        let mut app = app();
        app.editor.toggle_identifier("GUID-A1-001");
        assert!(app.applied.selected_identifiers.is_empty());
        assert_eq!(app.record_count(), 100);

        app.apply_filters();
        assert_eq!(app.applied.selected_identifiers, ["GUID-A1-001"]);
        assert_eq!(app.record_count(), 10);
        assert_eq!(app.status_message, "Filters applied: 1 GUIDs selected");
    }

    #[test]
    fn switching_to_charts_generates_a_dataset() {
        let mut app = app();
        app.toggle_family();
        assert_eq!(app.mode(), VisualizationMode::GuidTimeline);
        let view = app.stat_view.as_ref().unwrap();
        assert!(matches!(view.body, StatBody::Timeline(ref rows) if rows.len() == 18));

        app.toggle_family();
        assert!(app.stat_view.is_none());
    }

    #[test]
    fn leaving_the_map_family_clears_the_playback_timer() {
        let mut app = app();
        app.select_mode(VisualizationMode::SteppedPlayback);
        app.toggle_playback();
        assert!(app.playback.is_running());

        app.toggle_family();
        assert!(!app.playback.is_running());
        assert_eq!(app.playback.progress(), 0);
    }

    #[test]
    fn leaving_playback_within_maps_pauses_it() {
        let mut app = app();
        app.select_mode(VisualizationMode::SteppedPlayback);
        app.toggle_playback();
        app.select_mode(VisualizationMode::PathTrace);
        assert!(app.playback.timer().is_none());
    }

    #[test]
    fn playback_key_outside_animation_only_reports() {
        let mut app = app();
        app.toggle_playback();
        assert!(!app.playback.is_running());
        assert!(app.status_message.contains("animation"));
    }

    #[test]
    fn text_edits_commit_through_the_editor() {
        let mut app = app();
        app.field_index = 4;
        app.begin_edit();
        assert_eq!(app.edit_buffer, "2024-01-01");
        app.edit_buffer = "2024-02-01".to_string();
        app.commit_edit();
        assert!(!app.editing);
        assert_eq!(app.editor.current_edits().date_range.start, "2024-02-01");
    }

    #[test]
    fn cycling_the_building_resets_the_identifier_cursor() {
        let mut app = app();
        app.identifier_cursor = 2;
        app.cycle_field(true);
        assert_eq!(app.editor.current_edits().building_id, "building-b");
        assert_eq!(app.identifier_cursor, 0);
    }

    #[test]
    fn identifier_cursor_toggles_the_highlighted_guid() {
        let mut app = app();
        app.field_index = 3;
        app.cycle_field(true);
        app.toggle_identifier_at_cursor();
        assert_eq!(
            app.editor.current_edits().selected_identifiers,
            ["GUID-A1-002"]
        );
    }

    #[test]
    fn export_writes_into_the_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(AppConfig {
            export_dir: dir.path().join("out"),
            log_dir: dir.path().join("logs"),
            debug: false,
        });
        let receipt = app.export().unwrap();
        assert!(receipt.path.starts_with(dir.path().join("out")));
        assert!((1000..11000).contains(&receipt.total_records));
    }

    #[test]
    fn teardown_stops_everything() {
        let mut app = app();
        app.select_mode(VisualizationMode::SteppedPlayback);
        app.toggle_playback();
        app.teardown();
        assert!(!app.running);
        assert!(app.playback.timer().is_none());
    }
}
