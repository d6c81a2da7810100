//! Filter state: the in-progress edits and the immutable snapshot that
//! visualizations observe once the edits are applied.

use crate::catalog::{self, Area, Floor};
use crate::domain::DayType;
use serde::Serialize;

pub const ALL_AREAS: &str = "all-areas";

pub const DEFAULT_DATE_START: &str = "2024-01-01";
pub const DEFAULT_DATE_END: &str = "2024-01-31";
pub const DEFAULT_TIME_START: &str = "09:00";
pub const DEFAULT_TIME_END: &str = "18:00";
pub const DEFAULT_STAY_MIN: &str = "5";
pub const DEFAULT_STAY_MAX: &str = "120";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StayDuration {
    pub min: String,
    pub max: String,
}

/// A complete filter selection. Free-form fields are kept as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSnapshot {
    pub building_id: String,
    pub floor_id: String,
    pub area_id: String,
    /// Ordered and duplicate free. Empty means every identifier.
    pub selected_identifiers: Vec<String>,
    pub date_range: DateRange,
    pub day_type: DayType,
    pub time_range: TimeRange,
    pub stay_duration: StayDuration,
}

impl Default for FilterSnapshot {
    fn default() -> Self {
        let building = catalog::buildings().first();
        let building_id = building.map_or_else(String::new, |b| b.id.to_string());
        let floor_id = building
            .and_then(|b| b.floors.first())
            .map_or_else(String::new, |f| f.id.to_string());

        Self {
            building_id,
            floor_id,
            area_id: ALL_AREAS.to_string(),
            selected_identifiers: Vec::new(),
            date_range: DateRange {
                start: DEFAULT_DATE_START.to_string(),
                end: DEFAULT_DATE_END.to_string(),
            },
            day_type: DayType::All,
            time_range: TimeRange {
                start: DEFAULT_TIME_START.to_string(),
                end: DEFAULT_TIME_END.to_string(),
            },
            stay_duration: StayDuration {
                min: DEFAULT_STAY_MIN.to_string(),
                max: DEFAULT_STAY_MAX.to_string(),
            },
        }
    }
}

impl FilterSnapshot {
    pub fn selection_count(&self) -> usize {
        self.selected_identifiers.len()
    }

    pub fn is_all_identifiers(&self) -> bool {
        self.selected_identifiers.is_empty()
    }
}

/// Holds the filter being edited. Visualizations never see it directly; they
/// receive the value returned by [`FilterEditor::apply`].
#[derive(Debug, Clone, Default)]
pub struct FilterEditor {
    edits: FilterSnapshot,
}

impl FilterEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn current_edits(&self) -> &FilterSnapshot {
        &self.edits
    }

    /// Selects a building and resets floor, area and identifiers. Unknown
    /// buildings leave the floor empty rather than pointing at another
    /// building's floor.
    pub fn set_building(&mut self, building_id: &str) {
        self.edits.building_id = building_id.to_string();
        self.edits.floor_id = catalog::floors_for(building_id)
            .first()
            .map_or_else(String::new, |floor| floor.id.to_string());
        self.clear_floor_dependents();
    }

    pub fn set_floor(&mut self, floor_id: &str) {
        self.edits.floor_id = floor_id.to_string();
        self.clear_floor_dependents();
    }

    pub fn set_area(&mut self, area_id: &str) {
        self.edits.area_id = area_id.to_string();
    }

    /// Adds the identifier if absent, removes it if present.
    pub fn toggle_identifier(&mut self, identifier: &str) {
        if self.is_selected(identifier) {
            self.remove_identifier(identifier);
        } else {
            self.edits.selected_identifiers.push(identifier.to_string());
        }
    }

    pub fn remove_identifier(&mut self, identifier: &str) {
        self.edits
            .selected_identifiers
            .retain(|selected| selected != identifier);
    }

    pub fn is_selected(&self, identifier: &str) -> bool {
        self.edits
            .selected_identifiers
            .iter()
            .any(|selected| selected == identifier)
    }

    pub fn set_date_range(&mut self, start: &str, end: &str) {
        self.edits.date_range = DateRange {
            start: start.to_string(),
            end: end.to_string(),
        };
    }

    pub fn set_date_start(&mut self, start: &str) {
        self.edits.date_range.start = start.to_string();
    }

    pub fn set_date_end(&mut self, end: &str) {
        self.edits.date_range.end = end.to_string();
    }

    pub fn set_day_type(&mut self, day_type: DayType) {
        self.edits.day_type = day_type;
    }

    pub fn set_time_range(&mut self, start: &str, end: &str) {
        self.edits.time_range = TimeRange {
            start: start.to_string(),
            end: end.to_string(),
        };
    }

    pub fn set_time_start(&mut self, start: &str) {
        self.edits.time_range.start = start.to_string();
    }

    pub fn set_time_end(&mut self, end: &str) {
        self.edits.time_range.end = end.to_string();
    }

    pub fn set_stay_duration(&mut self, min: &str, max: &str) {
        self.edits.stay_duration = StayDuration {
            min: min.to_string(),
            max: max.to_string(),
        };
    }

    pub fn set_stay_min(&mut self, min: &str) {
        self.edits.stay_duration.min = min.to_string();
    }

    pub fn set_stay_max(&mut self, max: &str) {
        self.edits.stay_duration.max = max.to_string();
    }

    /// Copies the current edits into an independent snapshot.
    pub fn apply(&self) -> FilterSnapshot {
        self.edits.clone()
    }

    pub fn reset(&mut self) {
        self.edits = FilterSnapshot::default();
    }

    pub fn available_floors(&self) -> &'static [Floor] {
        catalog::floors_for(&self.edits.building_id)
    }

    pub fn available_areas(&self) -> &'static [Area] {
        catalog::areas_for(&self.edits.building_id, &self.edits.floor_id)
    }

    pub fn available_identifiers(&self) -> Vec<&'static str> {
        catalog::identifiers_for(&self.edits.building_id, &self.edits.floor_id)
    }

    /// Steps the building selection through the catalog, wrapping.
    pub fn cycle_building(&mut self, forward: bool) {
        let ids = catalog::buildings().iter().map(|b| b.id).collect::<Vec<_>>();
        if let Some(next) = cycle(&ids, &self.edits.building_id, forward) {
            self.set_building(next);
        }
    }

    pub fn cycle_floor(&mut self, forward: bool) {
        let ids = self.available_floors().iter().map(|f| f.id).collect::<Vec<_>>();
        if let Some(next) = cycle(&ids, &self.edits.floor_id, forward) {
            self.set_floor(next);
        }
    }

    /// Steps through `all-areas` followed by the floor's areas.
    pub fn cycle_area(&mut self, forward: bool) {
        let mut ids = vec![ALL_AREAS];
        ids.extend(self.available_areas().iter().map(|a| a.id));
        if let Some(next) = cycle(&ids, &self.edits.area_id, forward) {
            self.set_area(next);
        }
    }

    fn clear_floor_dependents(&mut self) {
        self.edits.area_id = ALL_AREAS.to_string();
        self.edits.selected_identifiers.clear();
    }
}

fn cycle<'a>(options: &[&'a str], current: &str, forward: bool) -> Option<&'a str> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match options.iter().position(|option| *option == current) {
        Some(index) if forward => (index + 1) % len,
        Some(index) => (index + len - 1) % len,
        None => 0,
    };
    Some(options[next])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let editor = FilterEditor::new();
        let edits = editor.current_edits();
        assert_eq!(edits.building_id, "building-a");
        assert_eq!(edits.floor_id, "floor-1");
        assert_eq!(edits.area_id, ALL_AREAS);
        assert!(edits.selected_identifiers.is_empty());
        assert_eq!(edits.date_range.start, "2024-01-01");
        assert_eq!(edits.date_range.end, "2024-01-31");
        assert_eq!(edits.day_type, DayType::All);
        assert_eq!(edits.time_range.start, "09:00");
        assert_eq!(edits.time_range.end, "18:00");
        assert_eq!(edits.stay_duration.min, "5");
        assert_eq!(edits.stay_duration.max, "120");
    }

    #[test]
    fn selecting_any_building_cascades_to_its_first_floor() {
        for building in catalog::buildings() {
            let mut editor = FilterEditor::new();
            editor.set_floor("floor-3");
            editor.set_area("area-dev");
            editor.toggle_identifier("GUID-A3-001");

            editor.set_building(building.id);

            let edits = editor.current_edits();
            assert_eq!(edits.floor_id, building.floors[0].id);
            assert_eq!(edits.area_id, ALL_AREAS);
            assert!(edits.selected_identifiers.is_empty());
        }
    }

    #[test]
    fn unknown_building_leaves_no_dangling_floor() {
        let mut editor = FilterEditor::new();
        editor.set_building("building-z");
        let edits = editor.current_edits();
        assert_eq!(edits.floor_id, "");
        assert!(editor.available_floors().is_empty());
        assert!(editor.available_areas().is_empty());
        assert!(editor.available_identifiers().is_empty());
    }

    #[test]
    fn selecting_a_floor_resets_area_and_identifiers() {
        let mut editor = FilterEditor::new();
        editor.set_building("building-b");
        for floor in catalog::floors_for("building-b") {
            editor.set_area("area-cafe");
            editor.toggle_identifier("GUID-B1-001");
            editor.toggle_identifier("GUID-B1-002");

            editor.set_floor(floor.id);

            let edits = editor.current_edits();
            assert_eq!(edits.building_id, "building-b");
            assert_eq!(edits.floor_id, floor.id);
            assert_eq!(edits.area_id, ALL_AREAS);
            assert!(edits.selected_identifiers.is_empty());
        }
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut editor = FilterEditor::new();
        editor.toggle_identifier("GUID-A1-001");
        let before = editor.current_edits().selected_identifiers.clone();

        editor.toggle_identifier("GUID-A1-003");
        editor.toggle_identifier("GUID-A1-003");

        assert_eq!(editor.current_edits().selected_identifiers, before);
    }

    #[test]
    fn toggle_keeps_selection_order_and_uniqueness() {
        let mut editor = FilterEditor::new();
        editor.toggle_identifier("GUID-A1-002");
        editor.toggle_identifier("GUID-A1-001");
        editor.toggle_identifier("GUID-A1-004");
        editor.remove_identifier("GUID-A1-001");
        editor.remove_identifier("GUID-A1-001");

        assert_eq!(
            editor.current_edits().selected_identifiers,
            vec!["GUID-A1-002".to_string(), "GUID-A1-004".to_string()]
        );
    }

    #[test]
    fn applied_snapshot_is_independent_of_later_edits() {
        let mut editor = FilterEditor::new();
        editor.toggle_identifier("GUID-A1-001");
        let snapshot = editor.apply();

        editor.set_building("building-c");
        editor.set_date_range("2025-02-01", "2025-02-03");
        editor.set_day_type(DayType::Holiday);
        editor.set_stay_duration("1", "2");

        assert_eq!(snapshot.building_id, "building-a");
        assert_eq!(snapshot.selected_identifiers, vec!["GUID-A1-001".to_string()]);
        assert_eq!(snapshot.date_range.start, DEFAULT_DATE_START);
        assert_eq!(snapshot.day_type, DayType::All);
        assert_eq!(snapshot.stay_duration.max, DEFAULT_STAY_MAX);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut editor = FilterEditor::new();
        editor.set_building("building-b");
        editor.set_time_range("00:00", "23:59");
        editor.set_stay_min("abc");
        editor.reset();
        assert_eq!(editor.current_edits(), &FilterSnapshot::default());
    }

    #[test]
    fn cycling_walks_catalog_options_with_wraparound() {
        let mut editor = FilterEditor::new();
        editor.cycle_building(false);
        assert_eq!(editor.current_edits().building_id, "building-c");
        editor.cycle_building(true);
        assert_eq!(editor.current_edits().building_id, "building-a");

        editor.cycle_floor(true);
        assert_eq!(editor.current_edits().floor_id, "floor-2");

        editor.cycle_area(true);
        assert_eq!(editor.current_edits().area_id, "area-office");
        editor.cycle_area(false);
        assert_eq!(editor.current_edits().area_id, ALL_AREAS);
    }
}
