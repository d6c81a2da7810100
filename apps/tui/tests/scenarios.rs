use indoor_analytics::dispatch::{self, Frame, ModeSelection, Visual};
use indoor_analytics::export::build_export;
use indoor_analytics::filter::{FilterEditor, ALL_AREAS};
use indoor_analytics::registry::{self, VisualizationMode};
use indoor_analytics::spatial::{self, GradientStop, PlanRect, Rgba, Surface};
use indoor_analytics::stats::StatBody;
use indoor_analytics::ModeFamily;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Counts what a renderer asked for.
#[derive(Default)]
struct CountingSurface {
    rects: usize,
    fills: usize,
    labels: Vec<String>,
    discs: usize,
    gradients: usize,
    polylines: Vec<usize>,
}

impl Surface for CountingSurface {
    fn stroke_rect(&mut self, _rect: PlanRect, _color: Rgba) {
        self.rects += 1;
    }

    fn fill_rect(&mut self, _rect: PlanRect, _color: Rgba) {
        self.fills += 1;
    }

    fn text(&mut self, _x: f64, _y: f64, text: &str, _color: Rgba) {
        self.labels.push(text.to_string());
    }

    fn fill_disc(&mut self, _x: f64, _y: f64, _radius: f64, _color: Rgba) {
        self.discs += 1;
    }

    fn stroke_circle(&mut self, _x: f64, _y: f64, _radius: f64, _color: Rgba) {}

    fn radial_gradient(&mut self, _x: f64, _y: f64, _radius: f64, _stops: &[GradientStop]) {
        self.gradients += 1;
    }

    fn polyline(&mut self, points: &[(f64, f64)], _color: Rgba) {
        self.polylines.push(points.len());
    }
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(2024)
}

#[test]
fn default_density_map_draws_plan_and_hundred_points() {
    let snapshot = FilterEditor::new().apply();
    let Visual::Spatial(view) = dispatch::render(
        VisualizationMode::DensityField,
        &snapshot,
        Frame::default(),
        &mut rng(),
    ) else {
        panic!("density mode must render a map");
    };
    assert_eq!(view.points.len(), 100);

    let mut surface = CountingSurface::default();
    assert!(spatial::draw(Some(&mut surface), &view));
    assert_eq!(surface.rects, 6);
    assert_eq!(surface.fills, 5);
    assert_eq!(surface.gradients, 100);
    for room in ["Entrance", "Office", "Meeting Room", "Cafe", "Corridor"] {
        assert!(surface.labels.iter().any(|label| label == room), "missing {room}");
    }
}

#[test]
fn three_guids_on_the_ground_floor_give_two_clusters() {
    let mut editor = FilterEditor::new();
    editor.set_building("building-a");
    editor.set_floor("floor-1");
    for id in ["GUID-A1-001", "GUID-A1-002", "GUID-A1-003"] {
        editor.toggle_identifier(id);
    }
    let snapshot = editor.apply();

    let Visual::Spatial(view) =
        dispatch::render_tag("cluster", &snapshot, Frame::default(), &mut rng())
    else {
        panic!("cluster tag must render a map");
    };
    assert_eq!(view.points.len(), 30);
    assert_eq!(view.cluster_ids().into_iter().collect::<Vec<_>>(), [0, 1]);
    assert_eq!(view.points[3].owner, "GUID-A1-001");

    let mut surface = CountingSurface::default();
    spatial::draw(Some(&mut surface), &view);
    assert_eq!(surface.discs, 30);
}

#[test]
fn toggling_a_guid_twice_restores_the_selection() {
    let mut editor = FilterEditor::new();
    editor.toggle_identifier("GUID-A1-002");
    let before = editor.current_edits().selected_identifiers.clone();
    editor.toggle_identifier("GUID-A1-004");
    editor.toggle_identifier("GUID-A1-004");
    assert_eq!(editor.current_edits().selected_identifiers, before);
}

#[test]
fn applied_snapshot_ignores_later_edits() {
    let mut editor = FilterEditor::new();
    editor.toggle_identifier("GUID-A1-001");
    let applied = editor.apply();

    editor.set_building("building-c");
    editor.set_stay_duration("0", "10");

    assert_eq!(applied.building_id, "building-a");
    assert_eq!(applied.selected_identifiers, ["GUID-A1-001"]);
    assert_eq!(applied.stay_duration.max, "120");
    assert_eq!(editor.current_edits().floor_id, "floor-1");
    assert_eq!(editor.current_edits().area_id, ALL_AREAS);
    assert!(editor.current_edits().selected_identifiers.is_empty());
}

#[test]
fn switching_tabs_lands_on_the_first_mode_of_the_family() {
    let mut selection = ModeSelection::default();
    selection.select(VisualizationMode::PathTrace);
    selection.switch_family(ModeFamily::Statistical);
    assert_eq!(selection.mode(), registry::modes_in(ModeFamily::Statistical)[0].mode);

    let visual = dispatch::render(
        selection.mode(),
        &FilterEditor::new().apply(),
        Frame::default(),
        &mut rng(),
    );
    assert_eq!(visual.family(), Some(ModeFamily::Statistical));
}

#[test]
fn every_registered_mode_renders_in_its_family() {
    let snapshot = FilterEditor::new().apply();
    for mode in registry::all_modes() {
        let visual = dispatch::render(*mode, &snapshot, Frame::default(), &mut rng());
        assert_eq!(visual.family(), registry::family_of(*mode), "{mode}");
        if let Visual::Statistical(view) = visual {
            assert!(!matches!(view.body, StatBody::Placeholder(_)), "{mode}");
        }
    }
}

#[test]
fn export_reflects_the_applied_filter() {
    let mut editor = FilterEditor::new();
    editor.set_building("building-b");
    editor.toggle_identifier("GUID-B1-002");
    let document = build_export(
        &editor.apply(),
        VisualizationMode::AnomalyDetection,
        chrono::Utc::now(),
        &mut rng(),
    );
    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(value["filters"]["building"], "building-b");
    assert_eq!(value["filters"]["floor"], "floor-1");
    assert_eq!(value["filters"]["selectedGuids"][0], "GUID-B1-002");
    assert_eq!(value["visualizationType"], "anomaly-detection");
}
