//! Spatial maps: a deterministic point cloud drawn over a schematic floor plan.
//!
//! Drawing goes through [`Surface`], a small 2D API in a 600x400 plane with
//! the origin at the top-left corner. The terminal canvas is one
//! implementation; tests record the calls instead.

use crate::animation;
use crate::filter::FilterSnapshot;
use crate::registry::VisualizationMode;
use std::collections::BTreeSet;

pub const PLAN_WIDTH: f64 = 600.0;
pub const PLAN_HEIGHT: f64 = 400.0;
pub const MAX_POINTS: usize = 100;
pub const POINTS_PER_IDENTIFIER: usize = 10;
/// 2024-01-01T00:00:00Z
pub const EPOCH_MS: i64 = 1_704_067_200_000;
pub const HOUR_MS: i64 = 3_600_000;

const DENSITY_RADIUS: f64 = 30.0;
const CLUSTER_RADIUS: f64 = 8.0;
const ENDPOINT_RADIUS: f64 = 6.0;
const CURSOR_RADIUS: f64 = 8.0;
const POINT_AREAS: [&str; 4] = ["Entrance", "Office", "Meeting Room", "Cafe"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

pub const WALL: Rgba = Rgba::opaque(0x33, 0x33, 0x33);
pub const PARTITION: Rgba = Rgba::opaque(0x66, 0x66, 0x66);
pub const LABEL: Rgba = Rgba::opaque(0x33, 0x33, 0x33);
pub const WHITE: Rgba = Rgba::opaque(0xff, 0xff, 0xff);
pub const PATH: Rgba = Rgba::opaque(0x21, 0x96, 0xf3);
pub const START: Rgba = Rgba::opaque(0x4c, 0xaf, 0x50);
pub const END: Rgba = Rgba::opaque(0xf4, 0x43, 0x36);
pub const CURSOR: Rgba = Rgba::opaque(0xff, 0x98, 0x00);
pub const CLUSTER_PALETTE: [Rgba; 5] = [
    Rgba::opaque(0xff, 0x44, 0x44),
    Rgba::opaque(0x44, 0xff, 0x44),
    Rgba::opaque(0x44, 0x44, 0xff),
    Rgba::opaque(0xff, 0xff, 0x44),
    Rgba::opaque(0xff, 0x44, 0xff),
];
const DENSITY_CORE: Rgba = Rgba::opaque(0xff, 0x00, 0x00);
const DENSITY_EDGE: Rgba = Rgba::opaque(0xff, 0xff, 0x00);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlanRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle shrunk by one unit on every side.
    pub fn inset(self) -> Self {
        Self::new(self.x + 1.0, self.y + 1.0, self.width - 2.0, self.height - 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

pub trait Surface {
    fn stroke_rect(&mut self, rect: PlanRect, color: Rgba);
    fn fill_rect(&mut self, rect: PlanRect, color: Rgba);
    fn text(&mut self, x: f64, y: f64, text: &str, color: Rgba);
    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Rgba);
    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);
    fn radial_gradient(&mut self, x: f64, y: f64, radius: f64, stops: &[GradientStop]);
    fn polyline(&mut self, points: &[(f64, f64)], color: Rgba);
}

pub struct Room {
    pub name: &'static str,
    pub rect: PlanRect,
    pub fill: Rgba,
    pub label_at: (f64, f64),
}

pub const OUTER_WALL: PlanRect = PlanRect::new(50.0, 50.0, 500.0, 300.0);

pub static ROOMS: [Room; 5] = [
    Room {
        name: "Entrance",
        rect: PlanRect::new(50.0, 50.0, 100.0, 80.0),
        fill: Rgba::opaque(0xf0, 0xf0, 0xf0),
        label_at: (70.0, 95.0),
    },
    Room {
        name: "Office",
        rect: PlanRect::new(150.0, 50.0, 200.0, 150.0),
        fill: Rgba::opaque(0xf8, 0xf8, 0xf8),
        label_at: (230.0, 130.0),
    },
    Room {
        name: "Meeting Room",
        rect: PlanRect::new(350.0, 50.0, 100.0, 80.0),
        fill: Rgba::opaque(0xff, 0xf8, 0xe1),
        label_at: (380.0, 95.0),
    },
    Room {
        name: "Cafe",
        rect: PlanRect::new(450.0, 50.0, 100.0, 150.0),
        fill: Rgba::opaque(0xe8, 0xf5, 0xe8),
        label_at: (485.0, 130.0),
    },
    Room {
        name: "Corridor",
        rect: PlanRect::new(50.0, 130.0, 500.0, 70.0),
        fill: Rgba::opaque(0xf5, 0xf5, 0xf5),
        label_at: (290.0, 170.0),
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub intensity: f64,
    pub cluster: usize,
    pub timestamp_ms: i64,
    pub owner: String,
    pub area: &'static str,
}

pub fn point_count(selected: usize) -> usize {
    if selected == 0 {
        MAX_POINTS
    } else {
        (selected * POINTS_PER_IDENTIFIER).min(MAX_POINTS)
    }
}

/// Builds the point cloud. The layout depends only on the selected identifiers.
pub fn generate_points(snapshot: &FilterSnapshot) -> Vec<TrackPoint> {
    let selected = &snapshot.selected_identifiers;
    let count = point_count(selected.len());

    (0..count)
        .map(|i| {
            let f = i as f64;
            let owner = if selected.is_empty() {
                format!("user-{}", (i % 20) + 1)
            } else {
                selected[i % selected.len()].clone()
            };
            TrackPoint {
                id: format!("point-{i}"),
                x: 50.0 + ((f * 0.1).sin() + 1.0) * 250.0 + (f * 0.05).cos() * 100.0,
                y: 50.0 + ((f * 0.1).cos() + 1.0) * 150.0 + (f * 0.08).sin() * 75.0,
                intensity: 0.3 + (f * 0.2).sin() * 0.4 + 0.3,
                cluster: (i / 20) % CLUSTER_PALETTE.len(),
                timestamp_ms: EPOCH_MS + i as i64 * HOUR_MS,
                owner,
                area: POINT_AREAS[i % POINT_AREAS.len()],
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Density,
    Clusters,
    Path,
    Playback,
}

impl Overlay {
    pub const fn for_mode(mode: VisualizationMode) -> Option<Self> {
        match mode {
            VisualizationMode::DensityField => Some(Self::Density),
            VisualizationMode::ClusterColoring => Some(Self::Clusters),
            VisualizationMode::PathTrace => Some(Self::Path),
            VisualizationMode::SteppedPlayback => Some(Self::Playback),
            _ => None,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Density => "Heat map",
            Self::Clusters => "Cluster map",
            Self::Path => "Trajectory map",
            Self::Playback => "Animation map",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialView {
    pub overlay: Overlay,
    pub points: Vec<TrackPoint>,
    pub progress: u8,
    pub pulse_phase: f64,
}

impl SpatialView {
    /// `None` when `mode` has no map overlay.
    pub fn build(
        mode: VisualizationMode,
        snapshot: &FilterSnapshot,
        progress: u8,
        pulse_phase: f64,
    ) -> Option<Self> {
        let overlay = Overlay::for_mode(mode)?;
        Some(Self {
            overlay,
            points: generate_points(snapshot),
            progress,
            pulse_phase,
        })
    }

    pub fn cluster_ids(&self) -> BTreeSet<usize> {
        self.points.iter().map(|point| point.cluster).collect()
    }

    pub fn playback_index(&self) -> usize {
        usize::from(self.progress.min(100)) * self.points.len() / 100
    }

    /// Points ordered by timestamp, ties kept in generation order.
    pub fn chronological(&self) -> Vec<&TrackPoint> {
        let mut sorted = self.points.iter().collect::<Vec<_>>();
        sorted.sort_by_key(|point| point.timestamp_ms);
        sorted
    }
}

/// Draws the floor plan and the view's overlay. Without a surface nothing is
/// drawn and `false` is returned.
pub fn draw(surface: Option<&mut dyn Surface>, view: &SpatialView) -> bool {
    let Some(surface) = surface else {
        tracing::trace!("no drawing surface, skipping spatial draw");
        return false;
    };

    draw_floor_plan(surface);
    match view.overlay {
        Overlay::Density => draw_density(surface, view),
        Overlay::Clusters => draw_clusters(surface, view),
        Overlay::Path => draw_path(surface, view),
        Overlay::Playback => draw_playback(surface, view),
    }
    true
}

pub fn draw_floor_plan(surface: &mut dyn Surface) {
    surface.stroke_rect(OUTER_WALL, WALL);
    for room in &ROOMS {
        surface.stroke_rect(room.rect, PARTITION);
        surface.fill_rect(room.rect.inset(), room.fill);
        surface.text(room.label_at.0, room.label_at.1, room.name, LABEL);
    }
}

pub fn density_stops(intensity: f64) -> [GradientStop; 3] {
    [
        GradientStop {
            offset: 0.0,
            color: DENSITY_CORE.with_alpha(intensity * 0.8),
        },
        GradientStop {
            offset: 0.5,
            color: DENSITY_EDGE.with_alpha(intensity * 0.4),
        },
        GradientStop {
            offset: 1.0,
            color: DENSITY_EDGE.with_alpha(0.0),
        },
    ]
}

fn draw_density(surface: &mut dyn Surface, view: &SpatialView) {
    for point in &view.points {
        surface.radial_gradient(point.x, point.y, DENSITY_RADIUS, &density_stops(point.intensity));
    }
}

fn draw_clusters(surface: &mut dyn Surface, view: &SpatialView) {
    for point in &view.points {
        let color = CLUSTER_PALETTE[point.cluster % CLUSTER_PALETTE.len()];
        surface.fill_disc(point.x, point.y, CLUSTER_RADIUS, color);
        surface.text(point.x - 3.0, point.y + 3.0, &point.cluster.to_string(), WHITE);
    }
}

fn draw_path(surface: &mut dyn Surface, view: &SpatialView) {
    let sorted = view.chronological();
    let line = sorted.iter().map(|point| (point.x, point.y)).collect::<Vec<_>>();
    surface.polyline(&line, PATH);

    if let (Some(first), Some(last)) = (sorted.first(), sorted.last()) {
        surface.fill_disc(first.x, first.y, ENDPOINT_RADIUS, START);
        surface.fill_disc(last.x, last.y, ENDPOINT_RADIUS, END);
    }
}

fn draw_playback(surface: &mut dyn Surface, view: &SpatialView) {
    let sorted = view.chronological();
    let index = view.playback_index();
    let line = sorted
        .iter()
        .take(index)
        .map(|point| (point.x, point.y))
        .collect::<Vec<_>>();
    surface.polyline(&line, PATH);

    if let Some(current) = sorted.get(index) {
        surface.fill_disc(current.x, current.y, CURSOR_RADIUS, CURSOR);
        surface.stroke_circle(
            current.x,
            current.y,
            animation::pulse_radius(view.pulse_phase),
            CURSOR,
        );
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        StrokeRect(PlanRect),
        FillRect(PlanRect),
        Text(String),
        Disc { x: f64, y: f64, radius: f64, color: Rgba },
        Circle { radius: f64 },
        Gradient { radius: f64, stops: Vec<GradientStop> },
        Polyline(usize),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<Call>,
    }

    impl Surface for RecordingSurface {
        fn stroke_rect(&mut self, rect: PlanRect, _color: Rgba) {
            self.calls.push(Call::StrokeRect(rect));
        }

        fn fill_rect(&mut self, rect: PlanRect, _color: Rgba) {
            self.calls.push(Call::FillRect(rect));
        }

        fn text(&mut self, _x: f64, _y: f64, text: &str, _color: Rgba) {
            self.calls.push(Call::Text(text.to_string()));
        }

        fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
            self.calls.push(Call::Disc { x, y, radius, color });
        }

        fn stroke_circle(&mut self, _x: f64, _y: f64, radius: f64, _color: Rgba) {
            self.calls.push(Call::Circle { radius });
        }

        fn radial_gradient(&mut self, _x: f64, _y: f64, radius: f64, stops: &[GradientStop]) {
            self.calls.push(Call::Gradient {
                radius,
                stops: stops.to_vec(),
            });
        }

        fn polyline(&mut self, points: &[(f64, f64)], _color: Rgba) {
            self.calls.push(Call::Polyline(points.len()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::{Call, RecordingSurface};
    use super::*;
    use crate::filter::FilterEditor;
    use proptest::prelude::*;

    fn snapshot_with(ids: &[&str]) -> FilterSnapshot {
        let mut editor = FilterEditor::new();
        for id in ids {
            editor.toggle_identifier(id);
        }
        editor.apply()
    }

    fn view(mode: VisualizationMode, ids: &[&str], progress: u8) -> SpatialView {
        SpatialView::build(mode, &snapshot_with(ids), progress, 0.0).unwrap()
    }

    #[test]
    fn point_count_follows_selection_size() {
        assert_eq!(point_count(0), 100);
        assert_eq!(point_count(1), 10);
        assert_eq!(point_count(3), 30);
        assert_eq!(point_count(10), 100);
        assert_eq!(point_count(23), 100);
    }

    #[test]
    fn first_point_matches_closed_form() {
        let points = generate_points(&FilterSnapshot::default());
        let first = &points[0];
        assert!((first.x - 400.0).abs() < 1e-9);
        assert!((first.y - 350.0).abs() < 1e-9);
        assert!((first.intensity - 0.6).abs() < 1e-9);
        assert_eq!(first.timestamp_ms, EPOCH_MS);
        assert_eq!(first.owner, "user-1");
        assert_eq!(points[21].owner, "user-2");
        assert_eq!(points[5].area, "Office");
    }

    #[test]
    fn owners_cycle_through_selection() {
        let points = generate_points(&snapshot_with(&["GUID-A1-001", "GUID-A1-002"]));
        assert_eq!(points.len(), 20);
        assert_eq!(points[0].owner, "GUID-A1-001");
        assert_eq!(points[1].owner, "GUID-A1-002");
        assert_eq!(points[2].owner, "GUID-A1-001");
    }

    #[test]
    fn no_surface_is_a_silent_no_op() {
        let view = view(VisualizationMode::DensityField, &[], 0);
        assert!(!draw(None, &view));
    }

    #[test]
    fn room_labels_sit_inside_their_rooms() {
        let label = |name: &str| {
            ROOMS
                .iter()
                .find(|room| room.name == name)
                .map(|room| room.label_at)
        };
        assert_eq!(label("Meeting Room"), Some((380.0, 95.0)));
        assert_eq!(label("Corridor"), Some((290.0, 170.0)));
        for room in &ROOMS {
            let (x, y) = room.label_at;
            assert!(x > room.rect.x && x < room.rect.x + room.rect.width, "{}", room.name);
            assert!(y > room.rect.y && y < room.rect.y + room.rect.height, "{}", room.name);
        }
    }

    #[test]
    fn floor_plan_draws_wall_and_rooms() {
        let mut surface = RecordingSurface::default();
        draw_floor_plan(&mut surface);
        assert_eq!(surface.calls[0], Call::StrokeRect(OUTER_WALL));
        let labels = surface
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(labels, ["Entrance", "Office", "Meeting Room", "Cafe", "Corridor"]);
        assert!(surface
            .calls
            .contains(&Call::FillRect(PlanRect::new(51.0, 51.0, 98.0, 78.0))));
    }

    #[test]
    fn density_paints_one_gradient_per_point() {
        let view = view(VisualizationMode::DensityField, &[], 0);
        let mut surface = RecordingSurface::default();
        assert!(draw(Some(&mut surface), &view));

        let gradients = surface
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Gradient { radius, stops } => Some((*radius, stops.clone())),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(gradients.len(), 100);
        let (radius, stops) = &gradients[0];
        assert!((radius - 30.0).abs() < f64::EPSILON);
        assert!((stops[0].color.a - 0.48).abs() < 1e-9);
        assert!((stops[1].color.a - 0.24).abs() < 1e-9);
        assert!(stops[2].color.a.abs() < f64::EPSILON);
    }

    #[test]
    fn clusters_use_palette_by_cluster_id() {
        let view = view(VisualizationMode::ClusterColoring, &[], 0);
        let mut surface = RecordingSurface::default();
        draw(Some(&mut surface), &view);

        let discs = surface
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Disc { color, radius, .. } => Some((*color, *radius)),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(discs.len(), 100);
        assert_eq!(discs[0].0, CLUSTER_PALETTE[0]);
        assert_eq!(discs[45].0, CLUSTER_PALETTE[2]);
        assert_eq!(discs[99].0, CLUSTER_PALETTE[4]);
        assert!(discs.iter().all(|(_, radius)| (*radius - 8.0).abs() < f64::EPSILON));
    }

    #[test]
    fn path_marks_start_and_end() {
        let view = view(VisualizationMode::PathTrace, &["GUID-A1-001"], 0);
        let mut surface = RecordingSurface::default();
        draw(Some(&mut surface), &view);

        let overlay = &surface.calls[surface.calls.len() - 3..];
        assert_eq!(overlay[0], Call::Polyline(10));
        assert!(matches!(overlay[1], Call::Disc { color, .. } if color == START));
        assert!(matches!(overlay[2], Call::Disc { color, .. } if color == END));
    }

    #[test]
    fn playback_draws_cursor_until_the_end() {
        let halfway = view(VisualizationMode::SteppedPlayback, &["GUID-A1-001", "GUID-A1-002"], 50);
        let mut surface = RecordingSurface::default();
        draw(Some(&mut surface), &halfway);
        assert!(surface.calls.contains(&Call::Polyline(10)));
        assert!(surface.calls.contains(&Call::Circle { radius: 12.0 }));

        let finished = view(VisualizationMode::SteppedPlayback, &["GUID-A1-001"], 100);
        let mut surface = RecordingSurface::default();
        draw(Some(&mut surface), &finished);
        assert!(surface.calls.contains(&Call::Polyline(10)));
        assert!(!surface.calls.iter().any(|call| matches!(call, Call::Circle { .. })));
    }

    #[test]
    fn statistical_modes_have_no_overlay() {
        assert!(SpatialView::build(
            VisualizationMode::HourlyActivity,
            &FilterSnapshot::default(),
            0,
            0.0
        )
        .is_none());
    }

    proptest! {
        #[test]
        fn generation_is_deterministic(n in 0usize..23) {
            let ids = crate::catalog::aliases()
                .iter()
                .take(n)
                .map(|entry| entry.identifier)
                .collect::<Vec<_>>();
            let snapshot = snapshot_with(&ids);
            let first = generate_points(&snapshot);
            prop_assert_eq!(&first, &generate_points(&snapshot));
            prop_assert_eq!(first.len(), point_count(n));
            prop_assert!(first
                .iter()
                .all(|p| p.intensity >= 0.2 - 1e-9 && p.intensity <= 1.0 + 1e-9));
            prop_assert!(first.iter().all(|p| p.cluster < 5));
        }
    }
}
