//! Routes a mode and an applied filter to the renderer of its family, and
//! keeps the family/mode selection policy used by the mode tabs.

use crate::domain::ModeFamily;
use crate::filter::FilterSnapshot;
use crate::registry::{self, VisualizationMode};
use crate::spatial::SpatialView;
use crate::stats::{self, StatView};
use rand::Rng;

/// Animation state a spatial render needs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    pub progress: u8,
    pub pulse_phase: f64,
}

#[derive(Debug, Clone)]
pub enum Visual {
    Spatial(SpatialView),
    Statistical(StatView),
    Empty,
}

impl Visual {
    pub const fn family(&self) -> Option<ModeFamily> {
        match self {
            Self::Spatial(_) => Some(ModeFamily::Spatial),
            Self::Statistical(_) => Some(ModeFamily::Statistical),
            Self::Empty => None,
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

pub fn render<R: Rng + ?Sized>(
    mode: VisualizationMode,
    snapshot: &FilterSnapshot,
    frame: Frame,
    rng: &mut R,
) -> Visual {
    match registry::family_of(mode) {
        Some(ModeFamily::Spatial) => {
            SpatialView::build(mode, snapshot, frame.progress, frame.pulse_phase)
                .map_or(Visual::Empty, Visual::Spatial)
        }
        Some(ModeFamily::Statistical) => Visual::Statistical(stats::generate(mode, snapshot, rng)),
        None => Visual::Empty,
    }
}

/// Like [`render`] for a string tag; unknown tags render nothing.
pub fn render_tag<R: Rng + ?Sized>(
    tag: &str,
    snapshot: &FilterSnapshot,
    frame: Frame,
    rng: &mut R,
) -> Visual {
    VisualizationMode::parse(tag).map_or_else(
        || {
            tracing::debug!(tag, "unknown visualization tag");
            Visual::Empty
        },
        |mode| render(mode, snapshot, frame, rng),
    )
}

/// The active family tab and the mode selected within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSelection {
    family: ModeFamily,
    mode: VisualizationMode,
}

impl Default for ModeSelection {
    fn default() -> Self {
        Self::first_of(ModeFamily::Spatial)
    }
}

impl ModeSelection {
    pub fn first_of(family: ModeFamily) -> Self {
        Self {
            family,
            mode: registry::modes_in(family)[0].mode,
        }
    }

    pub const fn family(&self) -> ModeFamily {
        self.family
    }

    pub const fn mode(&self) -> VisualizationMode {
        self.mode
    }

    /// Position of the selected mode within its family table.
    pub fn index_in_family(&self) -> usize {
        registry::modes_in(self.family)
            .iter()
            .position(|entry| entry.mode == self.mode)
            .unwrap_or(0)
    }

    /// Switching tabs always lands on the family's first mode.
    pub fn switch_family(&mut self, family: ModeFamily) {
        if family != self.family {
            *self = Self::first_of(family);
        }
    }

    pub fn toggle_family(&mut self) {
        self.switch_family(self.family.other());
    }

    /// Selects `mode` and activates its family.
    pub fn select(&mut self, mode: VisualizationMode) {
        if let Some(family) = registry::family_of(mode) {
            self.family = family;
            self.mode = mode;
        }
    }

    pub fn next(&mut self) {
        let modes = registry::modes_in(self.family);
        let index = (self.index_in_family() + 1) % modes.len();
        self.mode = modes[index].mode;
    }

    pub fn previous(&mut self) {
        let modes = registry::modes_in(self.family);
        let index = (self.index_in_family() + modes.len() - 1) % modes.len();
        self.mode = modes[index].mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatBody;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn spatial_modes_route_to_maps() {
        let snapshot = FilterSnapshot::default();
        let visual = render(
            VisualizationMode::DensityField,
            &snapshot,
            Frame::default(),
            &mut rng(),
        );
        match visual {
            Visual::Spatial(view) => assert_eq!(view.points.len(), 100),
            other => panic!("expected a map, got {other:?}"),
        }
    }

    #[test]
    fn statistical_modes_route_to_charts() {
        let visual = render(
            VisualizationMode::StayTimeDistribution,
            &FilterSnapshot::default(),
            Frame::default(),
            &mut rng(),
        );
        let Visual::Statistical(view) = visual else {
            panic!("expected a chart");
        };
        assert!(matches!(view.body, StatBody::Bars(ref bars) if bars.len() == 5));
    }

    #[test]
    fn unknown_tags_render_nothing() {
        let visual = render_tag("radar", &FilterSnapshot::default(), Frame::default(), &mut rng());
        assert!(visual.is_empty());
        assert_eq!(visual.family(), None);

        let visual = render_tag(
            "cluster",
            &FilterSnapshot::default(),
            Frame::default(),
            &mut rng(),
        );
        assert_eq!(visual.family(), Some(ModeFamily::Spatial));
    }

    #[test]
    fn switching_family_selects_its_first_mode() {
        let mut selection = ModeSelection::default();
        selection.select(VisualizationMode::PathTrace);
        selection.switch_family(ModeFamily::Statistical);
        assert_eq!(selection.mode(), VisualizationMode::GuidTimeline);

        selection.next();
        selection.toggle_family();
        assert_eq!(selection.family(), ModeFamily::Spatial);
        assert_eq!(selection.mode(), VisualizationMode::DensityField);
    }

    #[test]
    fn selecting_a_mode_activates_its_family() {
        let mut selection = ModeSelection::default();
        selection.select(VisualizationMode::AnomalyDetection);
        assert_eq!(selection.family(), ModeFamily::Statistical);
        assert_eq!(selection.index_in_family(), 13);
    }

    #[test]
    fn stepping_wraps_within_family() {
        let mut selection = ModeSelection::default();
        selection.previous();
        assert_eq!(selection.mode(), VisualizationMode::SteppedPlayback);
        selection.next();
        assert_eq!(selection.mode(), VisualizationMode::DensityField);
        assert_eq!(selection.family(), ModeFamily::Spatial);
    }
}
