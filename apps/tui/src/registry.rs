//! The eighteen visualization modes and their classification into the spatial
//! and statistical families.

use crate::domain::ModeFamily;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualizationMode {
    DensityField,
    ClusterColoring,
    PathTrace,
    SteppedPlayback,
    GuidTimeline,
    GuidMovementStats,
    GuidAreaDistribution,
    StayTimeDistribution,
    AreaCrossTabulation,
    AreaTimeRatio,
    AreaTimeHeatmap,
    AreaTimeComparison,
    FloorMovementAnalysis,
    BehaviorTrends,
    HourlyActivity,
    DailyMovementTrend,
    ContinuousStayDetection,
    AnomalyDetection,
}

impl VisualizationMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DensityField => "heatmap",
            Self::ClusterColoring => "cluster",
            Self::PathTrace => "trajectory",
            Self::SteppedPlayback => "animation",
            Self::GuidTimeline => "guid-timeline",
            Self::GuidMovementStats => "guid-movement-stats",
            Self::GuidAreaDistribution => "guid-area-distribution",
            Self::StayTimeDistribution => "stay-time-distribution",
            Self::AreaCrossTabulation => "area-cross-tabulation",
            Self::AreaTimeRatio => "area-time-ratio",
            Self::AreaTimeHeatmap => "area-time-heatmap",
            Self::AreaTimeComparison => "area-time-comparison",
            Self::FloorMovementAnalysis => "floor-movement-analysis",
            Self::BehaviorTrends => "behavior-trends",
            Self::HourlyActivity => "hourly-activity",
            Self::DailyMovementTrend => "daily-movement-trend",
            Self::ContinuousStayDetection => "continuous-stay-detection",
            Self::AnomalyDetection => "anomaly-detection",
        }
    }

    /// Parses a mode tag. The descriptive spatial names (`density-field`,
    /// `cluster-coloring`, `path-trace`, `stepped-playback`) are accepted as
    /// aliases of the short tags.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        match tag.as_str() {
            "density-field" => return Some(Self::DensityField),
            "cluster-coloring" => return Some(Self::ClusterColoring),
            "path-trace" => return Some(Self::PathTrace),
            "stepped-playback" => return Some(Self::SteppedPlayback),
            _ => {}
        }
        all_modes().iter().copied().find(|mode| mode.as_str() == tag)
    }

    pub fn family(self) -> Option<ModeFamily> {
        family_of(self)
    }

    pub fn descriptor(self) -> &'static ModeDescriptor {
        descriptor_of(self)
    }
}

impl Serialize for VisualizationMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeCategory {
    Map,
    Individual,
    Area,
    Temporal,
    Anomaly,
}

impl ModeCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Map => "Floor maps",
            Self::Individual => "Individual analysis",
            Self::Area => "Area analysis",
            Self::Temporal => "Time analysis",
            Self::Anomaly => "Anomaly analysis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeDescriptor {
    pub mode: VisualizationMode,
    pub label: &'static str,
    pub description: &'static str,
    pub category: ModeCategory,
}

const fn descriptor(
    mode: VisualizationMode,
    label: &'static str,
    description: &'static str,
    category: ModeCategory,
) -> ModeDescriptor {
    ModeDescriptor {
        mode,
        label,
        description,
        category,
    }
}

// Family membership lives here and nowhere else.
static SPATIAL_MODES: [ModeDescriptor; 4] = [
    descriptor(
        VisualizationMode::DensityField,
        "Heat map",
        "Density of people shown as colour intensity",
        ModeCategory::Map,
    ),
    descriptor(
        VisualizationMode::ClusterColoring,
        "Cluster map",
        "Where people gather, coloured by cluster",
        ModeCategory::Map,
    ),
    descriptor(
        VisualizationMode::PathTrace,
        "Trajectory map",
        "Movement paths drawn as a line",
        ModeCategory::Map,
    ),
    descriptor(
        VisualizationMode::SteppedPlayback,
        "Animation map",
        "Movement replayed over time",
        ModeCategory::Map,
    ),
];

static STATISTICAL_MODES: [ModeDescriptor; 14] = [
    descriptor(
        VisualizationMode::GuidTimeline,
        "GUID timeline",
        "Area stays per GUID by hour (e.g. 9:00-10:00 Area A)",
        ModeCategory::Individual,
    ),
    descriptor(
        VisualizationMode::GuidMovementStats,
        "GUID movement stats",
        "Moves and stay time per GUID",
        ModeCategory::Individual,
    ),
    descriptor(
        VisualizationMode::GuidAreaDistribution,
        "GUID area distribution",
        "Share of stay time per area for the selected GUIDs",
        ModeCategory::Individual,
    ),
    descriptor(
        VisualizationMode::StayTimeDistribution,
        "Stay time distribution",
        "How long visits last, in duration bins",
        ModeCategory::Area,
    ),
    descriptor(
        VisualizationMode::AreaCrossTabulation,
        "Area cross-tabulation",
        "Visit frequency between areas (e.g. Nurse Station to Pharmacy)",
        ModeCategory::Area,
    ),
    descriptor(
        VisualizationMode::AreaTimeRatio,
        "Area stay ratio",
        "Share of stay time per area",
        ModeCategory::Area,
    ),
    descriptor(
        VisualizationMode::AreaTimeHeatmap,
        "Area stay heat map",
        "Stay intensity per area and hour",
        ModeCategory::Area,
    ),
    descriptor(
        VisualizationMode::AreaTimeComparison,
        "Area stay comparison",
        "Spread of stay times per area as a box summary",
        ModeCategory::Area,
    ),
    descriptor(
        VisualizationMode::FloorMovementAnalysis,
        "Floor movement analysis",
        "Vertical movement load between floors",
        ModeCategory::Area,
    ),
    descriptor(
        VisualizationMode::BehaviorTrends,
        "Behaviour trends",
        "Activity by weekday and hour",
        ModeCategory::Temporal,
    ),
    descriptor(
        VisualizationMode::HourlyActivity,
        "Hourly activity",
        "Moves and stay time per hour to gauge crowding",
        ModeCategory::Temporal,
    ),
    descriptor(
        VisualizationMode::DailyMovementTrend,
        "Daily movement trend",
        "Moves per day over the selected date range",
        ModeCategory::Temporal,
    ),
    descriptor(
        VisualizationMode::ContinuousStayDetection,
        "Continuous stay detection",
        "Long uninterrupted stays in a single area",
        ModeCategory::Anomaly,
    ),
    descriptor(
        VisualizationMode::AnomalyDetection,
        "Anomaly detection",
        "Unusual movement such as rapid multi-area hops",
        ModeCategory::Anomaly,
    ),
];

static ALL_MODES: [VisualizationMode; 18] = [
    VisualizationMode::DensityField,
    VisualizationMode::ClusterColoring,
    VisualizationMode::PathTrace,
    VisualizationMode::SteppedPlayback,
    VisualizationMode::GuidTimeline,
    VisualizationMode::GuidMovementStats,
    VisualizationMode::GuidAreaDistribution,
    VisualizationMode::StayTimeDistribution,
    VisualizationMode::AreaCrossTabulation,
    VisualizationMode::AreaTimeRatio,
    VisualizationMode::AreaTimeHeatmap,
    VisualizationMode::AreaTimeComparison,
    VisualizationMode::FloorMovementAnalysis,
    VisualizationMode::BehaviorTrends,
    VisualizationMode::HourlyActivity,
    VisualizationMode::DailyMovementTrend,
    VisualizationMode::ContinuousStayDetection,
    VisualizationMode::AnomalyDetection,
];

/// Every mode, spatial first, in menu order.
pub fn all_modes() -> &'static [VisualizationMode] {
    &ALL_MODES
}

pub fn modes_in(family: ModeFamily) -> &'static [ModeDescriptor] {
    match family {
        ModeFamily::Spatial => &SPATIAL_MODES,
        ModeFamily::Statistical => &STATISTICAL_MODES,
    }
}

/// Family of a mode by table membership; `None` for a mode in neither table.
pub fn family_of(mode: VisualizationMode) -> Option<ModeFamily> {
    [ModeFamily::Spatial, ModeFamily::Statistical]
        .into_iter()
        .find(|family| modes_in(*family).iter().any(|entry| entry.mode == mode))
}

pub fn descriptor_of(mode: VisualizationMode) -> &'static ModeDescriptor {
    SPATIAL_MODES
        .iter()
        .chain(STATISTICAL_MODES.iter())
        .find(|entry| entry.mode == mode)
        .unwrap_or(&SPATIAL_MODES[0])
}

/// Descriptor for `tag` within `family`, or the family's first descriptor when
/// the tag is unknown or belongs to the other family.
pub fn descriptor_in_family(family: ModeFamily, tag: &str) -> &'static ModeDescriptor {
    let table = modes_in(family);
    VisualizationMode::parse(tag)
        .and_then(|mode| table.iter().find(|entry| entry.mode == mode))
        .unwrap_or(&table[0])
}

/// Best fuzzy match of `query` against mode tags and labels.
pub fn find_mode(query: &str) -> Option<VisualizationMode> {
    if let Some(mode) = VisualizationMode::parse(query) {
        return Some(mode);
    }

    let matcher = SkimMatcherV2::default();
    SPATIAL_MODES
        .iter()
        .chain(STATISTICAL_MODES.iter())
        .filter_map(|entry| {
            let by_tag = matcher.fuzzy_match(entry.mode.as_str(), query);
            let by_label = matcher.fuzzy_match(entry.label, query);
            by_tag.max(by_label).map(|score| (score, entry.mode))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, mode)| mode)
}
