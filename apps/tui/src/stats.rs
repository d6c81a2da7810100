//! Statistical views. Each generator synthesizes one dataset shaped by the
//! applied filter; the number of selected identifiers acts as a density factor.

use crate::catalog;
use crate::domain::DayType;
use crate::filter::FilterSnapshot;
use crate::registry::{self, VisualizationMode};
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::Serialize;

pub const ANALYSIS_AREAS: [&str; 8] = [
    "Entrance",
    "Office",
    "Meeting Room A",
    "Meeting Room B",
    "Cafe",
    "Break Room",
    "Pharmacy",
    "Nurse Station",
];

pub const TIME_SLOTS: [&str; 9] = [
    "09:00-10:00",
    "10:00-11:00",
    "11:00-12:00",
    "12:00-13:00",
    "13:00-14:00",
    "14:00-15:00",
    "15:00-16:00",
    "16:00-17:00",
    "17:00-18:00",
];

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const TIMELINE_DEFAULTS: [&str; 2] = ["GUID-A1-001", "GUID-A1-002"];
const MOVEMENT_DEFAULTS: [&str; 3] = ["GUID-A1-001", "GUID-A1-002", "GUID-A2-001"];
const STAY_BINS: [(&str, f64); 5] = [
    ("0-15 min", 45.0),
    ("15-30 min", 78.0),
    ("30-60 min", 92.0),
    ("60-120 min", 67.0),
    ("120+ min", 23.0),
];
const FLOOR_METRICS: [(&str, f64); 3] = [
    ("1F -> 2F moves", 47.0),
    ("2F -> 3F moves", 23.0),
    ("Stair uses", 31.0),
];
const CROSS_TAB_LIMIT: usize = 15;
const MAX_TREND_DAYS: usize = 366;
const FALLBACK_TREND_DAYS: u32 = 30;
const BOX_SAMPLES: usize = 20;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatView {
    pub mode: VisualizationMode,
    pub title: &'static str,
    pub description: &'static str,
    pub body: StatBody,
}

impl StatView {
    pub fn record_count(&self) -> usize {
        self.body.len()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub enum StatBody {
    Timeline(Vec<TimelineEntry>),
    MovementStats(Vec<MovementStat>),
    Pie(Vec<PieSlice>),
    Bars(Vec<Datum>),
    Line(Vec<Datum>),
    CrossTab(Vec<Transition>),
    HeatGrid(HeatGrid),
    BoxSummary(Vec<BoxStats>),
    Metrics(Vec<Datum>),
    Composed(Vec<HourlyActivity>),
    ContinuousStay(Vec<StayRecord>),
    Anomalies(Vec<Anomaly>),
    Placeholder(String),
}

impl StatBody {
    /// Rows, bars, cells or entries in the body.
    pub fn len(&self) -> usize {
        match self {
            Self::Timeline(rows) => rows.len(),
            Self::MovementStats(rows) => rows.len(),
            Self::Pie(slices) => slices.len(),
            Self::Bars(bars) | Self::Line(bars) => bars.len(),
            Self::CrossTab(rows) => rows.len(),
            Self::HeatGrid(grid) => grid.cells.iter().map(Vec::len).sum(),
            Self::BoxSummary(rows) => rows.len(),
            Self::Metrics(metrics) => metrics.len(),
            Self::Composed(rows) => rows.len(),
            Self::ContinuousStay(rows) => rows.len(),
            Self::Anomalies(rows) => rows.len(),
            Self::Placeholder(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Datum {
    pub label: String,
    pub value: u64,
}

impl Datum {
    fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub identifier: String,
    pub slot: &'static str,
    pub area: &'static str,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementStat {
    pub identifier: String,
    pub moves: u32,
    pub total_stay: u32,
    pub average_stay: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: &'static str,
    pub value: u32,
    /// One decimal place.
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub const fn for_count(count: u32) -> Self {
        if count > 20 {
            Self::High
        } else if count > 10 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: &'static str,
    pub to: &'static str,
    pub count: u32,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatGrid {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `cells[row][column]`, each in `0.0..=1.0`.
    pub cells: Vec<Vec<f64>>,
}

impl HeatGrid {
    pub fn max(&self) -> f64 {
        self.cells
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub area: &'static str,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyActivity {
    pub hour: String,
    pub moves: u32,
    pub stay: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StayStatus {
    Attention,
    Focused,
    Normal,
}

impl StayStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Attention => "Attention",
            Self::Focused => "Focused work",
            Self::Normal => "Normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StayRecord {
    pub identifier: String,
    pub area: &'static str,
    pub minutes: u32,
    pub abnormal: bool,
    pub status: StayStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub identifier: String,
    pub kind: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub time: &'static str,
}

/// Who the numbers are computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationTargets {
    pub labels: Vec<String>,
}

impl CalculationTargets {
    pub fn from_snapshot(snapshot: &FilterSnapshot) -> Self {
        Self {
            labels: snapshot
                .selected_identifiers
                .iter()
                .map(|id| catalog::labelled(id))
                .collect(),
        }
    }

    pub fn is_everyone(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_everyone() {
            "All users".to_string()
        } else {
            format!("{} selected: {}", self.labels.len(), self.labels.join(", "))
        }
    }
}

pub fn density_factor(snapshot: &FilterSnapshot) -> f64 {
    (snapshot.selection_count() as f64).mul_add(0.1, 1.0)
}

fn scaled(base: f64, factor: f64) -> u64 {
    (base * factor).floor() as u64
}

fn identifiers_or<'a>(snapshot: &'a FilterSnapshot, defaults: &[&'a str]) -> Vec<&'a str> {
    if snapshot.selected_identifiers.is_empty() {
        defaults.to_vec()
    } else {
        snapshot
            .selected_identifiers
            .iter()
            .map(String::as_str)
            .collect()
    }
}

const fn title_of(mode: VisualizationMode) -> &'static str {
    match mode {
        VisualizationMode::GuidTimeline => "GUID timeline - area stays by hour",
        VisualizationMode::GuidMovementStats => "GUID movement stats - moves and stay time",
        VisualizationMode::GuidAreaDistribution => "GUID area distribution - stay share by area",
        VisualizationMode::StayTimeDistribution => "Stay time distribution",
        VisualizationMode::AreaCrossTabulation => "Area cross-tabulation",
        VisualizationMode::AreaTimeRatio => "Stay time share by area",
        VisualizationMode::AreaTimeHeatmap => "Stay time heat map - weekday x hour",
        VisualizationMode::AreaTimeComparison => "Stay time comparison by area",
        VisualizationMode::FloorMovementAnalysis => "Floor movement analysis",
        VisualizationMode::BehaviorTrends => "Behaviour trends - weekday x hour",
        VisualizationMode::HourlyActivity => "Hourly activity",
        VisualizationMode::DailyMovementTrend => "Daily movement trend",
        VisualizationMode::ContinuousStayDetection => "Continuous stay detection",
        VisualizationMode::AnomalyDetection => "Anomaly detection - pattern analysis",
        VisualizationMode::DensityField
        | VisualizationMode::ClusterColoring
        | VisualizationMode::PathTrace
        | VisualizationMode::SteppedPlayback => "Chart analysis",
    }
}

/// Synthesizes the dataset for a statistical mode. Spatial modes get a
/// placeholder body.
pub fn generate<R: Rng + ?Sized>(
    mode: VisualizationMode,
    snapshot: &FilterSnapshot,
    rng: &mut R,
) -> StatView {
    let body = match mode {
        VisualizationMode::GuidTimeline => StatBody::Timeline(guid_timeline(snapshot, rng)),
        VisualizationMode::GuidMovementStats => {
            StatBody::MovementStats(guid_movement_stats(snapshot, rng))
        }
        VisualizationMode::GuidAreaDistribution | VisualizationMode::AreaTimeRatio => {
            StatBody::Pie(area_distribution(rng))
        }
        VisualizationMode::StayTimeDistribution => {
            StatBody::Bars(stay_time_distribution(snapshot))
        }
        VisualizationMode::AreaCrossTabulation => StatBody::CrossTab(area_cross_tabulation(rng)),
        VisualizationMode::AreaTimeHeatmap | VisualizationMode::BehaviorTrends => {
            StatBody::HeatGrid(behavior_trends(snapshot))
        }
        VisualizationMode::AreaTimeComparison => {
            StatBody::BoxSummary(area_time_comparison(rng))
        }
        VisualizationMode::FloorMovementAnalysis => {
            StatBody::Metrics(floor_movement_metrics(snapshot))
        }
        VisualizationMode::HourlyActivity => StatBody::Composed(hourly_activity(rng)),
        VisualizationMode::DailyMovementTrend => {
            StatBody::Line(daily_movement_trend(snapshot, rng))
        }
        VisualizationMode::ContinuousStayDetection => {
            StatBody::ContinuousStay(continuous_stays(snapshot, rng))
        }
        VisualizationMode::AnomalyDetection => StatBody::Anomalies(anomalies(snapshot, rng)),
        VisualizationMode::DensityField
        | VisualizationMode::ClusterColoring
        | VisualizationMode::PathTrace
        | VisualizationMode::SteppedPlayback => {
            StatBody::Placeholder(format!("{mode} is not a chart view"))
        }
    };

    tracing::debug!(%mode, records = body.len(), "generated statistical view");

    StatView {
        mode,
        title: title_of(mode),
        description: registry::descriptor_of(mode).description,
        body,
    }
}

/// Area for an hourly slot. Stable for a given identifier and slot.
pub fn timeline_area_index(slot: usize, identifier: &str) -> usize {
    let seed = identifier.chars().next().map_or(0, u32::from);
    let count = ANALYSIS_AREAS.len() as f64;
    let raw = ((slot as f64 + f64::from(seed)).sin() * count / 2.0 + count / 2.0).floor();
    (raw as usize) % ANALYSIS_AREAS.len()
}

pub fn guid_timeline<R: Rng + ?Sized>(
    snapshot: &FilterSnapshot,
    rng: &mut R,
) -> Vec<TimelineEntry> {
    identifiers_or(snapshot, &TIMELINE_DEFAULTS)
        .into_iter()
        .flat_map(|identifier| {
            TIME_SLOTS
                .iter()
                .enumerate()
                .map(|(slot, label)| TimelineEntry {
                    identifier: catalog::labelled(identifier),
                    slot: *label,
                    area: ANALYSIS_AREAS[timeline_area_index(slot, identifier)],
                    minutes: rng.gen_range(15..60),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn guid_movement_stats<R: Rng + ?Sized>(
    snapshot: &FilterSnapshot,
    rng: &mut R,
) -> Vec<MovementStat> {
    identifiers_or(snapshot, &MOVEMENT_DEFAULTS)
        .into_iter()
        .map(|identifier| MovementStat {
            identifier: catalog::labelled(identifier),
            moves: rng.gen_range(20..70),
            total_stay: rng.gen_range(200..500),
            average_stay: rng.gen_range(15..45),
        })
        .collect()
}

pub fn area_distribution<R: Rng + ?Sized>(rng: &mut R) -> Vec<PieSlice> {
    ANALYSIS_AREAS
        .into_iter()
        .map(|name| PieSlice {
            name,
            value: rng.gen_range(50..150),
            percentage: (rng.gen_range(10.0..40.0_f64) * 10.0).floor() / 10.0,
        })
        .collect()
}

pub fn stay_time_distribution(snapshot: &FilterSnapshot) -> Vec<Datum> {
    let factor = density_factor(snapshot);
    STAY_BINS
        .iter()
        .map(|(label, base)| Datum::new(*label, scaled(*base, factor)))
        .collect()
}

pub fn area_cross_tabulation<R: Rng + ?Sized>(rng: &mut R) -> Vec<Transition> {
    let mut transitions = Vec::new();
    for from in ANALYSIS_AREAS {
        for to in ANALYSIS_AREAS {
            if from == to {
                continue;
            }
            let count = rng.gen_range(5..35);
            transitions.push(Transition {
                from,
                to,
                count,
                tier: Tier::for_count(count),
            });
        }
    }
    transitions.sort_by(|a, b| b.count.cmp(&a.count));
    transitions.truncate(CROSS_TAB_LIMIT);
    transitions
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

pub fn box_stats(area: &'static str, samples: &[f64]) -> BoxStats {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    BoxStats {
        area,
        min: sorted.first().copied().unwrap_or_default(),
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or_default(),
    }
}

pub fn area_time_comparison<R: Rng + ?Sized>(rng: &mut R) -> Vec<BoxStats> {
    ANALYSIS_AREAS
        .into_iter()
        .map(|area| {
            let samples = (0..BOX_SAMPLES)
                .map(|_| f64::from(rng.gen_range(5_u32..120)))
                .collect::<Vec<_>>();
            box_stats(area, &samples)
        })
        .collect()
}

pub fn floor_movement_metrics(snapshot: &FilterSnapshot) -> Vec<Datum> {
    let factor = density_factor(snapshot);
    FLOOR_METRICS
        .iter()
        .map(|(label, base)| Datum::new(*label, scaled(*base, factor)))
        .collect()
}

pub fn behavior_intensity(day: usize, hour: usize, identifiers_selected: bool) -> f64 {
    let base = if (9..=18).contains(&hour) { 0.7 } else { 0.2 };
    let weekend = if day >= 5 { 0.3 } else { 1.0 };
    let hour_factor = if hour == 12 || hour == 13 { 1.2 } else { 1.0 };
    let identifier_factor = if identifiers_selected { 0.7 } else { 1.0 };
    let wave = (((day + hour) as f64) * 0.2).sin() * 0.3;
    ((base + wave) * weekend * hour_factor * identifier_factor).clamp(0.0, 1.0)
}

pub fn behavior_trends(snapshot: &FilterSnapshot) -> HeatGrid {
    let selected = !snapshot.is_all_identifiers();
    HeatGrid {
        rows: WEEKDAYS.iter().map(ToString::to_string).collect(),
        columns: (0..24).map(|hour| format!("{hour:02}")).collect(),
        cells: (0..WEEKDAYS.len())
            .map(|day| {
                (0..24)
                    .map(|hour| behavior_intensity(day, hour, selected))
                    .collect()
            })
            .collect(),
    }
}

pub fn hourly_activity<R: Rng + ?Sized>(rng: &mut R) -> Vec<HourlyActivity> {
    (9..=18)
        .map(|hour| HourlyActivity {
            hour: format!("{hour}:00"),
            moves: rng.gen_range(20..70),
            stay: rng.gen_range(30..90),
        })
        .collect()
}

/// Day labels for the trend line: the applied date range filtered by day
/// type, or 1/1..1/30 when the range does not yield any day.
pub fn trend_days(snapshot: &FilterSnapshot) -> Vec<String> {
    let days = parse_range(snapshot)
        .map(|(start, end)| {
            start
                .iter_days()
                .take_while(|day| *day <= end)
                .filter(|day| snapshot.day_type.admits(day.weekday()))
                .take(MAX_TREND_DAYS)
                .map(|day| format!("{}/{}", day.month(), day.day()))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if days.is_empty() {
        (1..=FALLBACK_TREND_DAYS).map(|day| format!("1/{day}")).collect()
    } else {
        days
    }
}

fn parse_range(snapshot: &FilterSnapshot) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::parse_from_str(snapshot.date_range.start.trim(), "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(snapshot.date_range.end.trim(), "%Y-%m-%d").ok()?;
    Some((start, end))
}

pub fn daily_movement_trend<R: Rng + ?Sized>(
    snapshot: &FilterSnapshot,
    rng: &mut R,
) -> Vec<Datum> {
    trend_days(snapshot)
        .into_iter()
        .map(|label| Datum::new(label, rng.gen_range(50..150)))
        .collect()
}

pub fn continuous_stays<R: Rng + ?Sized>(
    snapshot: &FilterSnapshot,
    rng: &mut R,
) -> Vec<StayRecord> {
    let mut records = identifiers_or(snapshot, &TIMELINE_DEFAULTS)
        .into_iter()
        .flat_map(|identifier| {
            ANALYSIS_AREAS
                .into_iter()
                .map(|area| {
                    let minutes = rng.gen_range(30..150);
                    let abnormal = rng.gen::<f64>() > 0.7;
                    let status = if abnormal {
                        StayStatus::Attention
                    } else if minutes > 90 {
                        StayStatus::Focused
                    } else {
                        StayStatus::Normal
                    };
                    StayRecord {
                        identifier: catalog::labelled(identifier),
                        area,
                        minutes,
                        abnormal,
                        status,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    records.sort_by(|a, b| b.minutes.cmp(&a.minutes));
    records
}

pub fn anomalies<R: Rng + ?Sized>(snapshot: &FilterSnapshot, rng: &mut R) -> Vec<Anomaly> {
    let mut found = Vec::new();
    for identifier in identifiers_or(snapshot, &TIMELINE_DEFAULTS) {
        let label = catalog::labelled(identifier);
        if rng.gen::<f64>() > 0.5 {
            found.push(Anomaly {
                identifier: label.clone(),
                kind: "Rapid multi-area movement",
                description: "Visited 5 areas within 10 minutes",
                severity: Severity::High,
                time: "14:25",
            });
        }
        if rng.gen::<f64>() > 0.6 {
            found.push(Anomaly {
                identifier: label,
                kind: "Prolonged single-area stay",
                description: "Stayed 180 minutes in the Office",
                severity: Severity::Medium,
                time: "11:00",
            });
        }
    }
    found
}

/// `value` bucketed into one of `levels` colour steps.
pub fn intensity_level(value: f64, levels: usize) -> usize {
    if levels == 0 {
        return 0;
    }
    ((value.clamp(0.0, 1.0) * (levels - 1) as f64).floor() as usize).min(levels - 1)
}

pub const fn day_type_note(day_type: DayType) -> &'static str {
    match day_type {
        DayType::All => "every day",
        DayType::Weekday => "Mon-Fri only",
        DayType::Holiday => "Sat/Sun only",
    }
}
