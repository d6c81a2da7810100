use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use indoor_analytics::dispatch::Visual;
use indoor_analytics::filter::FilterSnapshot;
use indoor_analytics::registry::VisualizationMode;
use indoor_analytics::stats::{CalculationTargets, StatBody, StatView};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;
use std::path::PathBuf;

use crate::app::{handle_input, App};
use crate::ui;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ExportState {
    Idle,
    Exporting,
    Success,
    Error,
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Exporting => write!(f, "Exporting"),
            Self::Success => write!(f, "Success"),
            Self::Error => write!(f, "Error"),
        }
    }
}

#[derive(Clone, Debug)]
enum ExportEvent {
    Start,
    Written { path: PathBuf, records: u32 },
    Failed(String),
    Reset,
}

impl fmt::Display for ExportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Written { path, .. } => write!(f, "Written({path})", path = path.display()),
            Self::Failed(msg) => write!(f, "Failed({msg})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: ExportState,
    event: ExportEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

/// Tracks one export request from key press to status line.
struct ExportMachine {
    state: ExportState,
}

impl ExportMachine {
    const fn new() -> Self {
        Self {
            state: ExportState::Idle,
        }
    }

    const fn state(&self) -> ExportState {
        self.state
    }

    fn process_event(
        &mut self,
        event: &ExportEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, app))?;
        self.state = next_state.0;
        Ok(())
    }

    /// Runs a pending export through every state and back to idle.
    fn drive(&mut self, app: &mut App) {
        if !app.export_requested || self.state() != ExportState::Idle {
            return;
        }
        app.export_requested = false;

        if let Err(e) = self.process_event(&ExportEvent::Start, app) {
            tracing::warn!(error = %e, "export state machine rejected start");
            return;
        }

        let outcome = match app.export() {
            Ok(receipt) => ExportEvent::Written {
                path: receipt.path,
                records: receipt.total_records,
            },
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                ExportEvent::Failed(e.to_string())
            }
        };

        if let Err(e) = self.process_event(&outcome, app) {
            tracing::warn!(error = %e, "export state machine rejected outcome");
        }
        if let Err(e) = self.process_event(&ExportEvent::Reset, app) {
            tracing::warn!(error = %e, "export state machine rejected reset");
        }
    }
}

struct NextState(ExportState);

impl TryFrom<(ExportState, &ExportEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (ExportState, &ExportEvent, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            (ExportState::Idle, ExportEvent::Start) => {
                app.status_message = "Exporting...".to_string();
                Ok(Self(ExportState::Exporting))
            }
            (ExportState::Exporting, ExportEvent::Written { path, records }) => {
                let filename = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("unknown");
                app.status_message = format!("Exported {records} records to {filename}");
                Ok(Self(ExportState::Success))
            }
            (ExportState::Exporting, ExportEvent::Failed(error)) => {
                app.status_message = format!("Export failed: {error}");
                Ok(Self(ExportState::Error))
            }
            (ExportState::Success | ExportState::Error, ExportEvent::Reset) => {
                Ok(Self(ExportState::Idle))
            }
            _ => Err(StateTransitionError {
                from: current_state,
                event: event.clone(),
            }),
        }
    }
}

/// Print a summary of the selected visualization instead of drawing it
pub fn run_headless(app: &App, json: bool) -> Result<()> {
    let summary = build_headless_summary(app);

    if json {
        let json = serde_json::to_string_pretty(&summary)?;
        println!("{json}");
    } else {
        render_headless_text(&summary);
    }

    Ok(())
}

fn render_headless_text(summary: &HeadlessSummary) {
    let filters = &summary.filters;

    println!("\nIndoor Analytics");
    println!("================");
    println!(
        "Mode: {} ({}) [{}]",
        summary.label, summary.mode, summary.family
    );
    println!(
        "Location: {} / {} / {}",
        filters.building_id, filters.floor_id, filters.area_id
    );
    println!(
        "Period: {} to {} ({}), {}-{}",
        filters.date_range.start,
        filters.date_range.end,
        filters.day_type.as_str(),
        filters.time_range.start,
        filters.time_range.end
    );
    println!("Targets: {}", summary.calculation_targets);
    println!("Records: {}", summary.record_count);

    if let Some(clusters) = &summary.clusters {
        let ids = clusters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("Clusters: {ids}");
    }

    if let Some(chart) = &summary.chart {
        println!("\n{}", chart.title);
        for line in body_lines(&chart.body) {
            println!("- {line}");
        }
    }
}

fn body_lines(body: &StatBody) -> Vec<String> {
    match body {
        StatBody::Timeline(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "{} | {} | {} | {} min",
                    row.identifier, row.slot, row.area, row.minutes
                )
            })
            .collect(),
        StatBody::MovementStats(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "{}: {} moves, {} min total, {} min average",
                    row.identifier, row.moves, row.total_stay, row.average_stay
                )
            })
            .collect(),
        StatBody::Pie(slices) => slices
            .iter()
            .map(|slice| format!("{}: {} ({:.1}%)", slice.name, slice.value, slice.percentage))
            .collect(),
        StatBody::Bars(data) | StatBody::Line(data) | StatBody::Metrics(data) => data
            .iter()
            .map(|datum| format!("{}: {}", datum.label, datum.value))
            .collect(),
        StatBody::CrossTab(rows) => rows
            .iter()
            .map(|row| format!("{} -> {}: {} ({})", row.from, row.to, row.count, row.tier.label()))
            .collect(),
        StatBody::HeatGrid(grid) => grid
            .rows
            .iter()
            .zip(&grid.cells)
            .map(|(row, cells)| {
                let peak = cells.iter().copied().fold(0.0_f64, f64::max);
                format!("{row}: peak {peak:.2}")
            })
            .collect(),
        StatBody::BoxSummary(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "{}: min {:.0} / q1 {:.0} / median {:.0} / q3 {:.0} / max {:.0}",
                    row.area, row.min, row.q1, row.median, row.q3, row.max
                )
            })
            .collect(),
        StatBody::Composed(rows) => rows
            .iter()
            .map(|row| format!("{}: {} moves, {} min stay", row.hour, row.moves, row.stay))
            .collect(),
        StatBody::ContinuousStay(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "{} @ {}: {} min ({})",
                    row.identifier,
                    row.area,
                    row.minutes,
                    row.status.label()
                )
            })
            .collect(),
        StatBody::Anomalies(rows) if rows.is_empty() => vec!["No anomalies detected".to_string()],
        StatBody::Anomalies(rows) => rows
            .iter()
            .map(|row| format!("{} {} {}: {}", row.time, row.identifier, row.kind, row.description))
            .collect(),
        StatBody::Placeholder(message) => vec![message.clone()],
    }
}

fn build_headless_summary(app: &App) -> HeadlessSummary {
    let mode = app.mode();
    let visual = app.visual();
    let (points, clusters, chart) = match &visual {
        Visual::Spatial(view) => (
            Some(view.points.len()),
            Some(view.cluster_ids().into_iter().collect()),
            None,
        ),
        Visual::Statistical(view) => (None, None, Some(view.clone())),
        Visual::Empty => (None, None, None),
    };

    HeadlessSummary {
        mode,
        label: mode.descriptor().label,
        family: app.family().label(),
        filters: app.applied.clone(),
        calculation_targets: CalculationTargets::from_snapshot(&app.applied).summary(),
        record_count: app.record_count(),
        points,
        clusters,
        chart,
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct HeadlessSummary {
    mode: VisualizationMode,
    label: &'static str,
    family: &'static str,
    filters: FilterSnapshot,
    calculation_targets: String,
    record_count: usize,
    points: Option<usize>,
    clusters: Option<Vec<usize>>,
    chart: Option<StatView>,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut export_machine = ExportMachine::new();

    loop {
        // Advance animations and apply due playback ticks
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        tracing::debug!("redraw after resize failed");
                    }
                }
                Ok(
                    Event::Key(_)
                    | Event::Mouse(_)
                    | Event::FocusGained
                    | Event::FocusLost
                    | Event::Paste(_),
                )
                | Err(_) => {}
            }
        }

        if app.export_requested {
            export_machine.drive(app);
            if terminal.draw(|f| ui::ui(app, f)).is_err() {
                tracing::debug!("redraw after export failed");
            }
        }

        tokio::task::yield_now().await;
    }

    app.teardown();
    Ok(())
}
