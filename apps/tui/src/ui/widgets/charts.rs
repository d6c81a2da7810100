use indoor_analytics::stats::{
    self, Anomaly, BoxStats, Datum, HeatGrid, HourlyActivity, MovementStat, PieSlice, Severity,
    StatBody, StatView, StayRecord, StayStatus, Tier, TimelineEntry, Transition,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph,
    Row, Table, Wrap,
};
use ratatui::Frame;

pub const SERIES_COLORS: [Color; 8] = [
    Color::Rgb(0x88, 0x84, 0xd8),
    Color::Rgb(0x82, 0xca, 0x9d),
    Color::Rgb(0xff, 0xc6, 0x58),
    Color::Rgb(0xff, 0x73, 0x00),
    Color::Rgb(0x00, 0xc4, 0x9f),
    Color::Rgb(0xff, 0xbb, 0x28),
    Color::Rgb(0xff, 0x80, 0x42),
    Color::Rgb(0x00, 0x88, 0xfe),
];

/// Cold-to-hot ramp used by the heat grids.
pub const HEAT_RAMP: [Color; 5] = [
    Color::Rgb(0x1e, 0x3a, 0x8a),
    Color::Rgb(0x25, 0x63, 0xeb),
    Color::Rgb(0xfa, 0xcc, 0x15),
    Color::Rgb(0xf9, 0x73, 0x16),
    Color::Rgb(0xdc, 0x26, 0x26),
];

const PIE_STEP: f64 = 0.01;

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn header_row(labels: &[&'static str]) -> Row<'static> {
    Row::new(labels.iter().map(|label| Cell::from(*label)).collect::<Vec<_>>()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_message(f: &mut Frame<'_>, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .block(panel(title))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_stat_view(f: &mut Frame<'_>, area: Rect, view: &StatView) {
    let title = view.title;
    match &view.body {
        StatBody::Timeline(rows) => render_timeline(f, area, title, rows),
        StatBody::MovementStats(rows) => render_movement_stats(f, area, title, rows),
        StatBody::Pie(slices) => render_pie(f, area, title, slices),
        StatBody::Bars(data) => render_bars(f, area, title, data),
        StatBody::Line(data) => render_line(f, area, title, data),
        StatBody::CrossTab(rows) => render_cross_tab(f, area, title, rows),
        StatBody::HeatGrid(grid) => render_heat_grid(f, area, title, grid),
        StatBody::BoxSummary(rows) => render_box_summary(f, area, title, rows),
        StatBody::Metrics(data) => render_metrics(f, area, title, data),
        StatBody::Composed(rows) => render_composed(f, area, title, rows),
        StatBody::ContinuousStay(rows) => render_continuous_stay(f, area, title, rows),
        StatBody::Anomalies(rows) => render_anomalies(f, area, title, rows),
        StatBody::Placeholder(message) => render_message(f, area, title, message),
    }
}

fn render_timeline(f: &mut Frame<'_>, area: Rect, title: &str, rows: &[TimelineEntry]) {
    let body = rows.iter().map(|entry| {
        let color = stats::ANALYSIS_AREAS
            .iter()
            .position(|area| *area == entry.area)
            .map_or(Color::White, |index| SERIES_COLORS[index % SERIES_COLORS.len()]);
        Row::new(vec![
            Cell::from(entry.identifier.clone()),
            Cell::from(entry.slot),
            Cell::from(Span::styled(entry.area, Style::default().fg(color))),
            Cell::from(format!("{} min", entry.minutes)),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Min(24),
            Constraint::Length(13),
            Constraint::Length(16),
            Constraint::Length(8),
        ],
    )
    .header(header_row(&["GUID", "Slot", "Area", "Stay"]))
    .block(panel(title))
    .column_spacing(1);

    f.render_widget(table, area);
}

fn render_movement_stats(f: &mut Frame<'_>, area: Rect, title: &str, rows: &[MovementStat]) {
    let mut chart = BarChart::default()
        .block(panel(title))
        .bar_width(5)
        .bar_gap(1)
        .group_gap(3);

    for row in rows {
        let bars = [
            Bar::default()
                .value(u64::from(row.moves))
                .label(TextLine::from("moves"))
                .style(Style::default().fg(SERIES_COLORS[0])),
            Bar::default()
                .value(u64::from(row.average_stay))
                .label(TextLine::from("avg"))
                .style(Style::default().fg(SERIES_COLORS[1])),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(TextLine::from(row.identifier.clone()))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}

/// Angle ranges (radians, starting at 12 o'clock) for each slice value.
pub fn pie_angles(values: &[f64]) -> Vec<(f64, f64)> {
    let total = values.iter().sum::<f64>();
    if total <= 0.0 {
        return vec![(0.0, 0.0); values.len()];
    }
    let mut start = 0.0;
    values
        .iter()
        .map(|value| {
            let sweep = value / total * std::f64::consts::TAU;
            let range = (start, start + sweep);
            start += sweep;
            range
        })
        .collect()
}

fn render_pie(f: &mut Frame<'_>, area: Rect, title: &str, slices: &[PieSlice]) {
    if slices.is_empty() {
        render_message(f, area, title, "No data");
        return;
    }

    let block = panel(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let values = slices.iter().map(|slice| f64::from(slice.value)).collect::<Vec<_>>();
    let angles = pie_angles(&values);

    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-1.1, 1.1])
            .y_bounds([-1.1, 1.1])
            .paint(|ctx| {
                for (index, (start, end)) in angles.iter().enumerate() {
                    let color = SERIES_COLORS[index % SERIES_COLORS.len()];
                    let mut angle = *start;
                    while angle < *end {
                        ctx.draw(&CanvasLine {
                            x1: 0.0,
                            y1: 0.0,
                            x2: angle.sin(),
                            y2: angle.cos(),
                            color,
                        });
                        angle += PIE_STEP;
                    }
                }
            }),
        split[0],
    );

    let legend = slices
        .iter()
        .enumerate()
        .map(|(index, slice)| {
            TextLine::from(vec![
                Span::styled(
                    "■ ",
                    Style::default().fg(SERIES_COLORS[index % SERIES_COLORS.len()]),
                ),
                Span::styled(slice.name, Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {} ({:.1}%)", slice.value, slice.percentage),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect::<Vec<_>>();
    f.render_widget(Paragraph::new(Text::from(legend)), split[1]);
}

fn render_bars(f: &mut Frame<'_>, area: Rect, title: &str, data: &[Datum]) {
    let bars = data
        .iter()
        .enumerate()
        .map(|(index, datum)| {
            Bar::default()
                .value(datum.value)
                .label(TextLine::from(datum.label.clone()))
                .style(Style::default().fg(SERIES_COLORS[index % SERIES_COLORS.len()]))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect::<Vec<_>>();

    let max_value = data.iter().map(|datum| datum.value).max().unwrap_or(0).max(1);

    let chart = BarChart::default()
        .block(panel(title))
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(10);

    f.render_widget(chart, area);
}

/// First, middle and last label so long day ranges stay legible.
fn sparse_labels(labels: &[String]) -> Vec<Span<'static>> {
    match labels.len() {
        0 => Vec::new(),
        1 => vec![Span::raw(labels[0].clone())],
        len => vec![
            Span::raw(labels[0].clone()),
            Span::raw(labels[len / 2].clone()),
            Span::raw(labels[len - 1].clone()),
        ],
    }
}

fn render_line(f: &mut Frame<'_>, area: Rect, title: &str, data: &[Datum]) {
    if data.is_empty() {
        render_message(f, area, title, "No days match the selected day type");
        return;
    }

    let points = data
        .iter()
        .enumerate()
        .map(|(index, datum)| (index as f64, datum.value as f64))
        .collect::<Vec<_>>();
    let labels = data.iter().map(|datum| datum.label.clone()).collect::<Vec<_>>();
    let max_value = data.iter().map(|datum| datum.value).max().unwrap_or(0).max(1) as f64;

    let datasets = vec![Dataset::default()
        .name("Moves")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(SERIES_COLORS[0]))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(panel(title))
        .x_axis(
            Axis::default()
                .title("Day")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, (data.len().saturating_sub(1)).max(1) as f64])
                .labels(sparse_labels(&labels)),
        )
        .y_axis(
            Axis::default()
                .title("Moves")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_value * 1.1])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", max_value * 1.1)),
                ]),
        );

    f.render_widget(chart, area);
}

pub const fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::High => Color::Red,
        Tier::Medium => Color::Yellow,
        Tier::Low => Color::Green,
    }
}

fn render_cross_tab(f: &mut Frame<'_>, area: Rect, title: &str, rows: &[Transition]) {
    let body = rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.from),
            Cell::from(row.to),
            Cell::from(row.count.to_string()),
            Cell::from(Span::styled(
                row.tier.label(),
                Style::default().fg(tier_color(row.tier)),
            )),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(6),
            Constraint::Length(8),
        ],
    )
    .header(header_row(&["From", "To", "Moves", "Level"]))
    .block(panel(title))
    .column_spacing(1);

    f.render_widget(table, area);
}

fn render_heat_grid(f: &mut Frame<'_>, area: Rect, title: &str, grid: &HeatGrid) {
    let label_width = grid.rows.iter().map(String::len).max().unwrap_or(0);
    let inner_width = area.width.saturating_sub(2 + label_width as u16 + 1);
    let cell_width = (usize::from(inner_width) / grid.columns.len().max(1)).clamp(1, 4);

    let mut lines = Vec::with_capacity(grid.rows.len() + 2);
    let mut header = vec![Span::raw(" ".repeat(label_width + 1))];
    for column in &grid.columns {
        let text = column.chars().take(cell_width).collect::<String>();
        header.push(Span::styled(
            format!("{text:<cell_width$}"),
            Style::default().fg(Color::Gray),
        ));
    }
    lines.push(TextLine::from(header));

    for (row, cells) in grid.rows.iter().zip(&grid.cells) {
        let mut spans = vec![Span::styled(
            format!("{row:>label_width$} "),
            Style::default().fg(Color::White),
        )];
        for value in cells {
            let color = HEAT_RAMP[stats::intensity_level(*value, HEAT_RAMP.len())];
            spans.push(Span::styled(" ".repeat(cell_width), Style::default().bg(color)));
        }
        lines.push(TextLine::from(spans));
    }

    lines.push(TextLine::from(""));
    let mut legend = vec![Span::styled("low ", Style::default().fg(Color::Gray))];
    legend.extend(
        HEAT_RAMP
            .iter()
            .map(|color| Span::styled("  ", Style::default().bg(*color))),
    );
    legend.push(Span::styled(
        format!(" high   peak {:.2}", grid.max()),
        Style::default().fg(Color::Gray),
    ));
    lines.push(TextLine::from(legend));

    f.render_widget(Paragraph::new(Text::from(lines)).block(panel(title)), area);
}

/// Text whisker plot of one box summary scaled into `width` columns over
/// `[0, scale]`.
pub fn whisker(stats: &BoxStats, scale: f64, width: usize) -> String {
    if width == 0 || scale <= 0.0 {
        return String::new();
    }
    let last = (width - 1) as f64;
    let at = |value: f64| ((value / scale) * last).round().clamp(0.0, last) as usize;
    let (min, q1, median, q3, max) = (
        at(stats.min),
        at(stats.q1),
        at(stats.median),
        at(stats.q3),
        at(stats.max),
    );
    (0..width)
        .map(|column| {
            if column == median {
                '┃'
            } else if (q1..=q3).contains(&column) {
                '█'
            } else if (min..=max).contains(&column) {
                '─'
            } else {
                ' '
            }
        })
        .collect()
}

fn render_box_summary(f: &mut Frame<'_>, area: Rect, title: &str, rows: &[BoxStats]) {
    let scale = rows.iter().map(|row| row.max).fold(0.0, f64::max);
    let body = rows.iter().enumerate().map(|(index, row)| {
        Row::new(vec![
            Cell::from(row.area),
            Cell::from(format!("{:.0}", row.min)),
            Cell::from(format!("{:.0}", row.q1)),
            Cell::from(format!("{:.0}", row.median)),
            Cell::from(format!("{:.0}", row.q3)),
            Cell::from(format!("{:.0}", row.max)),
            Cell::from(Span::styled(
                whisker(row, scale, 30),
                Style::default().fg(SERIES_COLORS[index % SERIES_COLORS.len()]),
            )),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(16),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(30),
        ],
    )
    .header(header_row(&["Area", "Min", "Q1", "Med", "Q3", "Max", "Stay (min)"]))
    .block(panel(title))
    .column_spacing(1);

    f.render_widget(table, area);
}

fn render_metrics(f: &mut Frame<'_>, area: Rect, title: &str, data: &[Datum]) {
    let block = panel(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if data.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, data.len() as u32); data.len()];
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for ((index, datum), card) in data.iter().enumerate().zip(cards.iter()) {
        let color = SERIES_COLORS[index % SERIES_COLORS.len()];
        let paragraph = Paragraph::new(Text::from(vec![
            TextLine::from(""),
            TextLine::from(Span::styled(
                datum.value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(
                datum.label.clone(),
                Style::default().fg(Color::Gray),
            )),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(paragraph, *card);
    }
}

fn render_composed(f: &mut Frame<'_>, area: Rect, title: &str, rows: &[HourlyActivity]) {
    let moves = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (index as f64, f64::from(row.moves)))
        .collect::<Vec<_>>();
    let stay = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (index as f64, f64::from(row.stay)))
        .collect::<Vec<_>>();
    let labels = rows.iter().map(|row| row.hour.clone()).collect::<Vec<_>>();
    let peak = rows
        .iter()
        .map(|row| row.moves.max(row.stay))
        .max()
        .unwrap_or(0)
        .max(1);
    let top = f64::from(peak) * 1.1;

    let datasets = vec![
        Dataset::default()
            .name("Moves")
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(SERIES_COLORS[0]))
            .data(&moves),
        Dataset::default()
            .name("Stay (min)")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SERIES_COLORS[3]))
            .data(&stay),
    ];

    let chart = Chart::new(datasets)
        .block(panel(title))
        .x_axis(
            Axis::default()
                .title("Hour")
                .style(Style::default().fg(Color::Gray))
                .bounds([-0.5, rows.len() as f64 - 0.5])
                .labels(sparse_labels(&labels)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, top])
                .labels(vec![Span::raw("0"), Span::raw(format!("{top:.0}"))]),
        );

    f.render_widget(chart, area);
}

pub const fn stay_status_color(status: StayStatus) -> Color {
    match status {
        StayStatus::Attention => Color::Red,
        StayStatus::Focused => Color::Yellow,
        StayStatus::Normal => Color::Green,
    }
}

fn render_continuous_stay(f: &mut Frame<'_>, area: Rect, title: &str, rows: &[StayRecord]) {
    let body = rows.iter().map(|row| {
        let style = if row.abnormal {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(row.identifier.clone()),
            Cell::from(row.area),
            Cell::from(format!("{} min", row.minutes)),
            Cell::from(Span::styled(
                row.status.label(),
                Style::default().fg(stay_status_color(row.status)),
            )),
        ])
        .style(style)
    });

    let table = Table::new(
        body,
        [
            Constraint::Min(24),
            Constraint::Length(16),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(header_row(&["GUID", "Area", "Stay", "Status"]))
    .block(panel(title))
    .column_spacing(1);

    f.render_widget(table, area);
}

pub const fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::High => Color::Red,
        Severity::Medium => Color::Yellow,
    }
}

fn render_anomalies(f: &mut Frame<'_>, area: Rect, title: &str, rows: &[Anomaly]) {
    if rows.is_empty() {
        render_message(f, area, title, "No anomalies detected");
        return;
    }

    let body = rows.iter().map(|row| {
        let color = severity_color(row.severity);
        Row::new(vec![
            Cell::from(row.time),
            Cell::from(row.identifier.clone()),
            Cell::from(Span::styled(row.kind, Style::default().fg(color))),
            Cell::from(row.description),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(6),
            Constraint::Length(24),
            Constraint::Length(28),
            Constraint::Min(20),
        ],
    )
    .header(header_row(&["Time", "GUID", "Type", "Details"]))
    .block(panel(title))
    .column_spacing(1);

    f.render_widget(table, area);
}
