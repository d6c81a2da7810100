use crate::app::{App, FilterField, Focus};
use crate::ui::screens::help::render_help_popup;
use crate::ui::widgets::beacon::render_beacon;
use crate::ui::widgets::charts::render_stat_view;
use crate::ui::widgets::floor_map::render_floor_map;
use crate::ui::widgets::tables::scroll_offset;
use indoor_analytics::catalog;
use indoor_analytics::dispatch::Visual;
use indoor_analytics::domain::ModeFamily;
use indoor_analytics::filter::{FilterSnapshot, ALL_AREAS};
use indoor_analytics::registry::{self, ModeCategory, VisualizationMode};
use indoor_analytics::stats::{self, CalculationTargets};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Tabs, Wrap};
use ratatui::Frame;

const FILTER_PANEL_HEIGHT: u16 = 18;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Title area
            Constraint::Min(12),   // Content area
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title_section(app, f, layout[0]);
    render_content_section(app, f, layout[1]);
    render_status_section(app, f, layout[2]);
    render_shortcuts(f, layout[3]);

    if app.show_help {
        render_help_popup(f, f.area());
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// "Building A / 1F / All areas" with raw ids where the catalog has no name.
pub fn location_label(snapshot: &FilterSnapshot) -> String {
    let building = catalog::building(&snapshot.building_id)
        .map_or(snapshot.building_id.as_str(), |building| building.display_name);
    let floor = catalog::floor(&snapshot.building_id, &snapshot.floor_id)
        .map_or(snapshot.floor_id.as_str(), |floor| floor.display_name);
    let area = if snapshot.area_id == ALL_AREAS {
        "All areas"
    } else {
        catalog::area_name(&snapshot.building_id, &snapshot.floor_id, &snapshot.area_id)
            .unwrap_or(snapshot.area_id.as_str())
    };
    format!("{building} / {floor} / {area}")
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .title("== Indoor Analytics ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(title_block, area);

    let title_inner = area.inner(Margin::new(1, 1));
    let title_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(12)])
        .split(title_inner);

    let title_paragraph = Paragraph::new(Text::from(vec![
        TextLine::from(vec![
            Span::styled(
                "Indoor Positioning ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Analytics Dashboard",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        TextLine::from(Span::styled(
            location_label(&app.applied),
            Style::default().fg(Color::Gray),
        )),
        TextLine::from(Span::styled(
            format!(
                "{} to {} · {}-{}",
                app.applied.date_range.start,
                app.applied.date_range.end,
                app.applied.time_range.start,
                app.applied.time_range.end
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ]))
    .alignment(Alignment::Left);
    f.render_widget(title_paragraph, title_chunks[0]);

    render_beacon(f, title_chunks[1], app.pulse.beacon_phase());
}

fn render_content_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(40)])
        .split(area);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(FILTER_PANEL_HEIGHT),
        ])
        .split(columns[0]);

    render_family_tabs(app, f, sidebar[0]);
    render_mode_list(app, f, sidebar[1]);
    render_filter_panel(app, f, sidebar[2]);
    render_visual_panel(app, f, columns[1]);
}

fn render_family_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = [ModeFamily::Spatial, ModeFamily::Statistical]
        .iter()
        .map(|family| {
            TextLine::from(format!(
                "{} ({})",
                family.label(),
                registry::modes_in(*family).len()
            ))
        })
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.family().index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(app.focus == Focus::Modes)),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

/// Mode list lines grouped under category headers, with the line index of
/// the selected mode.
pub fn mode_list_lines(
    family: ModeFamily,
    selected: VisualizationMode,
) -> (Vec<TextLine<'static>>, usize) {
    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut current_category: Option<ModeCategory> = None;

    for descriptor in registry::modes_in(family) {
        if family == ModeFamily::Statistical && current_category != Some(descriptor.category) {
            current_category = Some(descriptor.category);
            lines.push(TextLine::from(Span::styled(
                descriptor.category.label(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        let is_selected = descriptor.mode == selected;
        if is_selected {
            selected_line = lines.len();
        }
        let style = if is_selected {
            selected_style()
        } else {
            Style::default().fg(Color::White)
        };
        let prefix = if is_selected { ">" } else { " " };
        lines.push(TextLine::from(Span::styled(
            format!("{prefix} {}", descriptor.label),
            style,
        )));
    }

    (lines, selected_line)
}

fn render_mode_list(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (lines, selected_line) = mode_list_lines(app.family(), app.mode());
    let visible = usize::from(area.height.saturating_sub(2));
    let offset = scroll_offset(lines.len(), visible, selected_line);
    let lines = lines.into_iter().skip(offset).take(visible).collect::<Vec<_>>();

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(" Visualizations ")
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Focus::Modes)),
    );
    f.render_widget(paragraph, area);
}

fn render_filter_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let edits = app.editor.current_edits();
    let focused = app.focus == Focus::Filters;
    let active_field = app.filter_field();
    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default().fg(Color::White);

    let mut lines = Vec::new();
    for field in FilterField::ALL {
        let is_active = focused && field == active_field;
        let value = if is_active && app.editing {
            let cursor = if app.pulse.beacon_phase().sin() > 0.0 { "_" } else { " " };
            format!("{}{cursor}", app.edit_buffer)
        } else if field == FilterField::Identifiers {
            let count = edits.selected_identifiers.len();
            if count == 0 {
                "all".to_string()
            } else {
                format!("{count} selected")
            }
        } else {
            field.value(edits)
        };

        let prefix = if is_active { ">" } else { " " };
        lines.push(TextLine::from(vec![
            Span::styled(
                format!("{prefix} {:<10}", field.label()),
                if is_active { selected_style() } else { label_style },
            ),
            Span::styled(format!(" {value}"), value_style),
        ]));

        if field == FilterField::Identifiers {
            lines.extend(identifier_lines(app, focused && active_field == field));
        }
    }

    let title = if edits == &app.applied {
        " Filters ".to_string()
    } else {
        " Filters (a to apply) ".to_string()
    };

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(focus_style(focused)),
    );
    f.render_widget(paragraph, area);
}

fn identifier_lines(app: &App, cursor_visible: bool) -> Vec<TextLine<'static>> {
    app.editor
        .available_identifiers()
        .into_iter()
        .enumerate()
        .map(|(index, identifier)| {
            let mark = if app.editor.is_selected(identifier) {
                "[x]"
            } else {
                "[ ]"
            };
            let style = if cursor_visible && index == app.identifier_cursor {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if app.editor.is_selected(identifier) {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            TextLine::from(Span::styled(
                format!("    {mark} {identifier} {}", catalog::alias_of(identifier)),
                style,
            ))
        })
        .collect()
}

fn render_visual_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let playback_visible = app.mode() == VisualizationMode::SteppedPlayback;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(if playback_visible { 1 } else { 0 }),
            Constraint::Min(8),
        ])
        .split(area);

    render_mode_header(app, f, chunks[0]);

    if playback_visible {
        let state = if app.playback.is_running() {
            "Playing"
        } else if app.playback.is_finished() {
            "Finished"
        } else {
            "Paused"
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Rgb(0xff, 0x98, 0x00)))
            .percent(u16::from(app.playback.progress()))
            .label(format!("{state} {}%", app.playback.progress()));
        f.render_widget(gauge, chunks[1]);
    }

    match app.visual() {
        Visual::Spatial(view) => render_floor_map(f, chunks[2], &view),
        Visual::Statistical(view) => render_stat_view(f, chunks[2], &view),
        Visual::Empty => {
            let paragraph = Paragraph::new("Nothing to display for this mode")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(paragraph, chunks[2]);
        }
    }
}

fn render_mode_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let descriptor = registry::descriptor_of(app.mode());
    let targets = CalculationTargets::from_snapshot(&app.applied);

    let mut lines = vec![
        TextLine::from(vec![
            Span::styled(
                descriptor.label,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", descriptor.category.label()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        TextLine::from(Span::styled(
            descriptor.description,
            Style::default().fg(Color::Gray),
        )),
        TextLine::from(vec![
            Span::styled("Targets: ", Style::default().fg(Color::Gray)),
            Span::styled(targets.summary(), Style::default().fg(Color::Green)),
        ]),
    ];

    if descriptor.category == ModeCategory::Temporal {
        lines.push(TextLine::from(vec![
            Span::styled("Days: ", Style::default().fg(Color::Gray)),
            Span::styled(
                stats::day_type_note(app.applied.day_type),
                Style::default().fg(Color::White),
            ),
        ]));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(paragraph, area);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(40)])
        .split(status_block.inner(area));
    f.render_widget(status_block, area);

    let status = Paragraph::new(Span::styled(
        app.status_message.clone(),
        Style::default().fg(Color::White),
    ));
    f.render_widget(status, chunks[0]);

    let selected = app.applied.selection_count();
    let counts = Paragraph::new(TextLine::from(vec![
        Span::styled("Records: ", Style::default().fg(Color::Gray)),
        Span::styled(
            app.record_count().to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled("  GUIDs: ", Style::default().fg(Color::Gray)),
        Span::styled(
            if selected == 0 {
                "all".to_string()
            } else {
                selected.to_string()
            },
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(counts, chunks[1]);
}

fn shortcut(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(
            key,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(action, Style::default().fg(Color::Gray)),
    ]
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let spans = [
        shortcut("Tab", ": Focus | "),
        shortcut("a", ": Apply | "),
        shortcut("R", ": Reset | "),
        shortcut("e", ": Export | "),
        shortcut("p", ": Play | "),
        shortcut("r", ": Regenerate | "),
        shortcut("?", ": Help | "),
        shortcut("q", ": Quit"),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();

    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center),
        area,
    );
}
