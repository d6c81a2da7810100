use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(Text::from(TextLine::from(vec![Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    )])))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn key_line(key: &'static str, description: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" - {description}")),
    ])
}

fn section(title: &'static str) -> TextLine<'static> {
    TextLine::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

pub fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Indoor Positioning Analytics",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Pick a location, period and GUIDs in the filter panel, apply them, then browse the map and chart views.",
        ),
        TextLine::from(""),
        section("Global:"),
        key_line("Tab", "Switch focus between visualizations and filters"),
        key_line("a", "Apply the edited filters"),
        key_line("R", "Reset the edited filters to defaults"),
        key_line("e", "Export the applied filters and mode as JSON"),
        key_line("r", "Regenerate the chart data"),
        key_line("p / x", "Play-pause / rewind the animation map"),
        key_line("? / F1", "Toggle this help popup"),
        key_line("q", "Quit application"),
        TextLine::from(""),
        section("Visualizations panel:"),
        key_line("Up/Down", "Previous / next mode"),
        key_line("Left/Right", "Switch between Maps and Charts"),
        key_line("1 / 2", "Jump to Maps / Charts"),
        key_line("Space", "Pause/resume animations"),
        TextLine::from(""),
        section("Filters panel:"),
        key_line("Up/Down", "Move between fields"),
        key_line("Left/Right", "Cycle building, floor, area, day type or the GUID cursor"),
        key_line(
            "Enter / Space",
            "Edit a date, time or stay field; cycle an option; toggle the highlighted GUID",
        ),
        key_line("Esc", "Cancel an edit"),
        TextLine::from(""),
        section("CLI Options:"),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_cli_flags_after_the_keys() {
        let lines = build_help_lines()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        let keys = lines.iter().position(|line| line.contains("Apply the edited filters"));
        let flags = lines.iter().position(|line| line.contains("--headless"));
        assert!(keys.unwrap() < flags.unwrap());
    }
}
