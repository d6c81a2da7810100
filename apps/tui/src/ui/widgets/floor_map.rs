use indoor_analytics::spatial::{
    self, GradientStop, PlanRect, Rgba, SpatialView, Surface, PLAN_HEIGHT, PLAN_WIDTH,
};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

const FILL_SPACING: f64 = 12.0;
const GRADIENT_RINGS: u32 = 6;
const MIN_VISIBLE_ALPHA: f64 = 0.05;

/// Terminal rendition of a plan colour. Alpha fades toward the background and
/// the dark wall/label tones are lifted so they stay readable on dark themes.
pub fn terminal_color(color: Rgba) -> Color {
    let luma = 0.114f64.mul_add(
        f64::from(color.b),
        0.299f64.mul_add(f64::from(color.r), 0.587 * f64::from(color.g)),
    ) / 255.0;
    let (r, g, b) = if luma < 0.35 {
        (0xb0, 0xb0, 0xb0)
    } else {
        (color.r, color.g, color.b)
    };
    let alpha = color.a.clamp(0.0, 1.0);
    let fade = |channel: u8| (f64::from(channel) * alpha).round() as u8;
    Color::Rgb(fade(r), fade(g), fade(b))
}

/// Adapts the canvas context to the plan's top-left origin.
pub struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
}

impl<'a, 'b> CanvasSurface<'a, 'b> {
    pub fn new(ctx: &'a mut Context<'b>) -> Self {
        Self { ctx }
    }
}

fn flip(y: f64) -> f64 {
    PLAN_HEIGHT - y
}

impl Surface for CanvasSurface<'_, '_> {
    fn stroke_rect(&mut self, rect: PlanRect, color: Rgba) {
        let color = terminal_color(color);
        let (left, right) = (rect.x, rect.x + rect.width);
        let (top, bottom) = (flip(rect.y), flip(rect.y + rect.height));
        for (x1, y1, x2, y2) in [
            (left, top, right, top),
            (right, top, right, bottom),
            (right, bottom, left, bottom),
            (left, bottom, left, top),
        ] {
            self.ctx.draw(&CanvasLine {
                x1,
                y1,
                x2,
                y2,
                color,
            });
        }
    }

    fn fill_rect(&mut self, rect: PlanRect, color: Rgba) {
        let mut coords = Vec::new();
        let mut y = rect.y + FILL_SPACING / 2.0;
        while y < rect.y + rect.height {
            let mut x = rect.x + FILL_SPACING / 2.0;
            while x < rect.x + rect.width {
                coords.push((x, flip(y)));
                x += FILL_SPACING;
            }
            y += FILL_SPACING;
        }
        self.ctx.draw(&Points {
            coords: &coords,
            color: terminal_color(color.with_alpha(color.a * 0.3)),
        });
    }

    fn text(&mut self, x: f64, y: f64, text: &str, color: Rgba) {
        self.ctx.print(
            x,
            flip(y),
            Span::styled(text.to_string(), Style::default().fg(terminal_color(color))),
        );
    }

    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        let color = terminal_color(color);
        let mut r = radius;
        while r > 0.0 {
            self.ctx.draw(&Circle {
                x,
                y: flip(y),
                radius: r,
                color,
            });
            r -= 1.5;
        }
        self.ctx.draw(&Points {
            coords: &[(x, flip(y))],
            color,
        });
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.ctx.draw(&Circle {
            x,
            y: flip(y),
            radius,
            color: terminal_color(color),
        });
    }

    /// Drawn as concentric rings, outermost first so the core stays on top.
    fn radial_gradient(&mut self, x: f64, y: f64, radius: f64, stops: &[GradientStop]) {
        for ring in (1..=GRADIENT_RINGS).rev() {
            let offset = f64::from(ring) / f64::from(GRADIENT_RINGS);
            let color = gradient_at(stops, offset);
            if color.a < MIN_VISIBLE_ALPHA {
                continue;
            }
            self.ctx.draw(&Circle {
                x,
                y: flip(y),
                radius: radius * offset,
                color: terminal_color(color),
            });
        }
    }

    fn polyline(&mut self, points: &[(f64, f64)], color: Rgba) {
        let color = terminal_color(color);
        for pair in points.windows(2) {
            let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
            self.ctx.draw(&CanvasLine {
                x1,
                y1: flip(y1),
                x2,
                y2: flip(y2),
                color,
            });
        }
    }
}

/// Colour at `offset` in [0, 1], interpolated between the surrounding stops.
pub fn gradient_at(stops: &[GradientStop], offset: f64) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::opaque(0, 0, 0).with_alpha(0.0);
    };
    let mut previous = first;
    for stop in stops {
        if offset <= stop.offset {
            let span = stop.offset - previous.offset;
            let t = if span > 0.0 {
                (offset - previous.offset) / span
            } else {
                1.0
            };
            return mix(previous.color, stop.color, t);
        }
        previous = stop;
    }
    previous.color
}

fn mix(from: Rgba, to: Rgba, t: f64) -> Rgba {
    let lerp = |a: u8, b: u8| t.mul_add(f64::from(b) - f64::from(a), f64::from(a)).round() as u8;
    Rgba {
        r: lerp(from.r, to.r),
        g: lerp(from.g, to.g),
        b: lerp(from.b, to.b),
        a: t.mul_add(to.a - from.a, from.a),
    }
}

pub fn render_floor_map(f: &mut Frame<'_>, area: Rect, view: &SpatialView) {
    let block = Block::default()
        .title(format!(" {} ", view.overlay.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, PLAN_WIDTH])
        .y_bounds([0.0, PLAN_HEIGHT])
        .paint(|ctx| {
            let mut surface = CanvasSurface::new(ctx);
            spatial::draw(Some(&mut surface), view);
        });

    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoor_analytics::spatial::density_stops;

    #[test]
    fn transparent_colors_fade_to_black() {
        let color = Rgba::opaque(0xff, 0x80, 0x00).with_alpha(0.0);
        assert_eq!(terminal_color(color), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn dark_plan_colors_are_lifted() {
        assert_eq!(
            terminal_color(spatial::WALL),
            Color::Rgb(0xb0, 0xb0, 0xb0)
        );
    }

    #[test]
    fn gradient_interpolates_between_stops() {
        let stops = density_stops(1.0);
        let core = gradient_at(&stops, 0.0);
        assert!((core.a - 0.8).abs() < 1e-9);
        let middle = gradient_at(&stops, 0.25);
        assert!((middle.a - 0.6).abs() < 1e-9);
        assert!(gradient_at(&stops, 1.0).a.abs() < 1e-9);
    }
}
