use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::Frame;

const RIPPLES: u32 = 3;

/// Ripple radii as fractions of the full radius for an animation counter in
/// [0, 2*PI). Each ripple expands outward and wraps back to the centre.
pub fn ripple_fractions(animation: f64) -> [f64; RIPPLES as usize] {
    let base = animation / (2.0 * std::f64::consts::PI);
    let mut fractions = [0.0; RIPPLES as usize];
    for (index, fraction) in fractions.iter_mut().enumerate() {
        *fraction = (base + index as f64 / f64::from(RIPPLES)).fract();
    }
    fractions
}

/// Pulsing positioning beacon shown in the title bar.
pub fn render_beacon(f: &mut Frame<'_>, area: Rect, animation: f64) {
    if area.width < 4 || area.height < 4 {
        return;
    }

    let size = area.width.min(area.height * 2);
    let square = Rect {
        x: area.x + (area.width - size) / 2,
        y: area.y,
        width: size,
        height: area.height,
    };

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                let center_x = 50.0;
                let center_y = 50.0;
                let radius = 45.0;

                // Room outline the beacon sits in
                for (x1, y1, x2, y2) in [
                    (10.0, 10.0, 90.0, 10.0),
                    (90.0, 10.0, 90.0, 90.0),
                    (90.0, 90.0, 10.0, 90.0),
                    (10.0, 90.0, 10.0, 10.0),
                ] {
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: Color::DarkGray,
                    });
                }

                for fraction in ripple_fractions(animation) {
                    let color = if fraction < 0.5 {
                        Color::LightCyan
                    } else {
                        Color::Cyan
                    };
                    ctx.draw(&Circle {
                        x: center_x,
                        y: center_y,
                        radius: radius * fraction,
                        color,
                    });
                }

                ctx.draw(&Circle {
                    x: center_x,
                    y: center_y,
                    radius: 3.0,
                    color: Color::Rgb(0xff, 0x98, 0x00),
                });
            })
            .x_bounds([0.0, 100.0])
            .y_bounds([0.0, 100.0]),
        square,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripples_are_evenly_spaced() {
        let fractions = ripple_fractions(0.0);
        assert!((fractions[0] - 0.0).abs() < 1e-9);
        assert!((fractions[1] - 1.0 / 3.0).abs() < 1e-9);
        assert!((fractions[2] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn ripples_stay_inside_the_unit_radius() {
        for step in 0..64 {
            let animation = f64::from(step) * 0.1;
            for fraction in ripple_fractions(animation) {
                assert!((0.0..1.0).contains(&fraction));
            }
        }
    }
}
