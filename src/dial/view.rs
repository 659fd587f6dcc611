use super::geometry::{Geometry, Point};
use super::{FULL_TURN, START_OFFSET};
use crate::config::{Config, TickLayout};
use cairo::{Antialias, Context};
use palette::Srgba;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Srgba<f64>,
    pub width: f64,
    pub antialias: bool,
}

impl Stroke {
    fn new(color: Srgba<f64>, width: f64) -> Self {
        Self {
            color,
            width,
            antialias: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    pub index: usize,
    pub major: bool,
    pub from: Point,
    pub to: Point,
    pub stroke: Stroke,
}

/// One stroked primitive. Angles are degrees, clockwise, 0 at 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Tick(TickMark),
    Circle {
        center: Point,
        radius: f64,
        stroke: Stroke,
    },
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        extent: f64,
        stroke: Stroke,
    },
}

/// Start and extent of the progress arc for a sweep in `[0, 720)`.
///
/// Up to one lap the arc grows from 12 o'clock. Past it, the arc starts at the
/// overshoot and spans the rest of the circle, so it retreats towards 12 o'clock.
pub fn progress_arc(sweep: f64) -> (f64, f64) {
    if sweep <= FULL_TURN {
        (0.0, sweep)
    } else {
        let overshoot = sweep % FULL_TURN;
        (overshoot, FULL_TURN - overshoot)
    }
}

struct FrameRenderer<'a> {
    geometry: &'a Geometry,
    sweep: f64,
    config: &'a Config,
}

impl<'a> FrameRenderer<'a> {
    fn new(geometry: &'a Geometry, sweep: f64, config: &'a Config) -> Self {
        Self {
            geometry,
            sweep,
            config,
        }
    }

    fn render(&self) -> Vec<DrawCommand> {
        if self.geometry.is_degenerate() {
            return Vec::new();
        }
        let mut commands = self.ticks();
        commands.extend(self.frame_circle());
        commands.extend(self.progress());
        commands
    }

    /// Ticks start on the circle edge at 12 o'clock and point inwards.
    fn ticks(&self) -> Vec<DrawCommand> {
        let layout: TickLayout = self.config.tick_layout();
        let step = layout.step_degrees();
        let center = self.geometry.center;
        let start = Point::new(center.x, center.y - self.geometry.radius);
        let color = *self.config.calibration_color;
        let minor = Stroke::new(color, self.config.calibration_stroke_width);
        let major = Stroke::new(color, self.config.calibration2_stroke_width);
        let minor_len = self.config.frame_stroke_width * self.config.calibration_scale;
        let major_len = self.config.frame_stroke_width * self.config.calibration2_scale;

        (0..layout.total())
            .map(|index| {
                let is_major = layout.is_major(index);
                let len = if is_major { major_len } else { minor_len };
                let angle = index as f64 * step;
                DrawCommand::Tick(TickMark {
                    index,
                    major: is_major,
                    from: start.rotate_around(center, angle),
                    to: Point::new(start.x, start.y + len).rotate_around(center, angle),
                    stroke: if is_major { major } else { minor },
                })
            })
            .collect()
    }

    fn inset_radius(&self) -> Option<f64> {
        let radius = self.geometry.radius - self.config.frame_stroke_width / 2.0;
        (radius > 0.0).then_some(radius)
    }

    fn frame_circle(&self) -> Option<DrawCommand> {
        Some(DrawCommand::Circle {
            center: self.geometry.center,
            radius: self.inset_radius()?,
            stroke: Stroke::new(*self.config.frame_color, self.config.frame_stroke_width),
        })
    }

    fn progress(&self) -> Option<DrawCommand> {
        let radius = self.inset_radius()?;
        let (start, extent) = progress_arc(self.sweep);
        (extent > 0.0).then(|| DrawCommand::Arc {
            center: self.geometry.center,
            radius,
            start,
            extent,
            stroke: Stroke::new(*self.config.frame_cover_color, self.config.frame_stroke_width),
        })
    }
}

/// Draw commands for one frame, bottom to top: ticks, frame circle, progress arc.
pub fn render(geometry: &Geometry, sweep: f64, config: &Config) -> Vec<DrawCommand> {
    FrameRenderer::new(geometry, sweep, config).render()
}

pub fn paint(cr: &Context, commands: &[DrawCommand]) -> Result<(), cairo::Error> {
    cr.save()?;
    for command in commands {
        cr.new_path();
        match *command {
            DrawCommand::Tick(tick) => {
                apply_stroke(cr, &tick.stroke);
                cr.move_to(tick.from.x, tick.from.y);
                cr.line_to(tick.to.x, tick.to.y);
                cr.stroke()?;
            }
            DrawCommand::Circle {
                center,
                radius,
                stroke,
            } => {
                apply_stroke(cr, &stroke);
                cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
                cr.stroke()?;
            }
            DrawCommand::Arc {
                center,
                radius,
                start,
                extent,
                stroke,
            } => {
                apply_stroke(cr, &stroke);
                let from = (START_OFFSET + start).to_radians();
                cr.arc(center.x, center.y, radius, from, from + extent.to_radians());
                cr.stroke()?;
            }
        }
    }
    cr.restore()
}

fn apply_stroke(cr: &Context, stroke: &Stroke) {
    let (r, g, b, a) = stroke.color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(stroke.width);
    cr.set_antialias(if stroke.antialias {
        Antialias::Default
    } else {
        Antialias::None
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::dial::geometry::Padding;

    fn geometry() -> Geometry {
        Geometry::resolve(200.0, 200.0, Padding::default(), &Config::default())
    }

    fn ticks(commands: &[DrawCommand]) -> Vec<TickMark> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Tick(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_sixty_ticks_with_every_fifth_major() {
        let config = Config::default();
        let marks = ticks(&render(&geometry(), 0.0, &config));

        assert_eq!(marks.len(), 60);
        let majors: Vec<usize> = marks.iter().filter(|t| t.major).map(|t| t.index).collect();
        assert_eq!(majors, (0..60).step_by(5).collect::<Vec<_>>());
        assert!(marks.iter().filter(|t| t.major).all(|t| t.stroke.width == 3.0));
        assert!(marks.iter().filter(|t| !t.major).all(|t| t.stroke.width == 2.0));
    }

    #[test]
    fn test_first_tick_hangs_from_twelve_o_clock() {
        let config = Config::default();
        let marks = ticks(&render(&geometry(), 0.0, &config));
        let first = marks[0];

        assert_eq!(first.from, Point::new(100.0, 0.0));
        // major length = 15 * 0.5
        assert_eq!(first.to, Point::new(100.0, 7.5));

        let quarter = marks[15];
        assert!((quarter.from.x - 200.0).abs() < 1e-9);
        assert!((quarter.from.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_dial_variant_tick_count_from_degree() {
        let config = Config {
            variant: Variant::Dial,
            calibration_degree: 10.0,
            calibration_degree_interval: 3,
            ..Config::default()
        };
        let marks = ticks(&render(&geometry(), 0.0, &config));

        assert_eq!(marks.len(), 36);
        assert_eq!(marks.iter().filter(|t| t.major).count(), 12);
    }

    #[test]
    fn test_draw_order_is_ticks_then_circle_then_arc() {
        let commands = render(&geometry(), 90.0, &Config::default());

        assert!(matches!(commands[59], DrawCommand::Tick(_)));
        assert!(matches!(commands[60], DrawCommand::Circle { radius, .. } if radius == 92.5));
        assert!(matches!(
            commands[61],
            DrawCommand::Arc { start, extent, .. } if start == 0.0 && extent == 90.0
        ));
        assert_eq!(commands.len(), 62);
    }

    #[test]
    fn test_progress_arc_is_continuous_at_one_lap() {
        assert_eq!(progress_arc(0.0), (0.0, 0.0));
        assert_eq!(progress_arc(180.0), (0.0, 180.0));
        assert_eq!(progress_arc(360.0), (0.0, 360.0));
        assert_eq!(progress_arc(366.0), (6.0, 354.0));
        assert_eq!(progress_arc(714.0), (354.0, 6.0));

        let (start, extent) = progress_arc(360.0 + 1e-6);
        assert!(start > 0.0 && start < 1e-5);
        assert!((start + extent - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_sweep_draws_no_arc() {
        let commands = render(&geometry(), 0.0, &Config::default());
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Arc { .. })));
    }

    #[test]
    fn test_degenerate_geometry_draws_nothing() {
        let config = Config::default();
        let empty = Geometry::resolve(0.0, 0.0, Padding::default(), &config);
        assert!(render(&empty, 120.0, &config).is_empty());

        // radius smaller than half the stroke: ticks only
        let tiny = Geometry::resolve(10.0, 10.0, Padding::default(), &config);
        let commands = render(&tiny, 120.0, &config);
        assert_eq!(commands.len(), 60);
    }

    #[test]
    fn test_non_positive_layout_draws_zero_ticks() {
        let config = Config {
            calibration_count: 0,
            ..Config::default()
        };
        let commands = render(&geometry(), 30.0, &config);
        assert!(ticks(&commands).is_empty());
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn test_tiny_degree_is_capped() {
        let config = Config {
            variant: Variant::Dial,
            calibration_degree: 1e-9,
            ..Config::default()
        };
        let marks = ticks(&render(&geometry(), 0.0, &config));

        assert_eq!(marks.len(), crate::config::MAX_TICKS);
    }

    #[test]
    fn test_paint_to_image_surface() {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 64, 64).unwrap();
        let cr = Context::new(&surface).unwrap();
        let g = Geometry::resolve(64.0, 64.0, Padding::default(), &Config::default());

        paint(&cr, &render(&g, 500.0, &Config::default())).unwrap();
    }
}
