use crate::config::{Config, Variant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotates `self` clockwise (y-down) by `degrees` around `center`.
    pub fn rotate_around(self, center: Point, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (dx, dy) = (self.x - center.x, self.y - center.y);
        Self::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Padding {
    pub fn uniform(v: f64) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub center: Point,
    pub radius: f64,
}

impl Geometry {
    /// Places the circle on a `width` x `height` surface.
    ///
    /// Clock scales half the shorter side by `frame_radius_scale` and ignores
    /// padding. Dial fills the padded area. Degenerate surfaces give radius 0.
    pub fn resolve(width: f64, height: f64, padding: Padding, config: &Config) -> Self {
        let geometry = match config.variant {
            Variant::Clock => Self {
                center: Point::new(width / 2.0, height / 2.0),
                radius: width.min(height) * config.frame_radius_scale / 2.0,
            },
            Variant::Dial => {
                let usable_width = width - (padding.left + padding.right);
                let usable_height = height - (padding.top + padding.bottom);
                Self {
                    center: Point::new(
                        padding.left + usable_width / 2.0,
                        padding.top + usable_height / 2.0,
                    ),
                    radius: usable_width.min(usable_height) / 2.0,
                }
            }
        };
        geometry.sanitized()
    }

    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0
    }

    fn sanitized(self) -> Self {
        if self.radius.is_finite() && self.radius > 0.0 {
            self
        } else {
            Self {
                radius: 0.0,
                ..self
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_clock_uses_scaled_shorter_side() {
        let config = Config {
            frame_radius_scale: 0.8,
            ..Config::default()
        };
        let g = Geometry::resolve(200.0, 300.0, Padding::uniform(25.0), &config);

        assert!(approx(g.radius, 80.0));
        assert_eq!(g.center, Point::new(100.0, 150.0));
    }

    #[test]
    fn test_dial_fills_padded_area() {
        let config = Config {
            variant: Variant::Dial,
            ..Config::default()
        };
        let padding = Padding {
            left: 10.0,
            top: 20.0,
            right: 30.0,
            bottom: 0.0,
        };
        let g = Geometry::resolve(240.0, 300.0, padding, &config);

        // usable area is 200 x 280
        assert!(approx(g.radius, 100.0));
        assert_eq!(g.center, Point::new(110.0, 160.0));
    }

    #[test]
    fn test_degenerate_surfaces_give_zero_radius() {
        let dial = Config {
            variant: Variant::Dial,
            ..Config::default()
        };
        assert_eq!(Geometry::resolve(0.0, 0.0, Padding::default(), &Config::default()).radius, 0.0);
        assert_eq!(Geometry::resolve(-5.0, 100.0, Padding::default(), &Config::default()).radius, 0.0);
        assert!(Geometry::resolve(20.0, 20.0, Padding::uniform(15.0), &dial).is_degenerate());
    }

    #[test]
    fn test_rotate_around_quarter_turn_is_clockwise() {
        let center = Point::new(50.0, 50.0);
        let top = Point::new(50.0, 10.0);
        let right = top.rotate_around(center, 90.0);

        assert!(approx(right.x, 90.0));
        assert!(approx(right.y, 50.0));
    }
}
