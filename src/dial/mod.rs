pub mod engine;
pub mod geometry;
pub mod model;
pub mod scheduler;
pub mod view;

pub use engine::{AngleEngine, Mode};
pub use geometry::{Geometry, Padding, Point};
pub use model::Dial;
pub use scheduler::{Scheduler, VirtualClock};
pub use view::{DrawCommand, paint, render};

pub const FULL_TURN: f64 = 360.0;
pub const SWEEP_WRAP: f64 = 720.0; // two laps, then the sweep wraps to 0
pub const START_OFFSET: f64 = -90.0; // 12 o'clock in cairo degrees
pub const BOUNDARY_EPSILON: f64 = 1e-6;
