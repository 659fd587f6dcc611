use super::engine::{AngleEngine, Mode};
use super::geometry::{Geometry, Padding};
use super::scheduler::Scheduler;
use super::view::{self, DrawCommand};
use crate::config::Config;
use cairo::Context;

/// One dial widget: its configuration, placement, angle state and scheduler.
///
/// The host calls the lifecycle hooks (`on_attached`, `on_detached`,
/// `on_size_changed`), the control hooks (`start_tick`, `stop_tick`), forwards
/// fired timers to `tick` and paints with `on_draw`.
pub struct Dial<S: Scheduler> {
    config: Config,
    geometry: Geometry,
    engine: AngleEngine<S::Handle>,
    scheduler: S,
    surface: (f64, f64),
    attached: bool,
}

impl<S: Scheduler> Dial<S> {
    pub fn new(config: Config, scheduler: S) -> Self {
        let engine = engine_for(&config, config.autostart);
        Self {
            config,
            geometry: Geometry::default(),
            engine,
            scheduler,
            surface: (0.0, 0.0),
            attached: false,
        }
    }

    /// Replaces the configuration with `config`.
    ///
    /// The active flag, surface size and attachment carry over; `autostart` only
    /// applies to a fresh dial. Padding is taken from the new record. An attached
    /// dial restarts from a zero sweep.
    pub fn reconfigure(&mut self, config: Config) {
        let active = self.engine.is_active();
        self.engine.detach(&mut self.scheduler);
        self.engine = engine_for(&config, active);
        self.config = config;

        let (width, height) = self.surface;
        self.on_size_changed(width, height, self.config.padding);
        if self.attached {
            self.engine.attach(&mut self.scheduler);
        }
        self.scheduler.request_redraw();
        log::debug!("Dial reconfigured, active: {active}");
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn sweep(&self) -> f64 {
        self.engine.sweep()
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn on_attached(&mut self) {
        log::debug!("Dial attached");
        self.attached = true;
        self.engine.attach(&mut self.scheduler);
    }

    pub fn on_detached(&mut self) {
        log::debug!("Dial detached");
        self.attached = false;
        self.engine.detach(&mut self.scheduler);
    }

    pub fn on_size_changed(&mut self, width: f64, height: f64, padding: Padding) {
        self.surface = (width, height);
        self.geometry = Geometry::resolve(width, height, padding, &self.config);
    }

    pub fn start_tick(&mut self) {
        self.engine.start(&mut self.scheduler);
    }

    pub fn stop_tick(&mut self) {
        self.engine.stop(&mut self.scheduler);
    }

    pub fn toggle_tick(&mut self) {
        if self.engine.mode() == Mode::Running {
            self.stop_tick();
        } else {
            self.start_tick();
        }
    }

    /// Entry point for a fired timer.
    pub fn tick(&mut self) {
        self.engine.tick(&mut self.scheduler);
    }

    pub fn render(&self) -> Vec<DrawCommand> {
        view::render(&self.geometry, self.engine.sweep(), &self.config)
    }

    pub fn on_draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        view::paint(cr, &self.render())
    }

    /// Gives the scheduler back, cancelling anything still pending.
    pub fn into_scheduler(mut self) -> S {
        self.engine.detach(&mut self.scheduler);
        self.scheduler
    }
}

fn engine_for<H>(config: &Config, active: bool) -> AngleEngine<H> {
    AngleEngine::new(
        config.tick_layout().step_degrees(),
        config.run_interval(),
        config.stop_run_interval(),
        active,
    )
}
