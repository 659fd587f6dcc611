use super::scheduler::Scheduler;
use super::{BOUNDARY_EPSILON, FULL_TURN, SWEEP_WRAP};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Nothing scheduled.
    #[default]
    Idle,
    /// Advancing every run interval.
    Running,
    /// Advancing every stop interval until the sweep lands on a lap boundary.
    Stopping,
}

/// The swept angle and its run/stop cadence.
///
/// At most one tick is pending at any time and its handle lives in `pending`.
/// `Idle` is the only mode without one.
#[derive(Debug)]
pub struct AngleEngine<H> {
    sweep: f64,
    mode: Mode,
    active: bool,
    step: f64,
    run_interval: Duration,
    stop_interval: Duration,
    pending: Option<H>,
}

impl<H> AngleEngine<H> {
    /// A non-finite `step` is treated as 0, leaving the sweep where it is.
    pub fn new(step: f64, run_interval: Duration, stop_interval: Duration, active: bool) -> Self {
        Self {
            sweep: 0.0,
            mode: Mode::Idle,
            active,
            step: if step.is_finite() { step } else { 0.0 },
            run_interval,
            stop_interval,
            pending: None,
        }
    }

    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the host asked for the dial to run. Survives detach.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn start<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<Handle = H>,
    {
        self.active = true;
        if self.mode == Mode::Running {
            return;
        }
        self.cancel_pending(scheduler);
        self.set_mode(Mode::Running);
        self.pending = Some(scheduler.schedule_after(Duration::ZERO));
    }

    pub fn stop<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<Handle = H>,
    {
        self.active = false;
        if self.mode != Mode::Running {
            return;
        }
        self.cancel_pending(scheduler);
        self.set_mode(Mode::Stopping);
        self.pending = Some(scheduler.schedule_after(Duration::ZERO));
    }

    /// Runs the callback that just fired: advance, redraw, reschedule.
    pub fn tick<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<Handle = H>,
    {
        // the fired callback is gone, only forget its handle
        self.pending = None;

        match self.mode {
            Mode::Idle => {
                log::debug!("Ignoring tick while idle");
            }
            Mode::Running => {
                self.sweep = wrap(self.sweep + self.step);
                scheduler.request_redraw();
                self.pending = Some(scheduler.schedule_after(self.run_interval));
            }
            Mode::Stopping => {
                if self.step <= 0.0 {
                    self.set_mode(Mode::Idle);
                    return;
                }
                self.sweep = self.coast();
                scheduler.request_redraw();
                if self.sweep % FULL_TURN == 0.0 {
                    self.set_mode(Mode::Idle);
                } else {
                    self.pending = Some(scheduler.schedule_after(self.stop_interval));
                }
            }
        }
    }

    /// Resets the sweep for a freshly attached surface and resumes if active.
    pub fn attach<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<Handle = H>,
    {
        self.sweep = 0.0;
        if self.active {
            self.start(scheduler);
        }
    }

    /// Cancels whatever is pending. The active flag is kept for the next attach.
    pub fn detach<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<Handle = H>,
    {
        self.cancel_pending(scheduler);
        self.set_mode(Mode::Idle);
    }

    /// Next stopping position: one step forward, clamped to the next lap boundary.
    fn coast(&self) -> f64 {
        let boundary = ((self.sweep / FULL_TURN).floor() + 1.0) * FULL_TURN;
        let next = self.sweep + self.step;
        if next >= boundary - BOUNDARY_EPSILON {
            boundary % SWEEP_WRAP
        } else {
            next
        }
    }

    fn cancel_pending<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<Handle = H>,
    {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::debug!("Angle engine {:?} -> {:?} at {}°", self.mode, mode, self.sweep);
            self.mode = mode;
        }
    }
}

/// Folds an angle into `[0, 720)`, snapping float drift onto lap boundaries.
pub fn wrap(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(SWEEP_WRAP);
    let nearest = (wrapped / FULL_TURN).round() * FULL_TURN;
    if (wrapped - nearest).abs() < BOUNDARY_EPSILON {
        nearest % SWEEP_WRAP
    } else {
        wrapped
    }
}
