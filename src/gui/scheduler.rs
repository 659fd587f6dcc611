use crate::config::Config;
use crate::dial::{Dial, Scheduler};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

pub type SharedDial = Rc<RefCell<Dial<GlibScheduler>>>;

/// Runs dial ticks on the glib main loop and redraws a `DrawingArea`.
///
/// Timers only hold a weak reference, so a dropped dial never gets ticked.
pub struct GlibScheduler {
    target: Weak<RefCell<Dial<GlibScheduler>>>,
    drawing_area: gtk::DrawingArea,
}

impl GlibScheduler {
    pub fn new(target: Weak<RefCell<Dial<GlibScheduler>>>, drawing_area: &gtk::DrawingArea) -> Self {
        Self {
            target,
            drawing_area: drawing_area.clone(),
        }
    }
}

impl Scheduler for GlibScheduler {
    type Handle = glib::SourceId;

    fn schedule_after(&mut self, delay: Duration) -> glib::SourceId {
        let target = self.target.clone();
        glib::timeout_add_local_once(delay, move || {
            if let Some(dial) = target.upgrade() {
                dial.borrow_mut().tick();
            }
        })
    }

    fn cancel(&mut self, handle: glib::SourceId) {
        handle.remove();
    }

    fn request_redraw(&mut self) {
        self.drawing_area.queue_draw();
    }
}

pub fn shared_dial(config: Config, drawing_area: &gtk::DrawingArea) -> SharedDial {
    Rc::new_cyclic(|weak| {
        RefCell::new(Dial::new(config, GlibScheduler::new(weak.clone(), drawing_area)))
    })
}

/// Applies a reloaded `config`, keeping the surface and the active flag.
pub fn rebuild(dial: &SharedDial, config: Config, drawing_area: &gtk::DrawingArea) {
    let mut current = dial.borrow_mut();
    current.reconfigure(config);
    let padding = current.config().padding;
    current.on_size_changed(
        drawing_area.width() as f64,
        drawing_area.height() as f64,
        padding,
    );
}
