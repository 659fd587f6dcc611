use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::scheduler::{self, SharedDial};
use crate::gui::theme;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;

pub struct AppModel {
    pub dial: SharedDial,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Start,
    Stop,
    Toggle,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Start => AppMsg::Start,
            AppEvent::Stop => AppMsg::Stop,
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Dial"),
            add_css_class: "dial-window",

            #[local_ref]
            drawing_area -> gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "dial-drawing-area",
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();
        root.set_default_size(config.min_width, config.min_height);

        let area = gtk::DrawingArea::default();
        let model = AppModel {
            dial: scheduler::shared_dial(config, &area),
            drawing_area: area,
        };

        let drawing_area = &model.drawing_area;
        let widgets = view_output!();

        let dial = model.dial.clone();
        model.drawing_area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = dial.borrow().on_draw(cr) {
                log::error!("Drawing error: {}", e);
            }
        });

        let dial = model.dial.clone();
        model.drawing_area.connect_resize(move |_, width, height| {
            let mut dial = dial.borrow_mut();
            let padding = dial.config().padding;
            dial.on_size_changed(width as f64, height as f64, padding);
        });

        let dial = model.dial.clone();
        model.drawing_area.connect_realize(move |_| {
            dial.borrow_mut().on_attached();
        });

        let dial = model.dial.clone();
        model.drawing_area.connect_unrealize(move |_| {
            dial.borrow_mut().on_detached();
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Start => self.dial.borrow_mut().start_tick(),
            AppMsg::Stop => self.dial.borrow_mut().stop_tick(),
            AppMsg::Toggle => self.dial.borrow_mut().toggle_tick(),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    scheduler::rebuild(&self.dial, new_config, &self.drawing_area);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
