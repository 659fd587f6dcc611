use clap::{Parser, Subcommand};
use dial::config;
use dial::gui::app::AppModel;
use dial::sys::{runtime, server, snapshot};
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dial", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Start the sweep of a running dial
    Start,
    /// Let a running dial coast to a stop
    Stop,
    /// Start or stop, whichever applies
    Toggle,
    /// Re-read the config file
    Reload,
    /// Write the default config file if none exists
    InitConfig,
    /// Render a single frame to a PNG file
    Snapshot {
        output: PathBuf,

        /// Swept angle in degrees
        #[arg(short, long, default_value_t = 90.0)]
        sweep: f64,

        /// Image width and height in pixels
        #[arg(long, default_value_t = 240)]
        size: i32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Start) => server::send_command("start"),
        Some(Commands::Stop) => server::send_command("stop"),
        Some(Commands::Toggle) => server::send_command("toggle"),
        Some(Commands::Reload) => server::send_command("reload"),
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        Some(Commands::Snapshot {
            output,
            sweep,
            size,
        }) => {
            snapshot::write_png(&config::load_or_default(), sweep, size, &output)?;
            Ok(())
        }
        None => {
            run_gui();
            Ok(())
        }
    }
}

fn run_gui() {
    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    if let Err(e) = runtime::start_background_services(tx) {
        log::error!("Failed to start background services: {}", e);
    }

    let app = RelmApp::new("org.dial.dial").with_args(Vec::new());

    app.run::<AppModel>((config, rx));
}
