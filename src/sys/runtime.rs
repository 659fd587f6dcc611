use crate::events::AppEvent;
use crate::sys::{server, watcher};
use async_channel::Sender;
use std::io;
use std::thread;

/// Runs the control socket and the config watcher on a dedicated thread.
///
/// Both services share one single-threaded runtime; the thread lives as long as
/// either of them does.
pub fn start_background_services(tx: Sender<AppEvent>) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("dial-services".into())
        .spawn(move || {
            runtime.block_on(async {
                tokio::join!(server::run_server(tx.clone()), watcher::run(tx));
            });
            log::info!("Background services stopped");
        })?;
    Ok(())
}
