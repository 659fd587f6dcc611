use crate::events::AppEvent;
use async_channel::Sender;
use std::io::Write;
use std::os::unix::net::UnixStream;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::UnixListener;

pub const SOCKET_PATH: &str = "/tmp/dial.sock";

/// Listens on `SOCKET_PATH`, replacing a socket left behind by an earlier run.
pub async fn run_server(tx: Sender<AppEvent>) {
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", SOCKET_PATH, e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(handle_client(stream, tx.clone()));
            }
            Err(e) => log::error!("Failed to accept connection: {}", e),
        }
    }
}

/// Forwards one command per line until the client hangs up or the app is gone.
async fn handle_client<R>(stream: R, tx: Sender<AppEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::warn!("Dropping client: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match AppEvent::from_command(&line) {
            Some(event) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            None => log::warn!("Unknown command '{}'", line.trim()),
        }
    }
}

pub fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to dial at {}: {}. Is dial running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
