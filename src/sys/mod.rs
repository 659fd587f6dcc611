pub mod runtime;
pub mod server;
pub mod snapshot;
pub mod watcher;
