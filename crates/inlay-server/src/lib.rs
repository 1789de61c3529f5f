//! Dev server exposing the inlay configurator over HTTP and WebSocket.

pub mod live;
pub mod server;
pub mod watcher;

pub use live::{live_client_script, LiveHub, LiveMessage};
pub use server::{ConfigServer, ConfigServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
