//! Configurator dev server implementation.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use inlay_engine::{Configurator, ConfiguratorPhase};
use inlay_overlay::RegistryOverlay;
use inlay_schema::{fallback_names, ComponentRegistry, FileAnalyzer, PropValue, SchemaSource};

use crate::live::{live_client_script, LiveHub, LiveMessage};
use crate::watcher::{FileWatcher, WatchEvent};

/// Configuration for the configurator dev server.
#[derive(Debug, Clone)]
pub struct ConfigServerConfig {
    /// Directory containing component sources
    pub components_dir: PathBuf,

    /// Directory containing checked-in overlay files
    pub overlays_dir: PathBuf,

    /// Directory of static assets for the demo page
    pub assets_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for ConfigServerConfig {
    fn default() -> Self {
        Self {
            components_dir: PathBuf::from("src/components"),
            overlays_dir: PathBuf::from("docs/overlays"),
            assets_dir: PathBuf::from("docs/assets"),
            port: 7878,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state: one configurator per requested component.
struct ServerState {
    config: ConfigServerConfig,
    configurators: HashMap<String, Configurator>,
    hub: LiveHub,
}

impl ServerState {
    /// Get or create the configurator for a component.
    fn configurator(&mut self, name: &str) -> &mut Configurator {
        let key = name.to_lowercase();
        if !self.configurators.contains_key(&key) {
            let source = SchemaSource::with_analyzer(Box::new(FileAnalyzer::new(
                &self.config.components_dir,
            )));
            let mut configurator = Configurator::new(name, source);
            if let Some(overlay) = load_overlay(&self.config.overlays_dir, name) {
                configurator = configurator.with_overlay(overlay);
            }
            configurator.mount();
            self.configurators.insert(key.clone(), configurator);
        }
        self.configurators
            .get_mut(&key)
            .expect("configurator just inserted")
    }
}

/// Load a component's checked-in overlay, if one exists.
fn load_overlay(overlays_dir: &std::path::Path, component: &str) -> Option<RegistryOverlay> {
    let path = overlays_dir.join(format!("{}.toml", component.to_lowercase()));
    let source = std::fs::read_to_string(&path).ok()?;
    match RegistryOverlay::from_toml(&source) {
        Ok(overlay) => Some(overlay),
        Err(e) => {
            tracing::warn!("Skipping malformed overlay {}: {}", path.display(), e);
            None
        }
    }
}

/// Configurator dev server.
pub struct ConfigServer {
    config: ConfigServerConfig,
}

impl ConfigServer {
    /// Create a new server.
    pub fn new(config: ConfigServerConfig) -> Self {
        Self { config }
    }

    /// Start the server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .expect("Invalid address");

        let state = Arc::new(RwLock::new(ServerState {
            config: self.config.clone(),
            configurators: HashMap::new(),
            hub: LiveHub::new(),
        }));

        // Watch component sources and overlays for re-analysis
        let watch_paths = vec![
            self.config.components_dir.clone(),
            self.config.overlays_dir.clone(),
        ];

        let (watcher, mut rx) =
            FileWatcher::new(&watch_paths).map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            drop(watcher);
        });

        let app = Router::new()
            .route("/", get(index_handler))
            .route("/api/components", get(components_handler))
            .route("/api/schema/{name}", get(schema_handler))
            .route("/api/config/{name}", post(config_handler))
            .route("/__live", get(ws_handler))
            .route("/__live.js", get(live_script_handler))
            .nest_service("/assets", ServeDir::new(&self.config.assets_dir))
            .with_state(state);

        tracing::info!("Starting configurator server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handle file watch events.
async fn handle_watch_event(state: &Arc<RwLock<ServerState>>, event: WatchEvent) {
    match event {
        WatchEvent::ComponentModified(path) => {
            tracing::info!("Component modified: {}", path.display());

            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();

            let mut state = state.write().await;
            if let Some(configurator) = state.configurators.get_mut(&name.to_lowercase()) {
                configurator.remount(name.clone());
            }
            state.hub.send(LiveMessage::SchemaChanged { component: name });
        }

        WatchEvent::OverlayModified(path) => {
            tracing::info!("Overlay modified: {}", path.display());

            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();

            let mut state = state.write().await;
            let overlay = load_overlay(&state.config.overlays_dir, &name);
            if let Some(configurator) = state.configurators.get_mut(&name.to_lowercase()) {
                configurator.set_overlay(overlay);
            }
            state.hub.send(LiveMessage::SchemaChanged { component: name });
        }

        WatchEvent::Created(_) | WatchEvent::Deleted(_) | WatchEvent::Modified(_) => {
            let state = state.read().await;
            state.hub.send(LiveMessage::Reload);
        }
    }
}

/// All known component names: analyzed sources plus the static table.
fn known_components(config: &ConfigServerConfig) -> Vec<String> {
    let mut names: Vec<String> = fallback_names().iter().map(|n| n.to_string()).collect();

    let mut registry = ComponentRegistry::new();
    if registry.scan(&config.components_dir).is_ok() {
        for name in registry.names() {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name.to_string());
            }
        }
    }

    names.sort_unstable();
    names
}

/// Handler for the index page.
async fn index_handler(State(state): State<Arc<RwLock<ServerState>>>) -> impl IntoResponse {
    let state = state.read().await;
    let names = known_components(&state.config);

    let list: String = names
        .iter()
        .map(|n| format!("    <li><a href=\"/api/schema/{n}\">{n}</a></li>\n"))
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Inlay Configurator</title>
  <link rel="stylesheet" href="/assets/demo.css">
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 800px; margin: 2rem auto; padding: 0 1rem; }}
    h1 {{ font-size: 2rem; }}
  </style>
</head>
<body>
  <h1>Inlay Configurator</h1>
  <ul>
{list}  </ul>
  <script src="/__live.js"></script>
</body>
</html>"#
    ))
}

/// Handler listing all known components.
async fn components_handler(State(state): State<Arc<RwLock<ServerState>>>) -> impl IntoResponse {
    let state = state.read().await;
    Json(known_components(&state.config))
}

/// Handler returning a component's resolved schema and current snippet.
async fn schema_handler(
    Path(name): Path<String>,
    State(state): State<Arc<RwLock<ServerState>>>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    let configurator = state.configurator(&name);

    match configurator.phase() {
        ConfiguratorPhase::Loading => Json(serde_json::json!({ "status": "loading" })),
        ConfiguratorPhase::Ready => Json(serde_json::json!({
            "status": "ready",
            "component": configurator.schema().map(|s| s.display_name.clone()),
            "content_bearing": configurator.schema().map(|s| s.content_bearing),
            "attributes": configurator.attributes(),
            "stale_entries": configurator.stale_entries(),
            "snippet": configurator.snippet(),
        })),
    }
}

/// One edit against a component's configuration.
#[derive(Debug, Deserialize)]
struct EditRequest {
    /// Attribute to change, with its new value
    #[serde(default)]
    attribute: Option<String>,
    #[serde(default)]
    value: Option<serde_json::Value>,

    /// New content slot value
    #[serde(default)]
    content_slot: Option<String>,

    /// Toggle grouped rendering
    #[serde(default)]
    grouped: Option<bool>,
}

/// Handler applying an edit and returning the new snippet.
async fn config_handler(
    Path(name): Path<String>,
    State(state): State<Arc<RwLock<ServerState>>>,
    Json(edit): Json<EditRequest>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    let configurator = state.configurator(&name);

    if let (Some(attribute), Some(value)) = (&edit.attribute, &edit.value) {
        match serde_json::from_value::<PropValue>(value.clone()) {
            Ok(value) => configurator.apply_edit(attribute, value),
            Err(e) => tracing::warn!("Unusable value for {}: {}", attribute, e),
        }
    }

    if let Some(content) = edit.content_slot {
        configurator.set_content_slot(Some(content));
    }

    if let Some(grouped) = edit.grouped {
        configurator.set_grouped(grouped);
    }

    let snippet = configurator.snippet();
    let values = configurator.state().values().clone();
    let component = configurator
        .schema()
        .map(|s| s.display_name.clone())
        .unwrap_or(name);

    state.hub.send(LiveMessage::ConfigUpdated {
        component,
        snippet: snippet.clone(),
        language: inlay_engine::SNIPPET_LANGUAGE.to_string(),
    });

    Json(serde_json::json!({
        "snippet": snippet,
        "values": values,
    }))
}

/// Handler for the live-update WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<RwLock<ServerState>>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: Arc<RwLock<ServerState>>) {
    let mut rx = {
        let state = state.read().await;
        state.hub.subscribe()
    };

    let msg = serde_json::to_string(&LiveMessage::Connected).unwrap();
    if socket.send(Message::Text(msg.into())).await.is_err() {
        return;
    }

    while let Ok(live_msg) = rx.recv().await {
        let json = serde_json::to_string(&live_msg).unwrap();
        if socket.send(Message::Text(json.into())).await.is_err() {
            break;
        }
    }
}

/// Handler for the live-update client script.
async fn live_script_handler(State(state): State<Arc<RwLock<ServerState>>>) -> impl IntoResponse {
    let (host, port) = {
        let state = state.read().await;
        (state.config.host.clone(), state.config.port)
    };
    let script = live_client_script(&format!("ws://{}:{}/__live", host, port));
    ([("content-type", "application/javascript")], script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn creates_server_with_default_config() {
        let server = ConfigServer::new(ConfigServerConfig::default());
        assert_eq!(server.config.port, 7878);
        assert_eq!(server.config.assets_dir, PathBuf::from("docs/assets"));
    }


    #[test]
    fn known_components_merges_registry_and_fallback() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("toggle.tsx"),
            r#"
interface ToggleProps {
  on?: boolean;
}

export function Toggle({ on = false }: ToggleProps) {}
"#,
        )
        .unwrap();

        let config = ConfigServerConfig {
            components_dir: temp.path().to_path_buf(),
            ..Default::default()
        };

        let names = known_components(&config);

        assert!(names.iter().any(|n| n == "Toggle"));
        assert!(names.iter().any(|n| n == "Button"));
    }

    #[tokio::test]
    async fn configurator_is_created_on_demand_and_cached() {
        let state = Arc::new(RwLock::new(ServerState {
            config: ConfigServerConfig {
                components_dir: PathBuf::from("/nonexistent"),
                ..Default::default()
            },
            configurators: HashMap::new(),
            hub: LiveHub::new(),
        }));

        {
            let mut state = state.write().await;
            // Falls back to the static table
            let configurator = state.configurator("Button");
            assert_eq!(configurator.phase(), ConfiguratorPhase::Ready);
        }

        let state = state.read().await;
        assert!(state.configurators.contains_key("button"));
    }

    #[test]
    fn malformed_overlay_is_skipped() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("button.toml"), "component = [broken").unwrap();

        assert!(load_overlay(temp.path(), "Button").is_none());
    }

    #[test]
    fn well_formed_overlay_loads() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("button.toml"),
            "component = \"Button\"\n\n[entries.variant]\nlabel = \"Style\"\n",
        )
        .unwrap();

        let overlay = load_overlay(temp.path(), "Button").unwrap();
        assert_eq!(overlay.get("variant").unwrap().label.as_deref(), Some("Style"));
    }
}
