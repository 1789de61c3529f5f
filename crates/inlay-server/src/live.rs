//! WebSocket live-update channel.
//!
//! Pushes configurator output to connected documentation pages: new snippets
//! after edits, and schema-change notices when a component source file is
//! re-analyzed.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Messages sent to connected clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveMessage {
    /// Connection established
    Connected,

    /// A configurator republished its output
    ConfigUpdated {
        /// Component display name
        component: String,
        /// Synthesized snippet
        snippet: String,
        /// Source-language tag for highlighting
        language: String,
    },

    /// A component's source changed and its schema was re-analyzed
    SchemaChanged {
        /// Component display name
        component: String,
    },

    /// Full page reload
    Reload,
}

/// Hub for broadcasting live messages to all connected clients.
#[derive(Debug, Clone)]
pub struct LiveHub {
    sender: broadcast::Sender<LiveMessage>,
}

impl LiveHub {
    /// Create a new hub.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: LiveMessage) {
        // Ignore send errors (no receivers)
        let _ = self.sender.send(msg);
    }

    /// Subscribe to live messages.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveMessage> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LiveHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate the client-side live-update script.
pub fn live_client_script(ws_url: &str) -> String {
    format!(
        r#"
(function() {{
  'use strict';

  const ws = new WebSocket('{}');

  ws.onopen = function() {{
    console.log('[live] Connected');
  }};

  ws.onmessage = function(event) {{
    const msg = JSON.parse(event.data);

    switch (msg.type) {{
      case 'config_updated': {{
        const panel = document.querySelector('[data-snippet="' + msg.component + '"]');
        if (panel) {{
          panel.textContent = msg.snippet;
        }}
        break;
      }}

      case 'schema_changed':
      case 'reload':
        location.reload();
        break;

      case 'connected':
        console.log('[live] Server acknowledged connection');
        break;
    }}
  }};

  ws.onclose = function() {{
    console.log('[live] Disconnected');
    setTimeout(function() {{ location.reload(); }}, 1000);
  }};
}})();
"#,
        ws_url
    )
}
