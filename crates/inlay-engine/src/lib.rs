//! Configurator engine: live configuration state, snippet synthesis, and the
//! orchestrator that ties schema, overlay, and edits together.

pub mod exceptions;
pub mod orchestrator;
pub mod resolve;
pub mod state;
pub mod synthesize;

pub use exceptions::{exceptions_for, ComponentExceptions, GroupConfig};
pub use orchestrator::{
    Configurator, ConfiguratorPhase, ConfiguratorUpdate, UpdateHub, SNIPPET_LANGUAGE,
};
pub use resolve::{resolve_attributes, Resolution, ResolvedAttribute};
pub use state::ConfigurationState;
pub use synthesize::{synthesize, synthesize_grouped};
