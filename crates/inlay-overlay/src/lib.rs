//! Per-component overlays and control resolution for the inlay configurator.
//!
//! Overlays are hand-authored override layers on top of schema-derived
//! defaults; the resolver turns each attribute into the control that edits it.

pub mod entry;
pub mod palette;
pub mod resolver;

pub use entry::{OverlayEntry, OverlayError, RegistryOverlay};
pub use palette::{palette_options, THEME_COLORS};
pub use resolver::{resolve_control, ControlKind, ControlOption, ResolvedControl};
