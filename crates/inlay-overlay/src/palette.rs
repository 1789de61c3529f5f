//! Theme palette collaborator.
//!
//! Supplies the option set for colour-flavored attributes. Static for the
//! process lifetime; the colour heuristic in the resolver pre-populates a
//! searchable option list from it.

use crate::resolver::ControlOption;

/// Theme colour tokens, in display order.
pub const THEME_COLORS: &[&str] = &[
    "primary",
    "secondary",
    "accent",
    "neutral",
    "info",
    "success",
    "warning",
    "error",
    "surface",
    "muted",
];

/// Palette as control options (id, value, and label are the token text).
pub fn palette_options() -> Vec<ControlOption> {
    THEME_COLORS
        .iter()
        .map(|token| ControlOption::uniform(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_options_mirror_tokens() {
        let options = palette_options();

        assert_eq!(options.len(), THEME_COLORS.len());
        assert_eq!(options[0].value, "primary");
        assert_eq!(options[0].label, "primary");
    }
}
