//! Scalar style selection (§4.7).
//!
//! Grounded on `yaml_emitter_select_scalar_style`, generalized with the
//! JSON-mode rules and the `is_number`/empty-literal short-circuits
//! spec.md adds beyond libyaml's pure block/flow selector.

use super::analysis::ScalarAnalysis;
use super::config::EmitterMode;
use crate::atom::compare::is_number;
use crate::atom::Atom;
use crate::chars::is_printable;
use crate::style::ScalarStyle;

/// Pick a concrete style for a scalar, given the caller's requested style
/// (possibly [`ScalarStyle::Any`]), the emitter's mode, and whether the
/// emission point is inside flow context or a simple key.
pub(crate) fn select_scalar_style(
    mut requested: ScalarStyle,
    mode: EmitterMode,
    in_flow: bool,
    simple_key_context: bool,
    analysis: &ScalarAnalysis<'_>,
) -> ScalarStyle {
    if mode.is_json() {
        return select_json_style(analysis.value);
    }

    if in_flow && matches!(requested, ScalarStyle::Literal | ScalarStyle::Folded | ScalarStyle::Any) {
        if analysis.multiline {
            requested = ScalarStyle::DoubleQuoted;
        } else if !analysis.value.chars().all(is_printable) {
            requested = ScalarStyle::DoubleQuoted;
        } else if requested != ScalarStyle::Any {
            requested = ScalarStyle::SingleQuoted;
        }
    }

    if requested == ScalarStyle::Any {
        requested = ScalarStyle::Plain;
    }

    if simple_key_context && analysis.multiline {
        requested = ScalarStyle::DoubleQuoted;
    }

    if requested == ScalarStyle::Plain {
        let allowed = if in_flow { analysis.flow_plain_allowed } else { analysis.block_plain_allowed };
        if !allowed {
            requested = ScalarStyle::SingleQuoted;
        }
        if analysis.value.is_empty() && (in_flow || simple_key_context) {
            requested = ScalarStyle::DoubleQuoted;
        }
    }

    if requested == ScalarStyle::SingleQuoted && !analysis.single_quoted_allowed {
        requested = ScalarStyle::DoubleQuoted;
    }

    if matches!(requested, ScalarStyle::Literal | ScalarStyle::Folded)
        && (!analysis.block_allowed || in_flow || simple_key_context)
    {
        requested = ScalarStyle::DoubleQuoted;
    }

    requested
}

/// JSON mode (§4.7 rule 2): only the empty scalar, `true`/`false`/`null`,
/// and numeric-looking atoms stay unquoted; everything else is
/// double-quoted.
fn select_json_style(value: &str) -> ScalarStyle {
    if value.is_empty() || matches!(value, "true" | "false" | "null") {
        return ScalarStyle::Plain;
    }
    let atom = Atom::from_plain(value);
    if is_number(&atom).unwrap_or(false) {
        return ScalarStyle::Plain;
    }
    ScalarStyle::DoubleQuoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::analysis::analyze_scalar;

    #[test]
    fn json_mode_keeps_booleans_and_numbers_plain() {
        assert_eq!(select_json_style("true"), ScalarStyle::Plain);
        assert_eq!(select_json_style("-12.5"), ScalarStyle::Plain);
        assert_eq!(select_json_style("hello"), ScalarStyle::DoubleQuoted);
    }

    #[test]
    fn any_style_with_leading_space_becomes_single_quoted() {
        let a = analyze_scalar(" x", true);
        let s = select_scalar_style(ScalarStyle::Any, EmitterMode::Block, false, false, &a);
        assert_eq!(s, ScalarStyle::SingleQuoted);
    }

    #[test]
    fn literal_inside_flow_with_multiline_becomes_double_quoted() {
        let a = analyze_scalar("a\nb", true);
        let s = select_scalar_style(ScalarStyle::Literal, EmitterMode::Flow, true, false, &a);
        assert_eq!(s, ScalarStyle::DoubleQuoted);
    }

    #[test]
    fn empty_value_in_flow_context_becomes_double_quoted() {
        let a = analyze_scalar("", true);
        let s = select_scalar_style(ScalarStyle::Any, EmitterMode::Block, true, false, &a);
        assert_eq!(s, ScalarStyle::DoubleQuoted);
    }

    #[test]
    fn any_style_multiline_in_flow_becomes_double_quoted_not_single() {
        let a = analyze_scalar("a\nb", true);
        let s = select_scalar_style(ScalarStyle::Any, EmitterMode::Flow, true, false, &a);
        assert_eq!(s, ScalarStyle::DoubleQuoted);
    }
}
