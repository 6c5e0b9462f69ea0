//! Scalar/anchor/tag text analysis feeding the style selector (§4.7) and
//! the simple-key check (§4.9).
//!
//! Grounded on the teacher's `Analysis`/`ScalarAnalysis`/`AnchorAnalysis`/
//! `TagAnalysis` and `yaml_emitter_analyze_scalar`/`_analyze_anchor`/
//! `_analyze_tag`.

use crate::chars::{is_alpha, is_blankz, is_break, is_printable, is_space};
use crate::directives::TagDirective;
use crate::error::EmitterError;

pub(crate) struct AnchorAnalysis<'a> {
    pub anchor: &'a str,
    pub alias: bool,
}

pub(crate) struct TagAnalysis<'a> {
    pub handle: &'a str,
    pub suffix: &'a str,
}

pub(crate) struct ScalarAnalysis<'a> {
    pub value: &'a str,
    pub multiline: bool,
    pub flow_plain_allowed: bool,
    pub block_plain_allowed: bool,
    pub single_quoted_allowed: bool,
    pub block_allowed: bool,
}

/// Classify `anchor`'s/alias' character content; anchors must be non-empty
/// and contain only "alphanumerical" characters.
pub(crate) fn analyze_anchor(anchor: &str, alias: bool) -> Result<AnchorAnalysis<'_>, EmitterError> {
    if anchor.is_empty() {
        return Err(EmitterError::Problem(if alias {
            "alias value must not be empty"
        } else {
            "anchor value must not be empty"
        }));
    }
    for ch in anchor.chars() {
        if !is_alpha(ch) {
            return Err(EmitterError::Problem(if alias {
                "alias value must contain alphanumerical characters only"
            } else {
                "anchor value must contain alphanumerical characters only"
            }));
        }
    }
    Ok(AnchorAnalysis { anchor, alias })
}

/// Split `tag` into a known `%TAG` handle plus suffix, or an empty handle if
/// no directive's prefix matches (rendered as `!<full-tag>`).
pub(crate) fn analyze_tag<'a>(tag: &'a str, tag_directives: &'a [TagDirective]) -> Result<TagAnalysis<'a>, EmitterError> {
    if tag.is_empty() {
        return Err(EmitterError::Problem("tag value must not be empty"));
    }
    let mut handle = "";
    let mut suffix = tag;
    for directive in tag_directives {
        let prefix_len = directive.prefix.len();
        if prefix_len < tag.len() && tag[..prefix_len] == directive.prefix {
            handle = &directive.handle;
            suffix = &tag[prefix_len..];
            break;
        }
    }
    Ok(TagAnalysis { handle, suffix })
}

/// Walk `value` once, classifying which scalar styles remain legal (§4.7
/// depends on this) and whether it contains a line break at all.
pub(crate) fn analyze_scalar(value: &str, unicode: bool) -> ScalarAnalysis<'_> {
    if value.is_empty() {
        return ScalarAnalysis {
            value,
            multiline: false,
            flow_plain_allowed: false,
            block_plain_allowed: true,
            single_quoted_allowed: true,
            block_allowed: false,
        };
    }

    let mut block_indicators = value.starts_with("---") || value.starts_with("...");
    let mut flow_indicators = block_indicators;
    let mut line_breaks = false;
    let mut special_characters = false;
    let mut leading_space = false;
    let mut leading_break = false;
    let mut trailing_space = false;
    let mut trailing_break = false;
    let mut break_space = false;
    let mut space_break = false;
    let mut preceded_by_whitespace = true;
    let mut previous_space = false;
    let mut previous_break = false;

    let mut chars = value.chars().peekable();
    let mut first = true;
    while let Some(ch) = chars.next() {
        let next = chars.peek().copied();
        let followed_by_whitespace = is_blankz(next);
        if first {
            match ch {
                '#' | ',' | '[' | ']' | '{' | '}' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`' => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                '?' | ':' => {
                    flow_indicators = true;
                    if followed_by_whitespace {
                        block_indicators = true;
                    }
                }
                '-' if followed_by_whitespace => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                _ => {}
            }
        } else {
            match ch {
                ',' | '?' | '[' | ']' | '{' | '}' => flow_indicators = true,
                ':' => {
                    flow_indicators = true;
                    if followed_by_whitespace {
                        block_indicators = true;
                    }
                }
                '#' if preceded_by_whitespace => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                _ => {}
            }
        }

        if !is_printable(ch) || (!ch.is_ascii() && !unicode) {
            special_characters = true;
        }
        if is_break(ch) {
            line_breaks = true;
        }

        if is_space(ch) {
            if first {
                leading_space = true;
            }
            if next.is_none() {
                trailing_space = true;
            }
            if previous_break {
                break_space = true;
            }
            previous_space = true;
            previous_break = false;
        } else if is_break(ch) {
            if first {
                leading_break = true;
            }
            if next.is_none() {
                trailing_break = true;
            }
            if previous_space {
                space_break = true;
            }
            previous_space = false;
            previous_break = true;
        } else {
            previous_space = false;
            previous_break = false;
        }

        preceded_by_whitespace = is_blankz(Some(ch));
        first = false;
    }

    let mut analysis = ScalarAnalysis {
        value,
        multiline: line_breaks,
        flow_plain_allowed: true,
        block_plain_allowed: true,
        single_quoted_allowed: true,
        block_allowed: true,
    };

    if leading_space || leading_break || trailing_space || trailing_break {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
    }
    if trailing_space {
        analysis.block_allowed = false;
    }
    if break_space {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.single_quoted_allowed = false;
    }
    if space_break || special_characters {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.single_quoted_allowed = false;
        analysis.block_allowed = false;
    }
    if line_breaks {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
    }
    if flow_indicators {
        analysis.flow_plain_allowed = false;
    }
    if block_indicators {
        analysis.block_plain_allowed = false;
    }
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_with_leading_space_disallows_plain() {
        let a = analyze_scalar(" x", true);
        assert!(!a.flow_plain_allowed);
        assert!(!a.block_plain_allowed);
    }

    #[test]
    fn scalar_starting_with_document_marker_disallows_plain() {
        let a = analyze_scalar("---x", true);
        assert!(!a.block_plain_allowed);
    }

    #[test]
    fn anchor_rejects_non_alphanumeric() {
        assert!(analyze_anchor("a b", false).is_err());
        assert!(analyze_anchor("a-b_1", false).is_ok());
    }

    #[test]
    fn tag_splits_on_matching_directive_prefix() {
        let dirs = [TagDirective::new("!!", "tag:yaml.org,2002:")];
        let a = analyze_tag("tag:yaml.org,2002:int", &dirs).unwrap();
        assert_eq!(a.handle, "!!");
        assert_eq!(a.suffix, "int");
    }
}
