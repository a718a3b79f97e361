//! Attribute extraction and typed render expressions
//!
//! Parses the attribute substring of a matched tag into an ordered map of
//! typed values. A token that does not fit the attribute grammar is dropped
//! silently; whatever the host's directive parser makes of the surrounding
//! text is not this module's concern.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

/// The typed value of a single attribute, ready for directive emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderExpression {
    /// A plain string value, emitted double-quoted
    Literal(String),
    /// Host-language expression text, emitted verbatim
    RawExpression(String),
    /// Template-literal body with `${...}` splices, emitted wrapped in
    /// back-ticks
    InterpolatedString(String),
    /// A value-less flag attribute, emitted as the literal `true`
    BooleanTrue,
}

impl RenderExpression {
    /// Render the value exactly as it appears in the emitted directive
    ///
    /// No escaping is applied to the wrapped text; values are trusted to the
    /// host's directive parser as written in the source.
    pub fn emit(&self) -> String {
        match self {
            RenderExpression::Literal(text) => format!("\"{text}\""),
            RenderExpression::RawExpression(text) => text.clone(),
            RenderExpression::InterpolatedString(body) => format!("`{body}`"),
            RenderExpression::BooleanTrue => "true".to_string(),
        }
    }
}

/// Ordered attribute name to typed value mapping
///
/// Insertion order is preserved for deterministic output. A name appearing
/// twice in one tag keeps its first position and the later value.
pub type AttributeMap = IndexMap<String, RenderExpression>;

/// One attribute token: optional `:`/`::`/`@` sigil, a name, and one of the
/// four value forms (double-quoted, single-quoted, double-brace
/// interpolation, bare).
fn attribute_token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r#"\s([:@]?[\w\-:.]+)(?:=(?:"([^"]*)"|'([^']*)'|(\{\{[^}]*\}\})|([^'"=<>\s]+)))?"#,
        )
        .expect("Invalid regex")
    })
}

/// Detects `{{ ... }}` interpolation markers anywhere in a value
fn interpolation_marker_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{\{.*?\}\}").expect("Invalid regex"))
}

/// Converts one `{{ expr }}` marker into a `${expr}` splice
fn splice_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{\{\s*([^}]+)\s*\}\}").expect("Invalid regex"))
}

/// Parse an attribute substring into an ordered typed map
///
/// Typing rules, in priority order: a `:name` binding yields the raw value
/// text verbatim; a `::name` escaped binding keeps a single leading colon on
/// the emitted key and types its value like an ordinary attribute; a value
/// containing `{{ ... }}` markers becomes an interpolated string; any other
/// value is a literal; a missing value is the boolean `true`.
pub fn parse_attributes(raw: &str) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    if raw.trim().is_empty() {
        return attributes;
    }

    // Tokens are whitespace-led inside a matched tag; pad so the first one
    // matches the same way.
    let padded = format!(" {raw}");
    for capture in attribute_token_regex().captures_iter(&padded) {
        let name = &capture[1];
        let value = capture
            .get(2)
            .or(capture.get(3))
            .or(capture.get(4))
            .or(capture.get(5))
            .map(|m| m.as_str());

        if let Some(stripped) = name.strip_prefix("::") {
            // Escaped binding: the emitted key keeps one leading colon so it
            // reaches the rendered output looking like a binding.
            attributes.insert(format!(":{stripped}"), classify(value));
        } else if let Some(stripped) = name.strip_prefix(':') {
            let expression = match value {
                Some(text) => RenderExpression::RawExpression(text.to_string()),
                // A binding without a value behaves like a flag.
                None => RenderExpression::BooleanTrue,
            };
            attributes.insert(stripped.to_string(), expression);
        } else {
            attributes.insert(name.to_string(), classify(value));
        }
    }

    attributes
}

/// Type a non-bound attribute value
fn classify(value: Option<&str>) -> RenderExpression {
    match value {
        Some(text) if interpolation_marker_regex().is_match(text) => {
            let body = splice_regex().replace_all(text, "$${$1}");
            RenderExpression::InterpolatedString(body.into_owned())
        }
        Some(text) => RenderExpression::Literal(text.to_string()),
        None => RenderExpression::BooleanTrue,
    }
}
