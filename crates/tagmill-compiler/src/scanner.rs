//! Single-pass tag scanner
//!
//! Splits raw template text into a sequence of [`TagToken`]s in source
//! order. Candidate patterns are tried in a fixed priority at every `<`:
//! slot markers before generic tags (the slot vocabulary would otherwise be
//! consumed as ordinary component tags), and self-closing tags before
//! opening tags (the opening pattern does not exclude a trailing slash, so
//! trying it first would corrupt nesting). Both orderings are correctness
//! preconditions, not tuning.
//!
//! Anything that fails every pattern, including tags with malformed
//! attribute sections, stays in the text stream untouched.

use std::sync::OnceLock;

use regex::Regex;

/// A located occurrence of a custom tag, or the text between occurrences
///
/// Ephemeral: produced per compile call and consumed by the directive
/// reducer, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagToken {
    /// Text outside any matched tag, passed through unchanged
    Text(String),
    /// `<x-name ... />`
    SelfClosing {
        /// Tag name, including any `disk::` prefix and dot hierarchy
        name: String,
        /// Raw attribute substring, untyped
        attributes: String,
    },
    /// `<x-name ...>`
    Opening {
        /// Tag name, including any `disk::` prefix and dot hierarchy
        name: String,
        /// Raw attribute substring, untyped
        attributes: String,
    },
    /// `</x-name>`
    Closing,
    /// `<x-slot ...>`, optionally with an inline `:name` suffix
    SlotOpening {
        /// Name given by the `:name` suffix, when present and non-empty
        inline_name: Option<String>,
        /// Raw attribute substring, untyped
        attributes: String,
    },
    /// `</x-slot>`
    SlotClosing,
}

/// Attribute section of a tag: whitespace-led tokens, each an optionally
/// sigiled name with one of the four value forms.
const ATTRIBUTE_LIST: &str =
    r#"((?:\s+[:@]?[\w\-:.]+(?:=(?:"[^"]*"|'[^']*'|\{\{[^}]*\}\}|[^'"=<>\s]+))?)*)"#;

fn slot_closing_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^</\s*x[-:]slot[^>]*>").expect("Invalid regex"))
}

fn slot_opening_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(&format!(r"^<x-slot(?::(\w*))?{ATTRIBUTE_LIST}\s*>")).expect("Invalid regex")
    })
}

fn closing_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^</\s*x[-:][\w\-:.]*\s*>").expect("Invalid regex"))
}

fn self_closing_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(&format!(r"^<\s*x[-:]([\w\-:.]*)\s*{ATTRIBUTE_LIST}\s*/>"))
            .expect("Invalid regex")
    })
}

fn opening_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(&format!(r"^<\s*x[-:]([\w\-:.]*)\s*{ATTRIBUTE_LIST}\s*>"))
            .expect("Invalid regex")
    })
}

/// Scan template text into tokens in source order
///
/// Infallible: input that matches nothing is returned as [`TagToken::Text`]
/// runs, so `scan` loses no characters.
pub fn scan(source: &str) -> Vec<TagToken> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = source;

    while let Some(offset) = rest.find('<') {
        text.push_str(&rest[..offset]);
        rest = &rest[offset..];

        match match_tag(rest) {
            Some((token, consumed)) => {
                if !text.is_empty() {
                    tokens.push(TagToken::Text(std::mem::take(&mut text)));
                }
                tokens.push(token);
                rest = &rest[consumed..];
            }
            None => {
                text.push('<');
                rest = &rest[1..];
            }
        }
    }

    text.push_str(rest);
    if !text.is_empty() {
        tokens.push(TagToken::Text(text));
    }

    tokens
}

/// Try the tag patterns at the start of `input`, highest priority first
fn match_tag(input: &str) -> Option<(TagToken, usize)> {
    if let Some(found) = slot_closing_regex().find(input) {
        return Some((TagToken::SlotClosing, found.end()));
    }

    if let Some(captures) = slot_opening_regex().captures(input) {
        let inline_name = captures
            .get(1)
            .map(|m| m.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let attributes = captures[2].to_string();
        let consumed = captures.get(0).map(|m| m.end()).unwrap_or_default();
        return Some((TagToken::SlotOpening { inline_name, attributes }, consumed));
    }

    if let Some(found) = closing_regex().find(input) {
        return Some((TagToken::Closing, found.end()));
    }

    if let Some(captures) = self_closing_regex().captures(input) {
        let token = TagToken::SelfClosing {
            name: captures[1].to_string(),
            attributes: captures[2].to_string(),
        };
        let consumed = captures.get(0).map(|m| m.end()).unwrap_or_default();
        return Some((token, consumed));
    }

    if let Some(captures) = opening_regex().captures(input) {
        let token = TagToken::Opening {
            name: captures[1].to_string(),
            attributes: captures[2].to_string(),
        };
        let consumed = captures.get(0).map(|m| m.end()).unwrap_or_default();
        return Some((token, consumed));
    }

    None
}
