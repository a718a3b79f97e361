//! Directive emission and the compile facade
//!
//! Reduces the scanner's token sequence into directive text in one ordered
//! pass: component tags become `@component(...)` calls, slot markers become
//! `@slot(...)` calls, and closers become `@end` terminators. Text between
//! tags is copied through verbatim.

use tracing::debug;

use crate::attributes::{parse_attributes, AttributeMap, RenderExpression};
use crate::catalog::ComponentCatalog;
use crate::error::CompileError;
use crate::resolver;
use crate::scanner::{scan, TagToken};

/// Compiles component tags in raw template text into directive calls
///
/// Borrows a catalog snapshot for the duration of one or more compile
/// calls. Output is a pure function of the input text and the snapshot.
pub struct TagCompiler<'a> {
    catalog: &'a ComponentCatalog,
}

impl<'a> TagCompiler<'a> {
    /// Create a compiler over a catalog snapshot
    pub fn new(catalog: &'a ComponentCatalog) -> Self {
        Self { catalog }
    }

    /// Rewrite every slot marker and component tag in `source`
    ///
    /// Text outside matched tags passes through unchanged, apart from the
    /// newlines inserted around the emitted directives.
    ///
    /// # Errors
    /// [`CompileError::InvalidTag`] for a tag whose component name is empty,
    /// [`CompileError::SlotWithoutName`] and [`CompileError::PropsUnwrap`]
    /// for malformed slot markers. On error no partial output is returned.
    pub fn compile(&self, source: &str) -> Result<String, CompileError> {
        let tokens = scan(source);
        let markers = tokens
            .iter()
            .filter(|token| !matches!(token, TagToken::Text(_)))
            .count();
        if markers > 0 {
            debug!("rewriting {} custom tag markers", markers);
        }

        let mut output = String::with_capacity(source.len());
        for token in tokens {
            match token {
                TagToken::Text(text) => output.push_str(&text),
                TagToken::SelfClosing { name, attributes } => {
                    output.push_str(&self.component_string(&name, &attributes)?);
                    output.push_str("\n@end\n");
                }
                TagToken::Opening { name, attributes } => {
                    output.push_str(&self.component_string(&name, &attributes)?);
                    output.push('\n');
                }
                TagToken::Closing => output.push_str("\n@end\n"),
                TagToken::SlotOpening { inline_name, attributes } => {
                    output.push_str(&slot_string(inline_name.as_deref(), &attributes)?);
                }
                TagToken::SlotClosing => output.push_str("\n@end"),
            }
        }

        Ok(output)
    }

    /// `\n@component("<path>", { <attributes> })`
    fn component_string(
        &self,
        tag_name: &str,
        raw_attributes: &str,
    ) -> Result<String, CompileError> {
        let attributes = parse_attributes(raw_attributes);
        let path = resolver::resolve(tag_name, self.catalog)?;

        Ok(format!(
            "\n@component(\"{}\", {{ {} }})",
            path,
            attributes_to_string(&attributes)
        ))
    }
}

/// `"key": value` pairs joined for the inline argument object
fn attributes_to_string(attributes: &AttributeMap) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!("\"{}\": {}", key, value.emit()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `@slot("<name>")\n`, with the unwrapped props expression as a second
/// argument when present
fn slot_string(inline_name: Option<&str>, raw_attributes: &str) -> Result<String, CompileError> {
    let attributes = parse_attributes(raw_attributes);

    let name = match inline_name {
        Some(inline) => format!("\"{inline}\""),
        None => attributes
            .get("name")
            .map(RenderExpression::emit)
            .ok_or(CompileError::SlotWithoutName)?,
    };

    match attributes.get("props") {
        Some(props) => Ok(format!("@slot({name}, {})\n", unwrap_props(props)?)),
        None => Ok(format!("@slot({name})\n")),
    }
}

/// Strip the literal quoting from a slot `props` value
fn unwrap_props(props: &RenderExpression) -> Result<String, CompileError> {
    match props {
        RenderExpression::Literal(text) => Ok(text.clone()),
        RenderExpression::BooleanTrue => Ok("true".to_string()),
        other => Err(CompileError::PropsUnwrap(other.emit())),
    }
}
