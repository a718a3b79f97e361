//! Component path resolution against the catalog snapshot
//!
//! Mirrors file-based component layout conventions without the caller
//! spelling them out: an exact path wins, then a `components/` grouping,
//! then `index` files, then both combined.

use tracing::debug;

use crate::catalog::ComponentCatalog;
use crate::error::CompileError;

/// Split an optional `namespace::` prefix off a tag name
///
/// The namespace must be a bare word; a prefix containing anything else is
/// part of the component name.
pub(crate) fn split_namespace(tag_name: &str) -> (Option<&str>, &str) {
    match tag_name.split_once("::") {
        Some((namespace, local))
            if !namespace.is_empty()
                && namespace
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            (Some(namespace), local)
        }
        _ => (None, tag_name),
    }
}

/// Resolve a tag name to the component identifier to emit
///
/// Always produces an identifier: when no catalog entry matches any probe,
/// the dot-to-slash conversion of the tag name is emitted unchanged, and the
/// host's loader reports the missing component later.
///
/// # Errors
/// Returns [`CompileError::InvalidTag`] when the component name is empty
/// after the namespace prefix is removed.
pub fn resolve(tag_name: &str, catalog: &ComponentCatalog) -> Result<String, CompileError> {
    let (namespace, local) = split_namespace(tag_name);
    if local.is_empty() {
        return Err(CompileError::InvalidTag(tag_name.to_string()));
    }

    let candidate = local.replace('.', "/");
    let prefix = namespace
        .map(|ns| format!("{ns}::"))
        .unwrap_or_default();

    if let Some(members) = catalog.members(namespace) {
        let probes = [
            format!("{prefix}{candidate}"),
            format!("{prefix}components/{candidate}"),
            format!("{prefix}{candidate}/index"),
            format!("{prefix}components/{candidate}/index"),
        ];

        for probe in probes {
            if members.contains(&probe) {
                debug!("resolved component tag `{}` to `{}`", tag_name, probe);
                return Ok(probe);
            }
        }
    }

    Ok(format!("{prefix}{candidate}"))
}
