//! Component catalog snapshot supplied by the host engine

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One group of components registered under an optional disk namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentGroup {
    /// Disk namespace selected by a `name::` tag prefix, if any
    pub namespace: Option<String>,
    /// Fully-qualified component identifiers known to the loader
    pub members: HashSet<String>,
}

impl ComponentGroup {
    /// Create a group from an optional namespace and its member identifiers
    pub fn new<I, S>(namespace: Option<&str>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: namespace.map(str::to_string),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read-only snapshot of the host's component listing
///
/// Supplied fresh by the host on every compile call. The compiler never
/// mutates a snapshot, so one catalog may back any number of concurrent
/// compiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentCatalog {
    /// Component groups, one per disk
    pub groups: Vec<ComponentGroup>,
}

impl ComponentCatalog {
    /// Build a catalog from groups
    pub fn new(groups: Vec<ComponentGroup>) -> Self {
        Self { groups }
    }

    /// The member set for the given namespace
    ///
    /// A tag without a namespace selects the unnamed group, or the group
    /// explicitly named `default`.
    pub fn members(&self, namespace: Option<&str>) -> Option<&HashSet<String>> {
        let group = match namespace {
            Some(ns) => self
                .groups
                .iter()
                .find(|group| group.namespace.as_deref() == Some(ns)),
            None => self.groups.iter().find(|group| {
                group.namespace.is_none() || group.namespace.as_deref() == Some("default")
            }),
        };

        group.map(|group| &group.members)
    }
}
