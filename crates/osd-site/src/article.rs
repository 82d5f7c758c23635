//! Article records derived from the sidebar.
//!
//! Listing and tag widgets work on a flat list of pages rather than on the
//! grouped sidebar. [`flatten`] projects every sidebar entry into a
//! [`ContentRecord`] that remembers the group it came from.
//!
//! # Example
//!
//! ```
//! use osd_site::{flatten, Navigation, NavigationEntry, NavigationGroup};
//!
//! let navigation = Navigation::new(vec![NavigationGroup::new(
//!     "/",
//!     "Broker",
//!     vec![
//!         NavigationEntry::page("Memory", "/broker/memory"),
//!         NavigationEntry::page("Cron", "/broker/cron"),
//!     ],
//! )]);
//!
//! let records = flatten(&navigation).unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].parent_text, "Broker");
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use crate::navigation::{Navigation, NavigationEntry};

/// Keys set on every record; an entry attribute of the same name is dropped.
const PARENT_LINK_KEY: &str = "parentLink";
const PARENT_TEXT_KEY: &str = "parentText";

/// Error returned when the navigation cannot be flattened.
#[derive(Debug, thiserror::Error)]
pub enum FlattenError {
    /// A group was declared without its entry list.
    #[error("Navigation group '{label}' under '{key}' has no items")]
    MissingItems {
        /// Sidebar key of the group.
        key: String,
        /// Label of the group.
        label: String,
    },
}

/// Where a record points to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination<'a> {
    /// A page at the given path.
    Page(&'a str),
    /// A heading entry with no page behind it.
    Heading,
}

/// Flattened projection of one sidebar entry.
///
/// Serializes to the shape the site widgets expect: the entry's own fields
/// followed by `parentLink` and `parentText`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Display label of the entry.
    pub text: String,
    /// Destination path, `None` for heading entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Tags of the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Nested entries, carried as data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavigationEntry>>,
    /// Passthrough attributes of the entry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Key of the owning group.
    pub parent_link: String,
    /// Label of the owning group.
    pub parent_text: String,
}

impl ContentRecord {
    fn project(entry: &NavigationEntry, parent: Parent<'_>) -> Self {
        let extra = entry
            .extra
            .iter()
            .filter(|(name, _)| *name != PARENT_LINK_KEY && *name != PARENT_TEXT_KEY)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Self {
            text: entry.text.clone(),
            link: entry.link.clone(),
            tags: entry.tags.clone(),
            items: entry.items.clone(),
            extra,
            parent_link: parent.link.to_owned(),
            parent_text: parent.text.to_owned(),
        }
    }

    /// Destination of the record.
    #[must_use]
    pub fn destination(&self) -> Destination<'_> {
        match self.link.as_deref() {
            Some(link) => Destination::Page(link),
            None => Destination::Heading,
        }
    }

    /// Whether the record is a heading without a page.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        self.link.is_none()
    }

    /// Tags of the record, empty when none are set.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Whether the record carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}

/// Fields propagated from the enclosing node.
#[derive(Clone, Copy)]
struct Parent<'a> {
    link: &'a str,
    text: &'a str,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Depth {
    /// Group entries only.
    Entries,
    /// Group entries and everything nested below them.
    Unbounded,
}

/// Flatten navigation into one record per group entry.
///
/// Records follow group order, then entry order within each group. Nested
/// `items` of an entry are carried on its record but not flattened.
///
/// # Errors
///
/// Returns [`FlattenError::MissingItems`] for the first group declared
/// without an entry list.
pub fn flatten(navigation: &Navigation) -> Result<Vec<ContentRecord>, FlattenError> {
    fold_navigation(navigation, Depth::Entries)
}

/// Flatten navigation including nested entries at any depth.
///
/// Each nested entry directly follows its ancestor and takes that ancestor
/// as its parent. Heading ancestors have no link, so their children inherit
/// the ancestor's own `parentLink`.
///
/// # Errors
///
/// Returns [`FlattenError::MissingItems`] for the first group declared
/// without an entry list.
pub fn flatten_nested(navigation: &Navigation) -> Result<Vec<ContentRecord>, FlattenError> {
    fold_navigation(navigation, Depth::Unbounded)
}

fn fold_navigation(
    navigation: &Navigation,
    depth: Depth,
) -> Result<Vec<ContentRecord>, FlattenError> {
    let mut records = Vec::with_capacity(navigation.entry_count());

    for group in navigation.groups() {
        let items = group
            .items
            .as_deref()
            .ok_or_else(|| FlattenError::MissingItems {
                key: group.key.clone(),
                label: group.label.clone(),
            })?;
        let parent = Parent {
            link: &group.key,
            text: &group.label,
        };
        fold_entries(items, parent, depth, &mut records);
    }

    tracing::debug!(
        groups = navigation.len(),
        records = records.len(),
        "Flattened navigation"
    );

    Ok(records)
}

fn fold_entries(
    entries: &[NavigationEntry],
    parent: Parent<'_>,
    depth: Depth,
    records: &mut Vec<ContentRecord>,
) {
    for entry in entries {
        records.push(ContentRecord::project(entry, parent));

        if depth == Depth::Unbounded
            && let Some(children) = entry.items.as_deref()
        {
            let nested = Parent {
                link: entry.link.as_deref().unwrap_or(parent.link),
                text: &entry.text,
            };
            fold_entries(children, nested, depth, records);
        }
    }
}
