//! Sidebar navigation model.
//!
//! The sidebar is authored as an ordered map from a path key to one or more
//! groups of links (see [`Sidebar`]). [`Navigation`] is the normalized form:
//! a list of [`NavigationGroup`]s in declaration order, each carrying the key
//! it was declared under.
//!
//! # Example
//!
//! ```
//! use osd_site::{Navigation, NavigationEntry, NavigationGroup};
//!
//! let navigation = Navigation::new(vec![NavigationGroup::new(
//!     "/",
//!     "Guide",
//!     vec![NavigationEntry::page("Quick start", "/guide/")],
//! )]);
//!
//! assert_eq!(navigation.len(), 1);
//! assert_eq!(navigation.entry_count(), 1);
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single sidebar entry.
///
/// Attributes the site framework understands but this crate does not
/// (`collapsed`, `activeMatch`, ...) are kept verbatim in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// Display label.
    pub text: String,
    /// Destination path. `None` for a bare heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Ordered tags attached to the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Nested entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavigationEntry>>,
    /// Passthrough attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NavigationEntry {
    /// Create an entry linking to `link`.
    pub fn page(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            tags: None,
            items: None,
            extra: Map::new(),
        }
    }

    /// Create a heading-only entry without a destination.
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
            tags: None,
            items: None,
            extra: Map::new(),
        }
    }

    /// Attach tags to the entry.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Attach nested entries.
    #[must_use]
    pub fn with_items(mut self, items: Vec<NavigationEntry>) -> Self {
        self.items = Some(items);
        self
    }

    /// Attach a passthrough attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// A labelled group of entries owned by a sidebar key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationGroup {
    /// Sidebar key the group was declared under (e.g. `/` or `/broker/`).
    pub key: String,
    /// Display label of the group.
    pub label: String,
    /// Entries of the group.
    ///
    /// Optional so that a group authored without entries can be reported
    /// instead of rejected by the parser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavigationEntry>>,
}

impl NavigationGroup {
    /// Create a group with entries.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        items: Vec<NavigationEntry>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            items: Some(items),
        }
    }
}

/// Navigation groups in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Navigation {
    groups: Vec<NavigationGroup>,
}

impl Navigation {
    /// Create navigation from groups, keeping their order.
    #[must_use]
    pub fn new(groups: Vec<NavigationGroup>) -> Self {
        Self { groups }
    }

    /// Groups in declaration order.
    #[must_use]
    pub fn groups(&self) -> &[NavigationGroup] {
        &self.groups
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the navigation has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of top-level entries across all groups.
    ///
    /// Groups without an entry list count as zero.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.groups
            .iter()
            .filter_map(|group| group.items.as_ref())
            .map(Vec::len)
            .sum()
    }
}

impl FromIterator<NavigationGroup> for Navigation {
    fn from_iter<T: IntoIterator<Item = NavigationGroup>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Body of a group as written in the sidebar, without its key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SidebarGroup {
    /// Display label.
    pub text: String,
    /// Entries of the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavigationEntry>>,
}

/// Groups declared under one sidebar key.
///
/// Deserializes from a table (one group) or an array (several groups).
/// Errors inside either shape are reported as-is.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SidebarGroups {
    /// A single group.
    One(SidebarGroup),
    /// Several groups sharing the key, in order.
    Many(Vec<SidebarGroup>),
}

impl<'de> Deserialize<'de> for SidebarGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SidebarGroupsVisitor)
    }
}

struct SidebarGroupsVisitor;

impl<'de> Visitor<'de> for SidebarGroupsVisitor {
    type Value = SidebarGroups;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sidebar group or a list of sidebar groups")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        SidebarGroup::deserialize(MapAccessDeserializer::new(map)).map(SidebarGroups::One)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        Vec::<SidebarGroup>::deserialize(SeqAccessDeserializer::new(seq)).map(SidebarGroups::Many)
    }
}

impl SidebarGroups {
    fn into_vec(self) -> Vec<SidebarGroup> {
        match self {
            Self::One(group) => vec![group],
            Self::Many(groups) => groups,
        }
    }
}

/// Sidebar as authored in site configuration.
///
/// Keys keep their declaration order, which becomes the group order of
/// the resulting [`Navigation`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sidebar(IndexMap<String, SidebarGroups>);

impl Sidebar {
    /// Create an empty sidebar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare groups under `key`. A repeated key replaces the earlier
    /// declaration but keeps its position.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, groups: SidebarGroups) -> Self {
        self.0.insert(key.into(), groups);
        self
    }

    /// Whether no keys are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Declared keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Normalize into [`Navigation`] without consuming the sidebar.
    #[must_use]
    pub fn to_navigation(&self) -> Navigation {
        self.clone().into_navigation()
    }

    /// Normalize into [`Navigation`]: one group per declared group body,
    /// keyed by the sidebar key it was declared under.
    #[must_use]
    pub fn into_navigation(self) -> Navigation {
        self.0
            .into_iter()
            .flat_map(|(key, groups)| {
                groups
                    .into_vec()
                    .into_iter()
                    .map(move |group| NavigationGroup {
                        key: key.clone(),
                        label: group.text,
                        items: group.items,
                    })
            })
            .collect()
    }
}

impl From<Sidebar> for Navigation {
    fn from(sidebar: Sidebar) -> Self {
        sidebar.into_navigation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn group(text: &str, items: Vec<NavigationEntry>) -> SidebarGroup {
        SidebarGroup {
            text: text.to_owned(),
            items: Some(items),
        }
    }

    #[test]
    fn test_entry_deserialize_keeps_passthrough_attributes() {
        let entry: NavigationEntry = serde_json::from_value(json!({
            "text": "Redis",
            "link": "/broker/redis",
            "collapsed": true,
            "activeMatch": "^/broker/"
        }))
        .unwrap();

        assert_eq!(entry.text, "Redis");
        assert_eq!(entry.link.as_deref(), Some("/broker/redis"));
        assert!(entry.tags.is_none());
        assert_eq!(entry.extra.get("collapsed"), Some(&json!(true)));
        assert_eq!(entry.extra.get("activeMatch"), Some(&json!("^/broker/")));
    }

    #[test]
    fn test_entry_without_link_is_heading() {
        let entry: NavigationEntry = serde_json::from_value(json!({ "text": "实战" })).unwrap();

        assert_eq!(entry, NavigationEntry::heading("实战"));
    }

    #[test]
    fn test_entry_serialization_skips_absent_fields() {
        let entry = NavigationEntry::page("Cron", "/broker/cron");

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json, json!({ "text": "Cron", "link": "/broker/cron" }));
    }

    #[test]
    fn test_entry_nested_items_deserialize() {
        let entry: NavigationEntry = serde_json::from_value(json!({
            "text": "Broker",
            "items": [{ "text": "Memory", "link": "/broker/memory" }]
        }))
        .unwrap();

        let items = entry.items.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Memory");
        assert!(entry.extra.is_empty());
    }

    #[test]
    fn test_sidebar_single_and_list_forms() {
        let sidebar: Sidebar = serde_json::from_value(json!({
            "/": [
                { "text": "指南", "items": [{ "text": "快速开始", "link": "/guide/" }] },
                { "text": "OneStep", "items": [{ "text": "broker", "link": "/core/broker" }] }
            ],
            "/broker/": {
                "text": "Broker",
                "items": [{ "text": "Memory", "link": "/broker/memory" }]
            }
        }))
        .unwrap();

        let navigation = sidebar.into_navigation();

        let groups: Vec<_> = navigation
            .groups()
            .iter()
            .map(|g| (g.key.as_str(), g.label.as_str()))
            .collect();
        assert_eq!(
            groups,
            vec![("/", "指南"), ("/", "OneStep"), ("/broker/", "Broker")]
        );
        assert_eq!(navigation.entry_count(), 3);
    }

    #[test]
    fn test_sidebar_preserves_declaration_order() {
        let sidebar = Sidebar::new()
            .with("/zeta/", SidebarGroups::One(group("Zeta", vec![])))
            .with("/alpha/", SidebarGroups::One(group("Alpha", vec![])));

        assert_eq!(sidebar.keys().collect::<Vec<_>>(), vec!["/zeta/", "/alpha/"]);

        let navigation = Navigation::from(sidebar);
        assert_eq!(navigation.groups()[0].label, "Zeta");
        assert_eq!(navigation.groups()[1].label, "Alpha");
    }

    #[test]
    fn test_sidebar_group_without_items_is_kept() {
        let sidebar: Sidebar =
            serde_json::from_value(json!({ "/": [{ "text": "Broken" }] })).unwrap();

        let navigation = sidebar.to_navigation();

        assert_eq!(navigation.len(), 1);
        assert!(navigation.groups()[0].items.is_none());
        assert_eq!(navigation.entry_count(), 0);
    }

    #[test]
    fn test_sidebar_group_without_text_reports_field() {
        let err = serde_json::from_value::<Sidebar>(json!({
            "/": [{ "items": [{ "text": "a", "link": "/a" }] }]
        }))
        .unwrap_err();

        assert!(err.to_string().contains("missing field `text`"), "got: {err}");
    }

    #[test]
    fn test_sidebar_entry_without_text_reports_field() {
        let err = serde_json::from_value::<Sidebar>(json!({
            "/broker/": { "text": "Broker", "items": [{ "link": "/broker/redis" }] }
        }))
        .unwrap_err();

        assert!(err.to_string().contains("missing field `text`"), "got: {err}");
    }

    #[test]
    fn test_sidebar_scalar_value_is_rejected() {
        let err = serde_json::from_value::<Sidebar>(json!({ "/": "Guide" })).unwrap_err();

        assert!(
            err.to_string().contains("a sidebar group or a list of sidebar groups"),
            "got: {err}"
        );
    }

    #[test]
    fn test_empty_sidebar_gives_empty_navigation() {
        let navigation = Sidebar::new().into_navigation();

        assert!(navigation.is_empty());
        assert_eq!(navigation.entry_count(), 0);
    }

    #[test]
    fn test_navigation_serializes_as_group_list() {
        let navigation = Navigation::new(vec![NavigationGroup::new(
            "/",
            "Guide",
            vec![NavigationEntry::page("Quick start", "/guide/")],
        )]);

        let json = serde_json::to_value(&navigation).unwrap();

        assert_eq!(json[0]["key"], "/");
        assert_eq!(json[0]["label"], "Guide");
        assert_eq!(json[0]["items"][0]["link"], "/guide/");
    }
}
