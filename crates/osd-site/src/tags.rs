//! Article index for listing and tag widgets.

use indexmap::IndexMap;
use serde::Serialize;

use crate::article::ContentRecord;

/// Number of articles carrying a tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagCount<'a> {
    /// Tag name.
    pub tag: &'a str,
    /// Number of records carrying the tag.
    pub count: usize,
}

/// Read-only queries over flattened article records.
///
/// All queries keep the flattened order of the records.
#[derive(Clone, Debug, Default)]
pub struct ArticleIndex {
    records: Vec<ContentRecord>,
}

impl ArticleIndex {
    /// Create an index over `records`.
    #[must_use]
    pub fn new(records: Vec<ContentRecord>) -> Self {
        Self { records }
    }

    /// All records.
    #[must_use]
    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    /// Records that point to a page.
    pub fn pages(&self) -> impl Iterator<Item = &ContentRecord> {
        self.records.iter().filter(|record| !record.is_heading())
    }

    /// Distinct tags in first-seen order.
    ///
    /// A tag repeated on one record counts once for that record.
    #[must_use]
    pub fn tags(&self) -> Vec<TagCount<'_>> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for record in &self.records {
            let tags = record.tags();
            for (i, tag) in tags.iter().enumerate() {
                if tags[..i].contains(tag) {
                    continue;
                }
                *counts.entry(tag.as_str()).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect()
    }

    /// Records carrying `tag`.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a ContentRecord> {
        self.records.iter().filter(move |record| record.has_tag(tag))
    }

    /// Records grouped by the label of their owning group.
    #[must_use]
    pub fn by_parent(&self) -> IndexMap<&str, Vec<&ContentRecord>> {
        let mut groups: IndexMap<&str, Vec<&ContentRecord>> = IndexMap::new();
        for record in &self.records {
            groups
                .entry(record.parent_text.as_str())
                .or_default()
                .push(record);
        }
        groups
    }

    /// First record linking to `link`.
    #[must_use]
    pub fn find(&self, link: &str) -> Option<&ContentRecord> {
        self.records
            .iter()
            .find(|record| record.link.as_deref() == Some(link))
    }
}

impl From<Vec<ContentRecord>> for ArticleIndex {
    fn from(records: Vec<ContentRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::flatten;
    use crate::navigation::{Navigation, NavigationEntry, NavigationGroup};
    use pretty_assertions::assert_eq;

    fn index() -> ArticleIndex {
        let navigation = Navigation::new(vec![
            NavigationGroup::new(
                "/",
                "OneStep",
                vec![
                    NavigationEntry::page("broker", "/core/broker").with_tags(["core", "broker"]),
                    NavigationEntry::page("retry", "/core/retry").with_tags(["core"]),
                ],
            ),
            NavigationGroup::new(
                "/",
                "Broker",
                vec![
                    NavigationEntry::page("Redis", "/broker/redis")
                        .with_tags(["broker", "redis", "broker"]),
                    NavigationEntry::heading("Kafka(TODO)"),
                ],
            ),
        ]);
        ArticleIndex::new(flatten(&navigation).unwrap())
    }

    #[test]
    fn test_tags_first_seen_order_with_counts() {
        let index = index();

        assert_eq!(
            index.tags(),
            vec![
                TagCount { tag: "core", count: 2 },
                TagCount { tag: "broker", count: 2 },
                TagCount { tag: "redis", count: 1 },
            ]
        );
    }

    #[test]
    fn test_with_tag_filters_in_order() {
        let index = index();

        let texts: Vec<_> = index.with_tag("broker").map(|r| r.text.as_str()).collect();

        assert_eq!(texts, vec!["broker", "Redis"]);
        assert_eq!(index.with_tag("missing").count(), 0);
    }

    #[test]
    fn test_pages_skip_headings() {
        let index = index();

        assert_eq!(index.records().len(), 4);
        assert_eq!(index.pages().count(), 3);
    }

    #[test]
    fn test_by_parent_groups_in_first_seen_order() {
        let index = index();

        let groups = index.by_parent();

        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["OneStep", "Broker"]);
        assert_eq!(groups["Broker"].len(), 2);
    }

    #[test]
    fn test_find_by_link() {
        let index = index();

        let record = index.find("/core/retry").unwrap();

        assert_eq!(record.text, "retry");
        assert!(index.find("/nope").is_none());
    }

    #[test]
    fn test_empty_index() {
        let index = ArticleIndex::default();

        assert!(index.tags().is_empty());
        assert!(index.by_parent().is_empty());
        assert_eq!(index.pages().count(), 0);
    }
}
