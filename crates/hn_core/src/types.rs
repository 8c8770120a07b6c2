use serde::{Deserialize, Serialize};
use std::fmt;

pub type StoryId = u64;

/// Story ids from the top-story list, sorted ascending.
///
/// Sorting happens once at construction so that the upstream feed reordering
/// the same stories never changes the checksum.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoryIdSet(Vec<StoryId>);

impl StoryIdSet {
    pub fn new(mut ids: Vec<StoryId>) -> Self {
        ids.sort_unstable();
        Self(ids)
    }

    pub fn as_slice(&self) -> &[StoryId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = StoryId> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<StoryId>> for StoryIdSet {
    fn from(ids: Vec<StoryId>) -> Self {
        Self::new(ids)
    }
}

/// A single item from the feed. Only links carry both fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Story {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
        }
    }

    /// Renders the story, or `None` for items without a title or a link.
    pub fn into_record(self) -> Option<FormattedRecord> {
        match (self.title, self.url) {
            (Some(title), Some(url)) => Some(FormattedRecord::new(&title, &url)),
            _ => None,
        }
    }
}

/// `"<title>\n<url>\n\n"`, the unit of the cache file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord(String);

impl FormattedRecord {
    pub fn new(title: &str, url: &str) -> Self {
        Self(format!("{}\n{}\n\n", title, url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Concatenates records into the cache payload.
    pub fn join(records: &[FormattedRecord]) -> String {
        records.iter().map(FormattedRecord::as_str).collect()
    }
}

impl fmt::Display for FormattedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const CHECKSUM_LEN: usize = 32;

/// SHA-256 digest of a [`StoryIdSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum([u8; CHECKSUM_LEN]);

impl Checksum {
    pub fn from_bytes(bytes: [u8; CHECKSUM_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Byte-for-byte comparison against a stored digest of any length.
    pub fn matches(&self, stored: &[u8]) -> bool {
        self.0.as_slice() == stored
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_set_sorts_on_construction() {
        let ids = StoryIdSet::new(vec![5, 3, 9]);
        assert_eq!(ids.as_slice(), &[3, 5, 9]);
        assert_eq!(ids, StoryIdSet::from(vec![9, 3, 5]));
    }

    #[test]
    fn test_story_with_both_fields_formats() {
        let record = Story::new("Show HN: a thing", "https://example.com/thing")
            .into_record()
            .unwrap();
        assert_eq!(record.as_str(), "Show HN: a thing\nhttps://example.com/thing\n\n");
    }

    #[test]
    fn test_story_missing_a_field_is_dropped() {
        let ask = Story {
            title: Some("Ask HN: anything".to_string()),
            url: None,
        };
        assert!(ask.into_record().is_none());

        let untitled = Story {
            title: None,
            url: Some("https://example.com".to_string()),
        };
        assert!(untitled.into_record().is_none());
        assert!(Story::default().into_record().is_none());
    }

    #[test]
    fn test_story_ignores_extra_fields() {
        let json = r#"{"by":"pg","id":1,"score":57,"title":"Y Combinator","type":"story","url":"http://ycombinator.com"}"#;
        let story: Story = serde_json::from_str(json).unwrap();
        assert_eq!(story, Story::new("Y Combinator", "http://ycombinator.com"));
    }

    #[test]
    fn test_join_records() {
        let records = vec![FormattedRecord::new("a", "u1"), FormattedRecord::new("b", "u2")];
        assert_eq!(FormattedRecord::join(&records), "a\nu1\n\nb\nu2\n\n");
        assert_eq!(FormattedRecord::join(&[]), "");
    }

    #[test]
    fn test_checksum_matches_exact_bytes_only() {
        let checksum = Checksum::from_bytes([7; CHECKSUM_LEN]);
        assert!(checksum.matches(&[7; CHECKSUM_LEN]));
        assert!(!checksum.matches(&[7; CHECKSUM_LEN - 1]));
        assert!(!checksum.matches(&[]));
        assert_eq!(checksum.to_string(), "07".repeat(CHECKSUM_LEN));
    }
}
