use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Ordering mode of a feed, as understood by the BFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    Latest,
    Trending,
    Recommended,
}

impl FeedSort {
    pub const ALL: [FeedSort; 3] = [FeedSort::Latest, FeedSort::Trending, FeedSort::Recommended];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedSort::Latest => "latest",
            FeedSort::Trending => "trending",
            FeedSort::Recommended => "recommended",
        }
    }
}

impl fmt::Display for FeedSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(FeedSort::Latest),
            "trending" => Ok(FeedSort::Trending),
            "recommended" => Ok(FeedSort::Recommended),
            other => Err(format!(
                "unknown sort '{}', expected one of latest, trending, recommended",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub src: String,
    /// Poster image, only meaningful for video.
    #[serde(default, deserialize_with = "present_string", skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, deserialize_with = "present_string", skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub author: String,
    #[serde(default, deserialize_with = "present_string", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub content: String,
    pub published_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentItem {
    pub id: String,
    pub author: String,
    #[serde(default, deserialize_with = "present_string", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub content: String,
    pub published_at: String,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorMeta {
    #[serde(default, deserialize_with = "present_string", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_following: bool,
    #[serde(default)]
    pub is_bookmarked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(deserialize_with = "non_negative_count")]
    pub views: u64,
    #[serde(deserialize_with = "non_negative_count")]
    pub bookmarks: u64,
    pub rating: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Details {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

/// One shared post as delivered by the BFF, with every default filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub topic: String,
    pub tags: Vec<String>,
    pub author: String,
    #[serde(default)]
    pub author_meta: AuthorMeta,
    pub published_at: String,
    pub engagement: Engagement,
    #[serde(default)]
    pub details: Details,
    #[serde(default)]
    pub comments: Vec<CommentItem>,
}

pub const DEFAULT_CACHE_TTL_SECONDS: f64 = 60.0;

fn default_cache_ttl() -> f64 {
    DEFAULT_CACHE_TTL_SECONDS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub items: Vec<FeedItem>,
    /// How long the caller may treat this payload as fresh. Zero means do not cache.
    #[serde(default = "default_cache_ttl", deserialize_with = "non_negative_number")]
    pub cache_ttl_seconds: f64,
}

/// An optional string may be omitted, but an explicit `null` is a type error.
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

fn non_negative_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(de::Error::invalid_value(Unexpected::Float(v), &"a non-negative number"))
    }
}

/// Counts arrive as JSON numbers; `1280` and `1280.0` are both fine, `-1` and `2.5` are not.
fn non_negative_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer-valued number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
                Ok(v as u64)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "content.viewed")]
    Viewed,
    #[serde(rename = "content.bookmarked")]
    Bookmarked,
}

/// An engagement event before it is stamped with `occurredAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEvent {
    pub event: EventKind,
    pub content_id: String,
    pub sort: FeedSort,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl ContentEvent {
    pub fn viewed(content_id: impl Into<String>, sort: FeedSort) -> Self {
        Self::new(EventKind::Viewed, content_id, sort)
    }

    pub fn bookmarked(content_id: impl Into<String>, sort: FeedSort) -> Self {
        Self::new(EventKind::Bookmarked, content_id, sort)
    }

    fn new(event: EventKind, content_id: impl Into<String>, sort: FeedSort) -> Self {
        Self {
            event,
            content_id: content_id.into(),
            sort,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}
