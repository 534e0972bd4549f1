//! Local draft posts. A draft is a brand-new `FeedItem`; fetched items are
//! never edited.
use chrono::{SecondsFormat, Utc};
use regex::Regex;
use uuid::Uuid;

use crate::error::DraftError;
use crate::models::{AuthorMeta, Details, Engagement, FeedItem, FeedSort, MediaItem, MediaKind};

pub const DEFAULT_TOPIC: &str = "Quick share";
pub const DRAFT_AUTHOR: &str = "me";
const SUMMARY_CHARS: usize = 80;

lazy_static::lazy_static! {
    static ref VIDEO_SUFFIX: Regex = Regex::new(r"(mp4|mov|webm)$").unwrap();
    static ref AUDIO_SUFFIX: Regex = Regex::new(r"(mp3|wav|aac)$").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftInput {
    pub title: String,
    pub body: String,
    pub topic: Option<String>,
    pub media_url: Option<String>,
}

/// Guesses the media kind from the end of a URL; anything unrecognised is an image.
pub fn guess_media_kind(url: &str) -> MediaKind {
    let lower = url.to_lowercase();
    if VIDEO_SUFFIX.is_match(&lower) {
        MediaKind::Video
    } else if AUDIO_SUFFIX.is_match(&lower) {
        MediaKind::Audio
    } else {
        MediaKind::Image
    }
}

fn summarize(body: &str) -> String {
    if body.chars().count() > SUMMARY_CHARS {
        let head: String = body.chars().take(SUMMARY_CHARS).collect();
        format!("{}…", head)
    } else {
        body.to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Builds a draft post owned by the local user.
pub fn compose_draft(input: &DraftInput) -> Result<FeedItem, DraftError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(DraftError::MissingField("title"));
    }
    let body = input.body.trim();
    if body.is_empty() {
        return Err(DraftError::MissingField("body"));
    }

    let topic = non_empty(input.topic.as_deref()).unwrap_or(DEFAULT_TOPIC).to_string();
    let media = non_empty(input.media_url.as_deref())
        .map(|src| MediaItem {
            id: format!("media-{}", Uuid::new_v4()),
            kind: guess_media_kind(src),
            src: src.to_string(),
            cover: None,
            caption: Some(topic.clone()),
        })
        .into_iter()
        .collect();

    Ok(FeedItem {
        id: format!("local-{}", Uuid::new_v4()),
        title: title.to_string(),
        summary: summarize(body),
        tags: vec![topic.clone()],
        topic,
        author: DRAFT_AUTHOR.to_string(),
        author_meta: AuthorMeta {
            avatar: None,
            is_following: true,
            is_bookmarked: true,
        },
        published_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        engagement: Engagement {
            views: 0,
            bookmarks: 0,
            rating: 5.0,
        },
        details: Details {
            body: body.to_string(),
            media,
        },
        comments: Vec::new(),
    })
}

/// Locally published drafts, newest first.
#[derive(Debug, Default)]
pub struct DraftShelf {
    drafts: Vec<FeedItem>,
}

impl DraftShelf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, input: &DraftInput) -> Result<&FeedItem, DraftError> {
        let item = compose_draft(input)?;
        self.drafts.insert(0, item);
        Ok(&self.drafts[0])
    }

    pub fn drafts(&self) -> &[FeedItem] {
        &self.drafts
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Drafts lead the `latest` list; other sorts show fetched items only.
    pub fn displayed_items(&self, sort: FeedSort, fetched: &[FeedItem]) -> Vec<FeedItem> {
        match sort {
            FeedSort::Latest => self.drafts.iter().chain(fetched).cloned().collect(),
            _ => fetched.to_vec(),
        }
    }
}
