//! Hand-authored feed content served when the live feed is unusable.
use chrono::{Duration, SecondsFormat, Utc};
use std::collections::HashMap;

use crate::models::{
    AuthorMeta, CommentItem, Details, Engagement, FeedItem, FeedResponse, FeedSort, MediaItem,
    MediaKind, Reply,
};

lazy_static::lazy_static! {
    /// Built once on first use; timestamps are relative to that moment.
    static ref MOCK_ITEMS: HashMap<FeedSort, Vec<FeedItem>> = build_mock_items();
}

/// The fallback feed for `sort`. The TTL is zero so no cache keeps it around.
pub fn mock_feed(sort: FeedSort) -> FeedResponse {
    FeedResponse {
        items: MOCK_ITEMS.get(&sort).cloned().unwrap_or_default(),
        cache_ttl_seconds: 0.0,
    }
}

fn ago(seconds: i64) -> String {
    (Utc::now() - Duration::seconds(seconds)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn media(id: &str, kind: MediaKind, src: &str, cover: Option<&str>, caption: &str) -> MediaItem {
    MediaItem {
        id: id.to_string(),
        kind,
        src: src.to_string(),
        cover: cover.map(String::from),
        caption: Some(caption.to_string()),
    }
}

struct Seed<'a> {
    id: &'a str,
    title: &'a str,
    summary: &'a str,
    topic: &'a str,
    tags: &'a [&'a str],
    author: &'a str,
    avatar: &'a str,
    following: bool,
    bookmarked: bool,
    age_seconds: i64,
    engagement: (u64, u64, f64),
    body: &'a str,
}

impl Seed<'_> {
    fn into_item(self, media: Vec<MediaItem>, comments: Vec<CommentItem>) -> FeedItem {
        let (views, bookmarks, rating) = self.engagement;
        FeedItem {
            id: self.id.to_string(),
            title: self.title.to_string(),
            summary: self.summary.to_string(),
            topic: self.topic.to_string(),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            author: self.author.to_string(),
            author_meta: AuthorMeta {
                avatar: Some(self.avatar.to_string()),
                is_following: self.following,
                is_bookmarked: self.bookmarked,
            },
            published_at: ago(self.age_seconds),
            engagement: Engagement { views, bookmarks, rating },
            details: Details {
                body: self.body.to_string(),
                media,
            },
            comments,
        }
    }
}

fn build_mock_items() -> HashMap<FeedSort, Vec<FeedItem>> {
    let mut items = HashMap::new();
    items.insert(FeedSort::Latest, latest());
    items.insert(FeedSort::Trending, trending());
    items.insert(FeedSort::Recommended, recommended());
    items
}

fn latest() -> Vec<FeedItem> {
    vec![
        Seed {
            id: "latest-1",
            title: "First coffee of the day: a bookshop around the corner",
            summary: "Visiting the new neighbourhood bookshop and talking book picks over coffee.",
            topic: "Lifestyle",
            tags: &["city", "coffee", "bookshop"],
            author: "Axu",
            avatar: "https://placehold.co/64x64?text=AX",
            following: false,
            bookmarked: false,
            age_seconds: 0,
            engagement: (1280, 64, 4.6),
            body: "A walk after the rain led me to this new bookshop. The owner keeps the espresso machine by the window so readers can browse indie magazines with a record playing.",
        }
        .into_item(
            vec![
                media("media-ax-1", MediaKind::Image, "https://placehold.co/620x360", None, "Plants at the door"),
                media(
                    "media-ax-2",
                    MediaKind::Audio,
                    "https://filesampleshub.com/download/audio/mp3/sample-3.mp3",
                    None,
                    "A chat with the owner",
                ),
            ],
            vec![CommentItem {
                id: "c-ax-1".to_string(),
                author: "Shanshan".to_string(),
                avatar: Some("https://placehold.co/40x40?text=SS".to_string()),
                content: "Their scones are wonderful!".to_string(),
                published_at: ago(3600),
                replies: vec![Reply {
                    id: "c-ax-1-r1".to_string(),
                    author: "Axu".to_string(),
                    avatar: Some("https://placehold.co/32x32?text=AX".to_string()),
                    content: "Let's go together next time".to_string(),
                    published_at: ago(1800),
                }],
            }],
        ),
        Seed {
            id: "latest-2",
            title: "Three small things on the commute that lift your mood",
            summary: "A five-minute routine for making peace with rush hour.",
            topic: "Productivity",
            tags: &["commute", "habits", "mood"],
            author: "Zebra",
            avatar: "https://placehold.co/64x64?text=ZM",
            following: true,
            bookmarked: false,
            age_seconds: 0,
            engagement: (980, 103, 4.4),
            body: "Fold music, scent and a five-minute stretch into the commute. A downloadable playlist is included.",
        }
        .into_item(
            vec![media(
                "media-zm-1",
                MediaKind::Audio,
                "https://filesampleshub.com/download/audio/mp3/sample-6.mp3",
                None,
                "Morning podcast clip",
            )],
            vec![],
        ),
        Seed {
            id: "latest-3",
            title: "After-rain photo guide: street reflections on a phone",
            summary: "Three framing tricks for film-like shots from a phone camera.",
            topic: "Photography",
            tags: &["phone", "tutorial", "film look"],
            author: "Lin Ke",
            avatar: "https://placehold.co/64x64?text=LK",
            following: false,
            bookmarked: true,
            age_seconds: 0,
            engagement: (1560, 320, 4.8),
            body: "Overcast and rainy streets are ideal for reflections. Three framings are shown with the original settings for practice.",
        }
        .into_item(
            vec![
                media(
                    "media-lk-1",
                    MediaKind::Image,
                    "https://placehold.co/640x360?text=Reflection",
                    None,
                    "Street reflection",
                ),
                media(
                    "media-lk-2",
                    MediaKind::Video,
                    "https://filesampleshub.com/download/video/mp4/sample-5.mp4",
                    Some("https://placehold.co/640x360?text=Video"),
                    "Behind the shot",
                ),
            ],
            vec![],
        ),
    ]
}

fn trending() -> Vec<FeedItem> {
    vec![
        Seed {
            id: "trending-1",
            title: "Travel season: two days of eating through Chengdu",
            summary: "A 16-hour city walk with coffee, exhibitions and late-night noodles.",
            topic: "Travel season",
            tags: &["chengdu", "itinerary", "check-in"],
            author: "Munan",
            avatar: "https://placehold.co/64x64?text=MN",
            following: true,
            bookmarked: false,
            age_seconds: 3600,
            engagement: (6230, 880, 4.9),
            body: "A two-day route through Chengdu covering coffee, exhibitions and a late-night food map.",
        }
        .into_item(
            vec![media("media-mn-1", MediaKind::Image, "https://placehold.co/620x360?text=CD", None, "Spring streets")],
            vec![],
        ),
        Seed {
            id: "trending-2",
            title: "Desk inspiration from ten creators",
            summary: "Community favourite desk setups with lighting, storage and scent tips.",
            topic: "Creator marathon",
            tags: &["desk", "storage", "inspiration"],
            author: "Lois",
            avatar: "https://placehold.co/64x64?text=L",
            following: false,
            bookmarked: false,
            age_seconds: 7200,
            engagement: (7110, 1320, 4.7),
            body: "Ten popular desk setups with advice on lighting, storage and scent.",
        }
        .into_item(
            vec![media("media-lo-1", MediaKind::Image, "https://placehold.co/640x360?text=Desk", None, "Minimal desk")],
            vec![],
        ),
        Seed {
            id: "trending-3",
            title: "The Spring Chill playlist everyone is talking about",
            summary: "25 lesser-known spring tracks picked by community DJs.",
            topic: "Music",
            tags: &["playlist", "spring", "ambient"],
            author: "Echo",
            avatar: "https://placehold.co/64x64?text=EC",
            following: false,
            bookmarked: false,
            age_seconds: 5400,
            engagement: (4890, 940, 4.5),
            body: "A spring-only indie playlist with links for two platforms.",
        }
        .into_item(
            vec![media(
                "media-ec-1",
                MediaKind::Audio,
                "https://filesampleshub.com/download/audio/mp3/sample-9.mp3",
                None,
                "Playlist preview",
            )],
            vec![],
        ),
    ]
}

fn recommended() -> Vec<FeedItem> {
    vec![
        Seed {
            id: "recommended-1",
            title: "Picked for you: a day in Xiaoyuzhou's studio",
            summary: "Behind the scenes with an author you follow as she prepares new work.",
            topic: "Followed authors",
            tags: &["essay", "creation", "behind the scenes"],
            author: "Xiaoyuzhou",
            avatar: "https://placehold.co/64x64?text=XY",
            following: true,
            bookmarked: true,
            age_seconds: 86400,
            engagement: (2100, 450, 4.9),
            body: "Notes on where ideas come from, from first sketch to published illustration.",
        }
        .into_item(
            vec![media("media-xy-1", MediaKind::Image, "https://placehold.co/640x360?text=Sketch", None, "First sketch")],
            vec![],
        ),
        Seed {
            id: "recommended-2",
            title: "Community favourites: handmade craft videos",
            summary: "Three short films matched to your bookmarks, with material lists.",
            topic: "Handmade",
            tags: &["video", "diy", "bookmarks"],
            author: "Slow Hands",
            avatar: "https://placehold.co/64x64?text=MS",
            following: false,
            bookmarked: false,
            age_seconds: 43200,
            engagement: (3650, 770, 4.6),
            body: "Three short videos walking through handmade jewellery.",
        }
        .into_item(
            vec![media(
                "media-ms-1",
                MediaKind::Video,
                "https://filesampleshub.com/download/video/mp4/sample-2.mp4",
                Some("https://placehold.co/640x360?text=DIY"),
                "Making of",
            )],
            vec![],
        ),
        Seed {
            id: "recommended-3",
            title: "Interests first: AI painting in three minutes",
            summary: "A short tutorial from your browsing history covering prompts and practice.",
            topic: "Inspiration camp",
            tags: &["ai", "painting", "tutorial"],
            author: "Shanmu",
            avatar: "https://placehold.co/64x64?text=SM",
            following: true,
            bookmarked: false,
            age_seconds: 21600,
            engagement: (2980, 640, 4.7),
            body: "Key prompts and practice routines for getting started with AI painting, with tool links.",
        }
        .into_item(vec![], vec![]),
    ]
}
