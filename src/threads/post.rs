use serde::Deserialize;

/// Fields requested for every listed post
pub const POST_FIELDS: [&str; 6] = [
    "id",
    "text",
    "media_type",
    "media_url",
    "timestamp",
    "permalink",
];

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub media_type: Option<MediaType>,
    #[allow(unused)]
    #[serde(default)]
    pub media_url: Option<String>,
    /// `2025-11-06T10:23:05+0000`
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
}

impl Post {
    /// Reposts of someone else's thread carry no content or insights of their own
    pub fn is_repost(&self) -> bool {
        self.media_type == Some(MediaType::RepostFacade)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    TextPost,
    Image,
    Video,
    CarouselAlbum,
    Audio,
    RepostFacade,
    #[serde(other)]
    Unknown,
}
