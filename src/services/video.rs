use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::{ModelError, Result};

// Accepts watch, short, embed, v/ and user-channel links.
static YOUTUBE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(?:(?:youtu.be/)|(?:v/)|(?:/u/\w/)|(?:embed/)|(?:watch\?))\??v?=?([\w-]{11}).*")
        .expect("YouTube pattern is valid")
});

static VIMEO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.|player\.)?vimeo\.com/(?:channels/(?:\w+/)?|groups/[^/]+/videos/|album/\d+/video/|video/)?(\d+)(?:$|[/?#])",
    )
    .expect("Vimeo pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoProvider {
    Youtube,
    Vimeo,
}

impl VideoProvider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Youtube => "YouTube",
            Self::Vimeo => "Vimeo",
        }
    }

    /// Extract the provider's video id from a share/watch URL.
    pub fn video_id<'a>(&self, url: &'a str) -> Option<&'a str> {
        let regex = match self {
            Self::Youtube => &*YOUTUBE_REGEX,
            Self::Vimeo => &*VIMEO_REGEX,
        };
        regex.captures(url).and_then(|caps| caps.get(1)).map(|m| m.as_str())
    }

    /// Privacy-friendly embed URL for the video referenced by `url`.
    pub fn embed_url(&self, url: &str) -> Result<String> {
        let id = self.video_id(url).ok_or_else(|| ModelError::VideoIdNotFound {
            provider: self.name(),
            url: url.to_string(),
        })?;

        Ok(match self {
            Self::Youtube => format!("https://www.youtube-nocookie.com/embed/{}?rel=0&showinfo=0", id),
            Self::Vimeo => format!("https://player.vimeo.com/video/{}?dnt=1", id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_url_forms() {
        let p = VideoProvider::Youtube;
        assert_eq!(p.video_id("https://www.youtube.com/watch?v=SKUZYdnDJBI"), Some("SKUZYdnDJBI"));
        assert_eq!(p.video_id("https://youtu.be/SKUZYdnDJBI"), Some("SKUZYdnDJBI"));
        assert_eq!(p.video_id("https://www.youtube.com/embed/SKUZYdnDJBI"), Some("SKUZYdnDJBI"));
        assert_eq!(p.video_id("https://www.youtube.com/v/SKUZYdnDJBI?fs=1"), Some("SKUZYdnDJBI"));
    }

    #[test]
    fn test_youtube_embed_url() {
        let url = VideoProvider::Youtube
            .embed_url("https://www.youtube.com/watch?v=SKUZYdnDJBI")
            .unwrap();
        assert_eq!(url, "https://www.youtube-nocookie.com/embed/SKUZYdnDJBI?rel=0&showinfo=0");
    }

    #[test]
    fn test_youtube_no_id() {
        let err = VideoProvider::Youtube.embed_url("https://example.com/video").unwrap_err();
        assert!(matches!(err, ModelError::VideoIdNotFound { provider: "YouTube", .. }));
    }

    #[test]
    fn test_vimeo_url_forms() {
        let p = VideoProvider::Vimeo;
        assert_eq!(p.video_id("https://vimeo.com/76979871"), Some("76979871"));
        assert_eq!(p.video_id("https://player.vimeo.com/video/76979871?h=1a2b"), Some("76979871"));
        assert_eq!(p.video_id("https://vimeo.com/channels/staffpicks/76979871"), Some("76979871"));
        assert_eq!(p.video_id("https://vimeo.com/about"), None);
    }

    #[test]
    fn test_vimeo_embed_url() {
        let url = VideoProvider::Vimeo.embed_url("https://vimeo.com/76979871").unwrap();
        assert_eq!(url, "https://player.vimeo.com/video/76979871?dnt=1");
    }

    #[test]
    fn test_vimeo_no_id() {
        let err = VideoProvider::Vimeo
            .embed_url("https://www.youtube.com/watch?v=SKUZYdnDJBI")
            .unwrap_err();
        assert!(matches!(err, ModelError::VideoIdNotFound { provider: "Vimeo", .. }));
    }
}
