use std::collections::HashMap;
use std::fmt;

use tracing::debug;
use url::Url;

use super::schema::RawAsset;
use crate::error::{ModelError, Result};
use crate::services::text_ops::random_token;

/// Checked in this order. `mp4` and `webm` are listed for audio and video;
/// audio is checked first and wins.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "gif", "webp"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "ogg", "aac", "mp4", "webm"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "ogv", "webm"];

const ASSET_ID_LEN: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssetType {
    #[default]
    Image,
    Audio,
    Video,
    /// A type string this version does not know, kept verbatim.
    Other(String),
}

impl AssetType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "image" => Self::Image,
            "audio" => Self::Audio,
            "video" => Self::Video,
            other => Self::Other(other.to_string()),
        }
    }

    /// Infer the media type from the file extension at the end of a URL.
    ///
    /// Everything after the last `.` of the URL is taken as the extension and
    /// matched by suffix, case-insensitively.
    pub fn sniff(url: &str) -> Option<Self> {
        let ext = url.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
        let matches = |list: &[&str]| list.iter().any(|e| ext.ends_with(e));

        if matches(IMAGE_EXTENSIONS) {
            Some(Self::Image)
        } else if matches(AUDIO_EXTENSIONS) {
            Some(Self::Audio)
        } else if matches(VIDEO_EXTENSIONS) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse `input` as an absolute URL. Relative URLs are rejected.
pub fn normalize_url(input: &str) -> Result<Url> {
    Url::parse(input).map_err(|source| ModelError::MalformedUrl {
        url: input.to_string(),
        source,
    })
}

/// A media file referenced by the module. The URL is always absolute and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: String,
    pub kind: AssetType,
    url: Url,
}

impl Asset {
    pub fn new(url: &str, id: Option<String>, kind: AssetType) -> Result<Self> {
        Ok(Self {
            id: id.filter(|id| !id.is_empty()).unwrap_or_else(|| random_token(ASSET_ID_LEN)),
            kind,
            url: normalize_url(url)?,
        })
    }

    /// Build from a stored record. The type is taken as given, never inferred.
    pub fn from_raw(raw: &RawAsset) -> Result<Self> {
        let kind = raw.kind.as_deref().map(AssetType::parse).unwrap_or_default();
        Self::new(&raw.url, raw.id.clone(), kind)
    }

    /// Create an asset with a fresh id, inferring its type from the URL's extension.
    pub fn from_url(url: &str) -> Result<Self> {
        let url = normalize_url(url)?;
        let kind = AssetType::sniff(url.as_str())
            .ok_or_else(|| ModelError::UnsupportedMediaType(url.to_string()))?;

        Ok(Self {
            id: random_token(ASSET_ID_LEN),
            kind,
            url,
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Last path segment of the URL, e.g. `img.png`.
    pub fn filename(&self) -> String {
        self.url
            .path_segments()
            .and_then(|segments| segments.last())
            .unwrap_or("")
            .to_string()
    }

    pub fn to_raw(&self) -> RawAsset {
        RawAsset {
            id: Some(self.id.clone()),
            kind: Some(self.kind.as_str().to_string()),
            url: self.url.to_string(),
        }
    }
}

/// Ordered asset registry. Lookups return the first asset with a matching id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assets {
    items: Vec<Asset>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw(records: &[RawAsset]) -> Result<Self> {
        let items = records.iter().map(Asset::from_raw).collect::<Result<Vec<_>>>()?;
        Ok(Self { items })
    }

    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.items.iter().find(|asset| asset.id == id)
    }

    pub fn push(&mut self, asset: Asset) {
        self.items.push(asset);
    }

    /// Register a new asset for `url` and return it.
    pub fn add_from_url(&mut self, url: &str) -> Result<&Asset> {
        let asset = Asset::from_url(url)?;
        debug!("Registered {} asset {} for {}", asset.kind, asset.id, asset.url());
        self.items.push(asset);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Id to asset map. With duplicate ids the later asset wins.
    pub fn by_id(&self) -> HashMap<&str, &Asset> {
        self.items.iter().map(|asset| (asset.id.as_str(), asset)).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Asset> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_raw(&self) -> Vec<RawAsset> {
        self.items.iter().map(Asset::to_raw).collect()
    }
}

impl<'a> IntoIterator for &'a Assets {
    type Item = &'a Asset;
    type IntoIter = std::slice::Iter<'a, Asset>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_image_extensions() {
        for url in ["https://x.test/a.png", "https://x.test/a.JPG", "https://x.test/a.gif", "https://x.test/a.webp"] {
            assert_eq!(AssetType::sniff(url), Some(AssetType::Image), "{url}");
        }
    }

    #[test]
    fn test_sniff_audio_wins_over_video() {
        assert_eq!(AssetType::sniff("https://x.test/a.mp3"), Some(AssetType::Audio));
        assert_eq!(AssetType::sniff("https://x.test/a.mp4"), Some(AssetType::Audio));
        assert_eq!(AssetType::sniff("https://x.test/a.webm"), Some(AssetType::Audio));
        assert_eq!(AssetType::sniff("https://x.test/a.avi"), Some(AssetType::Video));
        assert_eq!(AssetType::sniff("https://x.test/a.ogv"), Some(AssetType::Video));
    }

    #[test]
    fn test_sniff_unknown() {
        assert_eq!(AssetType::sniff("https://x.test/a.txt"), None);
        assert_eq!(AssetType::sniff("https://x.test/a.png?w=10"), None);
        assert_eq!(AssetType::sniff("https://x.test/image"), None);
    }

    #[test]
    fn test_from_url_normalizes() {
        let asset = Asset::from_url("HTTPS://X.test/dir/../img.png").unwrap();
        assert_eq!(asset.url(), "https://x.test/img.png");
        assert_eq!(asset.kind, AssetType::Image);
        assert_eq!(asset.id.len(), ASSET_ID_LEN);
    }

    #[test]
    fn test_from_url_relative_is_malformed() {
        let err = Asset::from_url("img.png").unwrap_err();
        assert!(matches!(err, ModelError::MalformedUrl { .. }));
    }

    #[test]
    fn test_from_url_unsupported_type() {
        let err = Asset::from_url("https://x.test/doc.pdf").unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedMediaType(_)));
    }

    #[test]
    fn test_from_raw_keeps_declared_type() {
        let raw = RawAsset {
            id: Some("a1".to_string()),
            kind: Some("video".to_string()),
            url: "https://x.test/clip.png".to_string(),
        };
        let asset = Asset::from_raw(&raw).unwrap();
        assert_eq!(asset.id, "a1");
        assert_eq!(asset.kind, AssetType::Video);
        assert_eq!(asset.to_raw(), raw);
    }

    #[test]
    fn test_from_raw_defaults() {
        let raw = RawAsset {
            id: None,
            kind: None,
            url: "https://x.test/a.png".to_string(),
        };
        let asset = Asset::from_raw(&raw).unwrap();
        assert!(!asset.id.is_empty());
        assert_eq!(asset.kind, AssetType::Image);
    }

    #[test]
    fn test_unknown_type_round_trips() {
        assert_eq!(AssetType::parse("document"), AssetType::Other("document".to_string()));
        assert_eq!(AssetType::parse("document").as_str(), "document");
    }

    #[test]
    fn test_filename() {
        let asset = Asset::from_url("https://x.test/media/photo.jpg").unwrap();
        assert_eq!(asset.filename(), "photo.jpg");
    }

    #[test]
    fn test_registry_lookup_and_append() {
        let mut assets = Assets::new();
        assert!(assets.is_empty());

        let id = assets.add_from_url("https://x.test/a.png").unwrap().id.clone();
        assets.push(Asset::new("https://x.test/b.mp3", Some("b".to_string()), AssetType::Audio).unwrap());

        assert_eq!(assets.len(), 2);
        assert_eq!(assets.get(&id).unwrap().url(), "https://x.test/a.png");
        assert_eq!(assets.get("b").unwrap().kind, AssetType::Audio);
        assert!(assets.get("missing").is_none());

        let ids: Vec<&str> = assets.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec![id.as_str(), "b"]);
    }

    #[test]
    fn test_registry_first_match_wins() {
        let mut assets = Assets::new();
        assets.push(Asset::new("https://x.test/1.png", Some("dup".to_string()), AssetType::Image).unwrap());
        assets.push(Asset::new("https://x.test/2.png", Some("dup".to_string()), AssetType::Image).unwrap());
        assert_eq!(assets.get("dup").unwrap().url(), "https://x.test/1.png");
        assert_eq!(assets.by_id()["dup"].url(), "https://x.test/2.png");
    }

    #[test]
    fn test_registry_from_raw_rejects_bad_url() {
        let records = vec![RawAsset {
            id: Some("a".to_string()),
            kind: None,
            url: "/relative.png".to_string(),
        }];
        assert!(Assets::from_raw(&records).is_err());
    }
}
