//! Services layer - operations kept out of the domain types.
//!
//! - `migration` - version-gated schema migrations
//! - `navigation` - windowed step navigation
//! - `text_ops` - entity decoding, templates, coercion, random ids
//! - `video` - YouTube / Vimeo embed URLs

pub mod migration;
pub mod navigation;
pub mod text_ops;
pub mod video;
