use super::TextSpan;

string_tag!(
    /// Classification of a [`MediaItem`].
    MediaKind
);

impl MediaKind {
    pub const IMAGE: MediaKind = MediaKind::from_static("image");
    pub const BADGE: MediaKind = MediaKind::from_static("badge");
}

/// Media attached to a span of a block's text, such as a gravatar or an
/// achievement badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub span: TextSpan,
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl MediaItem {
    /// Image and badge media render the owning block as an image block.
    pub fn is_image_like(&self) -> bool {
        self.kind == MediaKind::IMAGE || self.kind == MediaKind::BADGE
    }
}
