//! Typed, range-annotated content blocks.
//!
//! A notification or activity is made of blocks. Each block has some text,
//! ranges over that text that carry links or styling, and optionally a set
//! of actions the viewer can take on it. Lookups on this model never fail:
//! a missing action reads as disabled and off, a missing range as `None`.

#[macro_use]
mod tag;

mod action;
mod block;
mod group;
mod media;
mod range;

use serde_json::Value;

pub use action::{ActionIdentifier, ContentAction};
pub use block::{
    BlockBody, BlockVariant, ButtonContent, CommentContent, ContentBlock, ImageContent,
    TextContent, UnparseableContent, UserContent,
};
pub use group::{ContentGroup, GroupKind};
pub use media::{MediaItem, MediaKind};
pub use range::{ContentRange, RangeKind, TextSpan};

string_tag!(
    /// Category of a content block.
    ContentKind
);

impl ContentKind {
    pub const TEXT: ContentKind = ContentKind::from_static("text");
    pub const IMAGE: ContentKind = ContentKind::from_static("image");
    pub const USER: ContentKind = ContentKind::from_static("user");
    pub const COMMENT: ContentKind = ContentKind::from_static("comment");
    pub const BUTTON: ContentKind = ContentKind::from_static("button");
    pub const UNPARSEABLE: ContentKind = ContentKind::from_static("unparseable");
}

/// Read contract shared by every renderable block.
pub trait FormattableContent {
    fn text(&self) -> Option<&str>;
    /// Ranges in the order the server listed them.
    fn ranges(&self) -> &[ContentRange];
    fn actions(&self) -> Option<&[ContentAction]>;
    fn kind(&self) -> ContentKind;

    /// First action with the given identifier.
    fn action(&self, id: &ActionIdentifier) -> Option<&ContentAction> {
        self.actions()?
            .iter()
            .find(|action| &action.identifier == id)
    }
    fn is_action_enabled(&self, id: &ActionIdentifier) -> bool {
        self.action(id).is_some_and(|action| action.enabled)
    }
    fn is_action_on(&self, id: &ActionIdentifier) -> bool {
        self.action(id).is_some_and(|action| action.on)
    }
    /// Link range whose URL is exactly `url`. No normalization is applied.
    fn range_with_url(&self, url: &str) -> Option<&ContentRange> {
        self.ranges()
            .iter()
            .filter(|range| range.is_link())
            .find(|range| range.url.as_deref() == Some(url))
    }
}

/// Server ids arrive as numbers or as numeric strings.
pub(crate) fn id_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}
