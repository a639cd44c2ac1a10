//! Concrete content blocks.
//!
//! Every block the server sends decodes into one [`ContentBlock`] variant.
//! The variant fixes the block's [`ContentKind`], so a `comment` block is
//! always a [`CommentContent`].

use std::collections::HashMap;
use std::ops::Deref;

use serde_json::{Map, Value};

use super::{
    ActionIdentifier, ContentAction, ContentKind, ContentRange, FormattableContent, MediaItem,
    MediaKind, RangeKind, TextSpan, id_value,
};

/// Fields shared by every parsed block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockBody {
    text: String,
    text_override: Option<String>,
    ranges: Vec<ContentRange>,
    actions: Option<Vec<ContentAction>>,
    media: Vec<MediaItem>,
    meta: Option<Map<String, Value>>,
    parent: Option<String>,
}

impl BlockBody {
    pub fn new(
        text: impl Into<String>,
        ranges: Vec<ContentRange>,
        actions: Option<Vec<ContentAction>>,
    ) -> Self {
        BlockBody {
            text: text.into(),
            ranges,
            actions,
            ..Default::default()
        }
    }
    pub fn with_media(self, media: Vec<MediaItem>) -> Self {
        BlockBody { media, ..self }
    }
    pub fn with_meta(self, meta: Option<Map<String, Value>>) -> Self {
        BlockBody { meta, ..self }
    }
    /// Identifier of the notification this block was parsed from.
    pub fn with_parent(self, parent: Option<String>) -> Self {
        BlockBody { parent, ..self }
    }
    pub fn with_text_override(self, text_override: Option<String>) -> Self {
        BlockBody {
            text_override,
            ..self
        }
    }

    /// The override when one is set, the server text otherwise.
    pub fn display_text(&self) -> &str {
        self.text_override.as_deref().unwrap_or(&self.text)
    }
    pub fn text_override(&self) -> Option<&str> {
        self.text_override.as_deref()
    }
    pub fn ranges(&self) -> &[ContentRange] {
        &self.ranges
    }
    pub fn actions(&self) -> Option<&[ContentAction]> {
        self.actions.as_deref()
    }
    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }
    pub fn meta(&self) -> Option<&Map<String, Value>> {
        self.meta.as_ref()
    }
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn image_urls(&self) -> Vec<&str> {
        self.media
            .iter()
            .filter(|media| media.kind == MediaKind::IMAGE)
            .filter_map(|media| media.url.as_deref())
            .collect()
    }

    /// Pairs each media span with its already fetched image, keyed by URL in
    /// `images`. Returns `None` when a text override hides the media spans.
    pub fn ranges_to_images<'a, T>(
        &self,
        images: &'a HashMap<String, T>,
    ) -> Option<HashMap<TextSpan, &'a T>> {
        if self.text_override.is_some() {
            return None;
        }
        let map = self
            .media
            .iter()
            .filter_map(|media| {
                let image = images.get(media.url.as_deref()?)?;
                Some((media.span, image))
            })
            .collect();
        Some(map)
    }

    pub fn range_with_comment_id(&self, comment_id: u64) -> Option<&ContentRange> {
        self.ranges
            .iter()
            .find(|range| range.kind == RangeKind::COMMENT && range.id == Some(comment_id))
    }

    pub fn meta_section(&self, section: &str) -> Option<&Map<String, Value>> {
        self.meta.as_ref()?.get(section)?.as_object()
    }
    pub fn meta_id(&self, key: &str) -> Option<u64> {
        self.meta_section("ids")?.get(key).and_then(id_value)
    }
    pub fn meta_str(&self, section: &str, key: &str) -> Option<&str> {
        self.meta_section(section)?.get(key)?.as_str()
    }

    pub(crate) fn has_image_media(&self) -> bool {
        self.media.first().is_some_and(MediaItem::is_image_like)
    }
    pub(crate) fn is_button(&self) -> bool {
        let button = self.meta.as_ref().and_then(|meta| meta.get("is_mobile_button"));
        matches!(button, Some(Value::Bool(true)))
    }
}

/// Projection from a [`ContentBlock`] to one of its variants.
pub trait BlockVariant: FormattableContent {
    fn from_block(block: &ContentBlock) -> Option<&Self>;
}

macro_rules! body_content {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(BlockBody);

        impl $name {
            pub fn new(body: BlockBody) -> Self {
                $name(body)
            }
            pub fn into_body(self) -> BlockBody {
                self.0
            }
        }

        impl Deref for $name {
            type Target = BlockBody;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl FormattableContent for $name {
            fn text(&self) -> Option<&str> {
                Some(self.0.display_text())
            }
            fn ranges(&self) -> &[ContentRange] {
                self.0.ranges()
            }
            fn actions(&self) -> Option<&[ContentAction]> {
                self.0.actions()
            }
            fn kind(&self) -> ContentKind {
                $kind
            }
        }

        impl BlockVariant for $name {
            fn from_block(block: &ContentBlock) -> Option<&Self> {
                match block {
                    ContentBlock::$variant(content) => Some(content),
                    _ => None,
                }
            }
        }

        impl From<$name> for ContentBlock {
            fn from(value: $name) -> Self {
                ContentBlock::$variant(value)
            }
        }
    };
}

body_content!(
    /// Plain styled text.
    TextContent,
    Text,
    ContentKind::TEXT
);
body_content!(
    /// A comment, carrying the moderation actions.
    CommentContent,
    Comment,
    ContentKind::COMMENT
);
body_content!(
    /// A user, typically a gravatar plus a display name.
    UserContent,
    User,
    ContentKind::USER
);
body_content!(ImageContent, Image, ContentKind::IMAGE);
body_content!(ButtonContent, Button, ContentKind::BUTTON);

impl CommentContent {
    pub fn meta_comment_id(&self) -> Option<u64> {
        self.meta_id("comment")
    }
    pub fn meta_site_id(&self) -> Option<u64> {
        self.meta_id("site")
    }
    /// A comment whose approve action is on, or cannot be toggled at all,
    /// counts as approved.
    pub fn is_comment_approved(&self) -> bool {
        let approve = ActionIdentifier::APPROVE_COMMENT;
        self.is_action_on(&approve) || !self.is_action_enabled(&approve)
    }
    pub fn notification_id(&self) -> Option<&str> {
        self.parent()
    }
}

impl UserContent {
    pub fn meta_titles_home(&self) -> Option<&str> {
        self.meta_str("titles", "home")
    }
    pub fn meta_links_home(&self) -> Option<&str> {
        self.meta_str("links", "home")
    }
    pub fn meta_site_id(&self) -> Option<u64> {
        self.meta_id("site")
    }
    pub fn meta_user_id(&self) -> Option<u64> {
        self.meta_id("user")
    }
}

/// A block that was not a JSON object. Kept so siblings still render.
#[derive(Debug, Clone, PartialEq)]
pub struct UnparseableContent {
    raw: Value,
}

impl UnparseableContent {
    pub fn new(raw: Value) -> Self {
        UnparseableContent { raw }
    }
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl FormattableContent for UnparseableContent {
    fn text(&self) -> Option<&str> {
        None
    }
    fn ranges(&self) -> &[ContentRange] {
        &[]
    }
    fn actions(&self) -> Option<&[ContentAction]> {
        None
    }
    fn kind(&self) -> ContentKind {
        ContentKind::UNPARSEABLE
    }
}

impl BlockVariant for UnparseableContent {
    fn from_block(block: &ContentBlock) -> Option<&Self> {
        match block {
            ContentBlock::Unparseable(content) => Some(content),
            _ => None,
        }
    }
}

impl From<UnparseableContent> for ContentBlock {
    fn from(value: UnparseableContent) -> Self {
        ContentBlock::Unparseable(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(TextContent),
    Comment(CommentContent),
    User(UserContent),
    Image(ImageContent),
    Button(ButtonContent),
    Unparseable(UnparseableContent),
}

impl ContentBlock {
    pub fn body(&self) -> Option<&BlockBody> {
        match self {
            ContentBlock::Text(content) => Some(&content.0),
            ContentBlock::Comment(content) => Some(&content.0),
            ContentBlock::User(content) => Some(&content.0),
            ContentBlock::Image(content) => Some(&content.0),
            ContentBlock::Button(content) => Some(&content.0),
            ContentBlock::Unparseable(_) => None,
        }
    }
    pub fn is_unparseable(&self) -> bool {
        matches!(self, ContentBlock::Unparseable(_))
    }
}

impl FormattableContent for ContentBlock {
    fn text(&self) -> Option<&str> {
        self.body().map(BlockBody::display_text)
    }
    fn ranges(&self) -> &[ContentRange] {
        match self.body() {
            Some(body) => body.ranges(),
            None => &[],
        }
    }
    fn actions(&self) -> Option<&[ContentAction]> {
        self.body().and_then(BlockBody::actions)
    }
    fn kind(&self) -> ContentKind {
        match self {
            ContentBlock::Text(content) => content.kind(),
            ContentBlock::Comment(content) => content.kind(),
            ContentBlock::User(content) => content.kind(),
            ContentBlock::Image(content) => content.kind(),
            ContentBlock::Button(content) => content.kind(),
            ContentBlock::Unparseable(content) => content.kind(),
        }
    }
}

impl BlockVariant for ContentBlock {
    fn from_block(block: &ContentBlock) -> Option<&Self> {
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use crate::content::{
        ActionIdentifier, ContentAction, ContentKind, ContentRange, FormattableContent, MediaItem,
        MediaKind, RangeKind, TextSpan,
    };

    use super::{
        BlockBody, BlockVariant, CommentContent, ContentBlock, ImageContent, UnparseableContent,
        UserContent,
    };

    fn gravatar(url: &str, span: TextSpan) -> MediaItem {
        MediaItem {
            kind: MediaKind::IMAGE,
            span,
            url: Some(url.to_string()),
            width: Some(256),
            height: Some(256),
        }
    }

    #[test]
    fn comment_approval_follows_approve_action() {
        let approved = CommentContent::new(BlockBody::new(
            "Nice post!",
            vec![],
            Some(vec![ContentAction::new(ActionIdentifier::APPROVE_COMMENT, true)]),
        ));
        assert!(approved.is_comment_approved());

        let pending = CommentContent::new(BlockBody::new(
            "Nice post!",
            vec![],
            Some(vec![ContentAction::new(ActionIdentifier::APPROVE_COMMENT, false)]),
        ));
        assert!(!pending.is_comment_approved());

        // No approve action at all means the viewer cannot moderate it.
        let foreign = CommentContent::new(BlockBody::new("Nice post!", vec![], None));
        assert!(foreign.is_comment_approved());
    }

    #[test]
    fn comment_meta_ids() {
        let meta = json!({"ids": {"comment": 42, "site": "136505344"}});
        let comment = CommentContent::new(
            BlockBody::new("hi", vec![], None)
                .with_meta(meta.as_object().cloned())
                .with_parent(Some("11111".to_string())),
        );
        assert_eq!(comment.meta_comment_id(), Some(42));
        assert_eq!(comment.meta_site_id(), Some(136505344));
        assert_eq!(comment.notification_id(), Some("11111"));
    }

    #[test]
    fn user_meta_titles_and_links() {
        let meta = json!({
            "titles": {"home": "a title"},
            "links": {"home": "http://someone.wordpress.com"},
            "ids": {"user": 7}
        });
        let user = UserContent::new(
            BlockBody::new("someone", vec![], None).with_meta(meta.as_object().cloned()),
        );
        assert_eq!(user.kind(), ContentKind::USER);
        assert_eq!(user.meta_titles_home(), Some("a title"));
        assert_eq!(user.meta_links_home(), Some("http://someone.wordpress.com"));
        assert_eq!(user.meta_user_id(), Some(7));
        assert_eq!(user.meta_site_id(), None);
    }

    #[test]
    fn ranges_to_images_uses_media_spans() {
        let url = "https://2.gravatar.com/avatar/1111";
        let body = BlockBody::new("someone", vec![], None)
            .with_media(vec![gravatar(url, TextSpan::new(0, 0))]);
        let images = HashMap::from([(url.to_string(), "image bytes")]);

        assert_eq!(body.image_urls(), vec![url]);
        let map = body.ranges_to_images(&images).unwrap();
        assert_eq!(map.get(&TextSpan::new(0, 0)).copied(), Some(&"image bytes"));

        let overridden = body.with_text_override(Some("someone else".to_string()));
        assert_eq!(overridden.display_text(), "someone else");
        assert!(overridden.ranges_to_images(&images).is_none());
    }

    #[test]
    fn range_with_comment_id_ignores_other_kinds() {
        let body = BlockBody::new(
            "Jane replied to your comment",
            vec![
                ContentRange::new(RangeKind::POST, TextSpan::new(0, 4)).with_id(9),
                ContentRange::new(RangeKind::COMMENT, TextSpan::new(23, 7)).with_id(9),
            ],
            None,
        );
        assert_eq!(
            body.range_with_comment_id(9).map(|range| &range.kind),
            Some(&RangeKind::COMMENT)
        );
        assert!(body.range_with_comment_id(10).is_none());
    }

    #[test]
    fn unparseable_block_is_empty() {
        let block = ContentBlock::from(UnparseableContent::new(json!(12)));
        assert!(block.is_unparseable());
        assert_eq!(block.text(), None);
        assert!(block.ranges().is_empty());
        assert_eq!(block.kind(), ContentKind::UNPARSEABLE);

        let raw = UnparseableContent::from_block(&block).map(UnparseableContent::raw);
        assert_eq!(raw, Some(&json!(12)));
    }

    #[test]
    fn into_body_keeps_media_and_meta() {
        let url = "https://s.wp.com/badge.png";
        let meta = json!({"is_mobile_button": true});
        let block = ContentBlock::from(ImageContent::new(
            BlockBody::new("badge", vec![], None)
                .with_media(vec![gravatar(url, TextSpan::new(0, 5))])
                .with_meta(meta.as_object().cloned()),
        ));
        let Some(image) = ImageContent::from_block(&block) else {
            panic!("expected an image block");
        };
        let body = image.clone().into_body();
        assert_eq!(body.media().len(), 1);
        assert_eq!(body.media()[0].url.as_deref(), Some(url));
        assert_eq!(body.meta(), meta.as_object());
        assert_eq!(body.display_text(), "badge");
    }
}
