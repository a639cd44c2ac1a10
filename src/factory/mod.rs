//! Parsing of raw server blocks into [`ContentBlock`]s.
//!
//! The input is JSON the server controls, so every field is optional and
//! possibly mistyped. Helpers degrade to `None` or an empty value; whether
//! that drops a range, a block or nothing at all is decided by the concrete
//! factory, and a bad block never takes its siblings down with it.

mod actions;
mod media;
mod ranges;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ParseConfig;
use crate::content::{
    BlockBody, ButtonContent, CommentContent, ContentBlock, ContentRange, ImageContent,
    TextContent, UnparseableContent, UserContent,
};

pub use actions::parse_actions;
pub use media::parse_media;
pub use ranges::{FormattableRangesFactory, NotificationRangeFactory};

const ACTIONS: &str = "actions";
const RANGES: &str = "ranges";
const TEXT: &str = "text";
const MEDIA: &str = "media";
const META: &str = "meta";
const BLOCK_TYPE: &str = "type";

/// Projections every content factory needs from a raw block.
pub trait FormattableContentFactory {
    /// `actions` when it is an object.
    fn raw_actions(dictionary: &Map<String, Value>) -> Option<&Map<String, Value>> {
        dictionary.get(ACTIONS).and_then(Value::as_object)
    }

    /// `ranges` when it is an array made only of objects.
    fn raw_ranges(dictionary: &Map<String, Value>) -> Option<Vec<&Map<String, Value>>> {
        dictionary
            .get(RANGES)?
            .as_array()?
            .iter()
            .map(Value::as_object)
            .collect()
    }

    /// `text` when it is a string, `""` otherwise.
    fn text(dictionary: &Map<String, Value>) -> String {
        dictionary
            .get(TEXT)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    }
}

/// Content factory for notes API blocks (`subject`, `header` and `body`).
#[derive(Debug, Clone, Default)]
pub struct NotificationContentFactory {
    config: ParseConfig,
}

impl FormattableContentFactory for NotificationContentFactory {}

impl NotificationContentFactory {
    pub fn new(config: ParseConfig) -> Self {
        NotificationContentFactory { config }
    }

    /// Decodes one block. `parent` is the owning notification's id.
    pub fn content(&self, value: &Value, parent: Option<&str>) -> ContentBlock {
        let Some(dictionary) = value.as_object() else {
            warn!(?parent, "content block is not an object");
            return UnparseableContent::new(value.clone()).into();
        };

        let text = Self::text(dictionary);
        let ranges = self.ranges(dictionary, &text);
        let actions = Self::raw_actions(dictionary).map(parse_actions);
        let body = BlockBody::new(text, ranges, actions)
            .with_media(parse_media(dictionary.get(MEDIA)))
            .with_meta(dictionary.get(META).and_then(Value::as_object).cloned())
            .with_parent(parent.map(str::to_owned));

        match dictionary.get(BLOCK_TYPE).and_then(Value::as_str) {
            Some("comment") => CommentContent::new(body).into(),
            Some("user") => UserContent::new(body).into(),
            _ if body.has_image_media() => ImageContent::new(body).into(),
            _ if body.is_button() => ButtonContent::new(body).into(),
            _ => TextContent::new(body).into(),
        }
    }

    /// Decodes every block independently, in order.
    pub fn contents(&self, values: &[Value], parent: Option<&str>) -> Vec<ContentBlock> {
        values
            .iter()
            .map(|value| self.content(value, parent))
            .collect()
    }

    fn ranges(&self, dictionary: &Map<String, Value>, text: &str) -> Vec<ContentRange> {
        let Some(raw_ranges) = Self::raw_ranges(dictionary) else {
            if dictionary.contains_key(RANGES) {
                debug!("ignoring malformed ranges");
            }
            return vec![];
        };
        let text_len = text.encode_utf16().count();
        raw_ranges
            .into_iter()
            .filter_map(NotificationRangeFactory::content_range)
            .filter(|range| {
                if !self.config.drop_out_of_bounds_ranges || range.span.is_within(text_len) {
                    return true;
                }
                warn!(
                    kind = %range.kind,
                    location = range.span.location,
                    length = range.span.length,
                    text_len,
                    "dropping range outside of block text"
                );
                false
            })
            .collect()
    }
}
