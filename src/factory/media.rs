use serde_json::Value;

use crate::content::{MediaItem, MediaKind};

use super::{FormattableRangesFactory, NotificationRangeFactory};

/// Media from a block's `media` array. Entries without a type or usable
/// indices are skipped.
pub fn parse_media(raw: Option<&Value>) -> Vec<MediaItem> {
    let Some(items) = raw.and_then(Value::as_array) else {
        return vec![];
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|item| {
            Some(MediaItem {
                kind: MediaKind::from(item.get("type")?.as_str()?),
                span: NotificationRangeFactory::range_from(item)?,
                url: item.get("url").and_then(Value::as_str).map(str::to_owned),
                width: dimension(item.get("width")),
                height: dimension(item.get("height")),
            })
        })
        .collect()
}

// Dimensions arrive as numbers or numeric strings.
fn dimension(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::content::{MediaKind, TextSpan};

    use super::parse_media;

    #[test]
    fn parses_gravatars_and_badges() {
        let raw = json!([
            {"type": "image", "indices": [0, 0], "url": "https://2.gravatar.com/avatar/1111", "height": "256", "width": 256},
            {"type": "badge", "indices": [0, 4], "url": "https://s.wp.com/badge.png"},
            {"indices": [0, 0], "url": "https://example.com/untyped.png"},
            "junk"
        ]);
        let media = parse_media(Some(&raw));
        assert_eq!(media.len(), 2);
        assert_eq!(media[0].kind, MediaKind::IMAGE);
        assert_eq!(media[0].span, TextSpan::new(0, 0));
        assert_eq!(media[0].height, Some(256));
        assert_eq!(media[0].width, Some(256));
        assert_eq!(media[1].kind, MediaKind::BADGE);
        assert!(media[1].is_image_like());
    }

    #[test]
    fn missing_media_is_empty() {
        assert!(parse_media(None).is_empty());
        assert!(parse_media(Some(&json!({"type": "image"}))).is_empty());
    }
}
