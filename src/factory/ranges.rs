use serde_json::{Map, Value};
use tracing::debug;

use crate::content::{ContentRange, RangeKind, TextSpan, id_value};

const INDICES: &str = "indices";
const SECTION: &str = "section";
const RAW_TYPE: &str = "type";
const URL: &str = "url";
const ID: &str = "id";
const SITE_ID: &str = "site_id";
const POST_ID: &str = "post_id";
const VALUE: &str = "value";

/// Turns one raw range object into a [`ContentRange`].
///
/// The provided helpers extract the two pieces every range encoding has: a
/// span and a kind label.
pub trait FormattableRangesFactory {
    fn content_range(dictionary: &Map<String, Value>) -> Option<ContentRange>;

    /// Span from the first and last entries of `indices`.
    ///
    /// Interior entries are ignored. Every entry must be a non-negative
    /// integer (`5` or `5.0`) and the last must not precede the first.
    fn range_from(dictionary: &Map<String, Value>) -> Option<TextSpan> {
        let indices = dictionary
            .get(INDICES)?
            .as_array()?
            .iter()
            .map(index)
            .collect::<Option<Vec<u64>>>()?;
        let start = *indices.first()?;
        let end = *indices.last()?;
        let length = end.checked_sub(start)?;
        Some(TextSpan::new(
            usize::try_from(start).ok()?,
            usize::try_from(length).ok()?,
        ))
    }

    /// `section` when present, `type` otherwise.
    fn kind_string(dictionary: &Map<String, Value>) -> Option<&str> {
        dictionary
            .get(SECTION)
            .and_then(Value::as_str)
            .or_else(|| dictionary.get(RAW_TYPE).and_then(Value::as_str))
    }
}

fn index(value: &Value) -> Option<u64> {
    if let Some(index) = value.as_u64() {
        return Some(index);
    }
    let index = value.as_f64()?;
    (index >= 0.0 && index.fract() == 0.0 && index <= u64::MAX as f64).then_some(index as u64)
}

/// Range factory for the notes API.
pub struct NotificationRangeFactory;

impl FormattableRangesFactory for NotificationRangeFactory {
    fn content_range(dictionary: &Map<String, Value>) -> Option<ContentRange> {
        let Some(span) = Self::range_from(dictionary) else {
            debug!(?dictionary, "dropping range without usable indices");
            return None;
        };
        let url = dictionary.get(URL).and_then(Value::as_str);
        let kind = match (Self::kind_string(dictionary), url) {
            (Some(kind), _) => RangeKind::from(kind),
            (None, Some(_)) => RangeKind::LINK,
            (None, None) => {
                debug!(?dictionary, "dropping range without kind or url");
                return None;
            }
        };
        Some(ContentRange {
            kind,
            span,
            url: url.map(str::to_owned),
            id: dictionary.get(ID).and_then(id_value),
            site_id: dictionary.get(SITE_ID).and_then(id_value),
            post_id: dictionary.get(POST_ID).and_then(id_value),
            value: dictionary
                .get(VALUE)
                .and_then(Value::as_str)
                .map(str::to_owned),
        })
    }
}
