//! Notes API notifications.
//!
//! A notification keeps its raw `subject`, `header` and `body` blocks and
//! turns them into content groups on demand.

use anyhow::{Context, Result, bail};
use jiff::Timestamp;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::content::{ContentBlock, ContentGroup, FormattableContent, GroupKind, id_value};
use crate::factory::NotificationContentFactory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Comment,
    CommentLike,
    Follow,
    Like,
    Matcher,
    NewPost,
    Post,
    User,
    ViewMilestone,
    Unknown(String),
}

impl From<&str> for NotificationKind {
    fn from(value: &str) -> Self {
        match value {
            "comment" => NotificationKind::Comment,
            "comment_like" => NotificationKind::CommentLike,
            "follow" => NotificationKind::Follow,
            "like" => NotificationKind::Like,
            "automattcher" => NotificationKind::Matcher,
            "new_post" => NotificationKind::NewPost,
            "post" => NotificationKind::Post,
            "user" => NotificationKind::User,
            "view_milestone" => NotificationKind::ViewMilestone,
            other => NotificationKind::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Notification {
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,
    #[serde(deserialize_with = "optional_scalar_string")]
    pub note_hash: Option<String>,
    #[serde(deserialize_with = "flag")]
    pub read: bool,
    #[serde(deserialize_with = "optional_text")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub noticon: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub timestamp: Option<String>,
    #[serde(rename = "type", deserialize_with = "optional_text")]
    pub note_type: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "blocks")]
    pub subject: Vec<Value>,
    #[serde(deserialize_with = "blocks")]
    pub header: Vec<Value>,
    #[serde(deserialize_with = "blocks")]
    pub body: Vec<Value>,
    #[serde(deserialize_with = "optional_object")]
    pub meta: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct NoteList {
    notes: Vec<Value>,
}

impl Notification {
    pub fn from_json(text: &str) -> Result<Notification> {
        let value: Value = serde_json::from_str(text).context("notification is not valid JSON")?;
        Notification::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Notification> {
        let notification: Notification =
            serde_json::from_value(value).context("unable to decode notification")?;
        if notification.id.is_empty() {
            bail!("notification must have an id");
        }
        Ok(notification)
    }

    /// Decodes a `{"notes": [...]}` response. Notes that fail to decode are
    /// logged and skipped.
    pub fn list_from_json(text: &str) -> Result<Vec<Notification>> {
        let list: NoteList = serde_json::from_str(text).context("unable to decode notes list")?;
        let notes = list
            .notes
            .into_iter()
            .filter_map(|value| match Notification::from_value(value) {
                Ok(notification) => Some(notification),
                Err(error) => {
                    warn!(%error, "skipping note");
                    None
                }
            })
            .collect();
        Ok(notes)
    }

    pub fn kind(&self) -> NotificationKind {
        NotificationKind::from(self.note_type.as_deref().unwrap_or_default())
    }
    pub fn is_comment(&self) -> bool {
        self.kind() == NotificationKind::Comment
    }
    pub fn is_like(&self) -> bool {
        self.kind() == NotificationKind::Like
    }
    pub fn is_comment_like(&self) -> bool {
        self.kind() == NotificationKind::CommentLike
    }
    pub fn is_follow(&self) -> bool {
        self.kind() == NotificationKind::Follow
    }

    /// `None` when the timestamp is missing or not RFC 3339.
    pub fn timestamp_as_date(&self) -> Option<Timestamp> {
        let timestamp = self.timestamp.as_deref()?;
        match timestamp.parse::<Timestamp>() {
            Ok(date) => Some(date),
            Err(error) => {
                warn!(id = %self.id, timestamp, %error, "couldn't parse notification timestamp");
                None
            }
        }
    }

    pub fn meta_id(&self, key: &str) -> Option<u64> {
        let ids = self.meta.as_ref()?.get("ids")?;
        id_value(ids.get(key)?)
    }

    /// Subject line, plus its snippet when the server sent one.
    pub fn subject_group(&self, factory: &NotificationContentFactory) -> Option<ContentGroup> {
        let blocks: Vec<ContentBlock> = self
            .parse(factory, &self.subject)
            .into_iter()
            .take(2)
            .collect();
        if blocks.is_empty() {
            return None;
        }
        Some(ContentGroup::new(blocks, GroupKind::SUBJECT))
    }

    pub fn header_group(&self, factory: &NotificationContentFactory) -> Option<ContentGroup> {
        let blocks = self.parse(factory, &self.header);
        if blocks.is_empty() {
            return None;
        }
        Some(ContentGroup::new(blocks, GroupKind::HEADER))
    }

    /// One group per body block, in order.
    ///
    /// A comment with actions is followed by an `actions` group holding the
    /// same block. In comment notifications a trailing text block renders
    /// as the footer.
    pub fn body_groups(&self, factory: &NotificationContentFactory) -> Vec<ContentGroup> {
        let blocks = self.parse(factory, &self.body);
        let count = blocks.len();
        let is_comment = self.is_comment();
        let mut groups = Vec::with_capacity(count);

        for (index, block) in blocks.into_iter().enumerate() {
            let kind = match &block {
                ContentBlock::Comment(_) => GroupKind::COMMENT,
                ContentBlock::User(_) => GroupKind::USER,
                ContentBlock::Image(_) => GroupKind::IMAGE,
                ContentBlock::Button(_) => GroupKind::BUTTON,
                ContentBlock::Text(_) if is_comment && index > 0 && index + 1 == count => {
                    GroupKind::FOOTER
                }
                ContentBlock::Text(_) => GroupKind::TEXT,
                ContentBlock::Unparseable(_) => continue,
            };
            let has_actions = block.actions().is_some_and(|actions| !actions.is_empty());
            if kind == GroupKind::COMMENT && has_actions {
                groups.push(ContentGroup::new(vec![block.clone()], kind));
                groups.push(ContentGroup::new(vec![block], GroupKind::ACTIONS));
            } else {
                groups.push(ContentGroup::new(vec![block], kind));
            }
        }
        groups
    }

    pub fn header_and_body_groups(
        &self,
        factory: &NotificationContentFactory,
    ) -> Vec<ContentGroup> {
        self.header_group(factory)
            .into_iter()
            .chain(self.body_groups(factory))
            .collect()
    }

    // Unparseable blocks have nothing to show and are left out of groups.
    fn parse(&self, factory: &NotificationContentFactory, raw: &[Value]) -> Vec<ContentBlock> {
        factory
            .contents(raw, Some(&self.id))
            .into_iter()
            .filter(|block| {
                if block.is_unparseable() {
                    debug!(id = %self.id, "leaving unparseable block out of its group");
                }
                !block.is_unparseable()
            })
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Bool(flag) => flag.to_string(),
            Scalar::Number(number) => number.to_string(),
            Scalar::Text(text) => text,
        }
    }
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

fn optional_scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer).map(|value| value.map(String::from))
}

// The notes API sends `read` as 0/1. `null` reads as unread.
fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Bool(flag)) => flag,
        Some(Scalar::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Scalar::Text(text)) => text == "1" || text == "true",
        None => false,
    };
    Ok(flag)
}

// Anything but a string reads as absent.
fn optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        Value::Null => Ok(None),
        other => {
            debug!(value = %other, "ignoring non-string notification field");
            Ok(None)
        }
    }
}

fn optional_object<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(Some(map)),
        _ => Ok(None),
    }
}

// A missing or `null` block list is empty. The blocks themselves are decoded
// one by one later, so a list of anything is accepted here.
fn blocks<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(blocks) => Ok(blocks),
        Value::Null => Ok(Vec::new()),
        other => {
            debug!(value = %other, "ignoring non-array block list");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::{Value, json};

    use crate::content::{
        ActionIdentifier, CommentContent, ContentKind, FormattableContent, GroupKind, UserContent,
    };
    use crate::factory::NotificationContentFactory;

    use super::{Notification, NotificationKind};

    fn comment_note() -> Value {
        json!({
            "id": 11111,
            "note_hash": 3839467124u64,
            "type": "comment",
            "read": 0,
            "noticon": "\u{f300}",
            "timestamp": "2024-03-18T15:45:24+00:00",
            "icon": "https://2.gravatar.com/avatar/1111",
            "url": "https://example.wordpress.com/2024/03/18/hello/#comment-12",
            "subject": [
                {
                    "text": "Jane Doe commented on Hello",
                    "ranges": [
                        {"type": "user", "indices": [0, 8], "url": "https://jane.example.com", "id": 7},
                        {"type": "post", "indices": [22, 27], "url": "https://example.wordpress.com/2024/03/18/hello/", "site_id": 136505344, "post_id": 1}
                    ]
                },
                {"text": "Great read, thanks!"}
            ],
            "header": [
                {
                    "type": "user",
                    "text": "Jane Doe",
                    "media": [{"type": "image", "indices": [0, 0], "url": "https://2.gravatar.com/avatar/1111"}]
                }
            ],
            "body": [
                {
                    "type": "user",
                    "text": "Jane Doe",
                    "meta": {"ids": {"user": 7}, "titles": {"home": "Jane's blog"}, "links": {"home": "https://jane.example.com"}}
                },
                {
                    "type": "comment",
                    "text": "Great read, thanks!",
                    "actions": {
                        "approve-comment": true,
                        "replyto-comment": true,
                        "like-comment": false,
                        "spam-comment": false,
                        "trash-comment": false
                    },
                    "meta": {"ids": {"comment": 12, "site": 136505344}}
                },
                42,
                {"text": "You replied to this comment."}
            ],
            "meta": {"ids": {"site": 136505344, "comment": 12}}
        })
    }

    #[test]
    fn decodes_scalar_fields() -> Result<()> {
        let note = Notification::from_value(comment_note())?;
        assert_eq!(note.id, "11111");
        assert_eq!(note.note_hash.as_deref(), Some("3839467124"));
        assert!(!note.read);
        assert_eq!(note.kind(), NotificationKind::Comment);
        assert!(note.is_comment());
        assert_eq!(note.meta_id("comment"), Some(12));
        let date = note.timestamp_as_date().unwrap();
        assert_eq!(date.as_second(), 1710776724);
        Ok(())
    }

    #[test]
    fn missing_id_is_an_error() {
        assert!(Notification::from_value(json!({"type": "like"})).is_err());
        assert!(Notification::from_json("{").is_err());
    }

    #[test]
    fn bad_timestamp_is_none() -> Result<()> {
        let note = Notification::from_value(json!({
            "id": "1",
            "timestamp": "yesterday",
            "read": true
        }))?;
        assert!(note.read);
        assert!(note.timestamp_as_date().is_none());
        assert_eq!(note.kind(), NotificationKind::Unknown(String::new()));
        Ok(())
    }

    #[test]
    fn subject_and_header_groups() -> Result<()> {
        let factory = NotificationContentFactory::default();
        let note = Notification::from_value(comment_note())?;

        let subject = note.subject_group(&factory).unwrap();
        assert_eq!(subject.kind(), &GroupKind::SUBJECT);
        assert_eq!(subject.blocks().len(), 2);
        assert_eq!(subject.blocks()[0].ranges().len(), 2);

        let header = note.header_group(&factory).unwrap();
        let user: &UserContent = header.block_of_kind(&ContentKind::USER).unwrap();
        assert_eq!(user.image_urls(), vec!["https://2.gravatar.com/avatar/1111"]);
        Ok(())
    }

    #[test]
    fn body_groups_for_comment_notification() -> Result<()> {
        let factory = NotificationContentFactory::default();
        let note = Notification::from_value(comment_note())?;
        let groups = note.body_groups(&factory);
        let kinds: Vec<&GroupKind> = groups.iter().map(|group| group.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                &GroupKind::USER,
                &GroupKind::COMMENT,
                &GroupKind::ACTIONS,
                &GroupKind::FOOTER
            ]
        );

        let comment: &CommentContent = groups[2].block_of_kind(&ContentKind::COMMENT).unwrap();
        assert!(comment.is_comment_approved());
        assert!(comment.is_action_enabled(&ActionIdentifier::TRASH_COMMENT));
        assert_eq!(comment.notification_id(), Some("11111"));

        let all = note.header_and_body_groups(&factory);
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].kind(), &GroupKind::HEADER);
        Ok(())
    }

    #[test]
    fn body_groups_for_like_notification() -> Result<()> {
        let factory = NotificationContentFactory::default();
        let note = Notification::from_value(json!({
            "id": "2",
            "type": "like",
            "body": [
                {"type": "user", "text": "Jane"},
                {"type": "user", "text": "John"},
                {"text": "and 3 others liked your post"}
            ]
        }))?;
        assert!(note.is_like());
        assert!(note.subject_group(&factory).is_none());
        assert!(note.header_group(&factory).is_none());
        let kinds: Vec<GroupKind> = note
            .body_groups(&factory)
            .iter()
            .map(|group| group.kind().clone())
            .collect();
        assert_eq!(kinds, vec![GroupKind::USER, GroupKind::USER, GroupKind::TEXT]);
        Ok(())
    }

    #[test]
    fn null_fields_decode_as_absent() -> Result<()> {
        let factory = NotificationContentFactory::default();
        let note = Notification::from_value(json!({
            "id": 4,
            "type": "comment_like",
            "read": null,
            "timestamp": 1710776724,
            "icon": null,
            "meta": null,
            "subject": null,
            "header": null,
            "body": [{"text": "Jane liked your comment"}]
        }))?;
        assert!(note.is_comment_like());
        assert!(!note.read);
        assert_eq!(note.timestamp, None);
        assert!(note.timestamp_as_date().is_none());
        assert!(note.subject_group(&factory).is_none());
        assert!(note.header_group(&factory).is_none());
        assert_eq!(note.body_groups(&factory).len(), 1);

        let note = Notification::from_value(json!({"id": 5, "body": null, "header": {}}))?;
        assert!(note.body.is_empty());
        assert!(note.header.is_empty());
        Ok(())
    }

    #[test]
    fn note_list_skips_broken_notes() -> Result<()> {
        let text = json!({
            "notes": [
                comment_note(),
                {"type": "like"},
                {"id": 3, "type": "follow", "header": null, "read": null}
            ]
        })
        .to_string();
        let notes = Notification::list_from_json(&text)?;
        assert_eq!(notes.len(), 2);
        assert!(notes[1].is_follow());
        Ok(())
    }
}
