string_tag!(
    /// Identity of an action attached to a content block.
    ActionIdentifier
);

impl ActionIdentifier {
    pub const APPROVE_COMMENT: ActionIdentifier = ActionIdentifier::from_static("approve-comment");
    pub const FOLLOW: ActionIdentifier = ActionIdentifier::from_static("follow");
    pub const LIKE_COMMENT: ActionIdentifier = ActionIdentifier::from_static("like-comment");
    pub const LIKE_POST: ActionIdentifier = ActionIdentifier::from_static("like-post");
    pub const REPLY_TO_COMMENT: ActionIdentifier =
        ActionIdentifier::from_static("replyto-comment");
    pub const SPAM_COMMENT: ActionIdentifier = ActionIdentifier::from_static("spam-comment");
    pub const TRASH_COMMENT: ActionIdentifier = ActionIdentifier::from_static("trash-comment");
    pub const EDIT_COMMENT: ActionIdentifier = ActionIdentifier::from_static("edit-comment");
}

/// A user invocable command on a block, with its current state as reported
/// by the server.
///
/// Re-parsing a block yields fresh actions; there is no in-place toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentAction {
    pub identifier: ActionIdentifier,
    /// Whether the action may currently be invoked.
    pub enabled: bool,
    /// Toggle state, e.g. "this comment is liked".
    pub on: bool,
}

impl ContentAction {
    pub fn new(identifier: ActionIdentifier, on: bool) -> Self {
        ContentAction {
            identifier,
            enabled: true,
            on,
        }
    }
    pub fn disabled(self) -> Self {
        ContentAction {
            enabled: false,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionIdentifier, ContentAction};

    #[test]
    fn new_actions_are_enabled() {
        let action = ContentAction::new(ActionIdentifier::LIKE_POST, false);
        assert!(action.enabled);
        assert!(!action.on);

        let action = action.disabled();
        assert!(!action.enabled);
        assert_eq!(action.identifier, ActionIdentifier::from("like-post"));
    }
}
