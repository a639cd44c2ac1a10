use tracing::warn;

use super::{BlockVariant, ContentBlock, ContentKind, FormattableContent};

string_tag!(
    /// UI section a [`ContentGroup`] renders as.
    GroupKind
);

impl GroupKind {
    pub const TEXT: GroupKind = GroupKind::from_static("text");
    pub const IMAGE: GroupKind = GroupKind::from_static("image");
    pub const USER: GroupKind = GroupKind::from_static("user");
    pub const COMMENT: GroupKind = GroupKind::from_static("comment");
    pub const ACTIONS: GroupKind = GroupKind::from_static("actions");
    pub const SUBJECT: GroupKind = GroupKind::from_static("subject");
    pub const HEADER: GroupKind = GroupKind::from_static("header");
    pub const FOOTER: GroupKind = GroupKind::from_static("footer");
    pub const BUTTON: GroupKind = GroupKind::from_static("button");
}

/// Ordered blocks backing one view. Block order is rendering order.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentGroup {
    blocks: Vec<ContentBlock>,
    kind: GroupKind,
}

impl ContentGroup {
    pub fn new(blocks: Vec<ContentBlock>, kind: GroupKind) -> Self {
        ContentGroup { blocks, kind }
    }
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }
    pub fn kind(&self) -> &GroupKind {
        &self.kind
    }

    pub fn block_of_kind<T: BlockVariant>(&self, kind: &ContentKind) -> Option<&T> {
        ContentGroup::block_of_kind_in(kind, &self.blocks)
    }

    /// First block of `kind`, projected to `T`.
    ///
    /// Only the first block of that kind is considered: if it is not a `T`
    /// the result is `None` even when a later block would be.
    pub fn block_of_kind_in<'a, T: BlockVariant>(
        kind: &ContentKind,
        blocks: &'a [ContentBlock],
    ) -> Option<&'a T> {
        let block = blocks.iter().find(|block| &block.kind() == kind)?;
        let projected = T::from_block(block);
        if projected.is_none() {
            warn!(%kind, "first block of the requested kind is a different variant");
        }
        projected
    }
}

#[cfg(test)]
mod tests {
    use crate::content::{
        BlockBody, CommentContent, ContentBlock, ContentKind, FormattableContent, TextContent,
        UserContent,
    };

    use super::{ContentGroup, GroupKind};

    fn text(text: &str) -> ContentBlock {
        TextContent::new(BlockBody::new(text, vec![], None)).into()
    }

    fn user(name: &str) -> ContentBlock {
        UserContent::new(BlockBody::new(name, vec![], None)).into()
    }

    #[test]
    fn returns_first_block_of_kind() {
        let group = ContentGroup::new(
            vec![text("intro"), user("alice"), user("bob")],
            GroupKind::USER,
        );
        let first: &UserContent = group.block_of_kind(&ContentKind::USER).unwrap();
        assert_eq!(first.text(), Some("alice"));
        assert_eq!(group.kind(), &GroupKind::USER);
        assert_eq!(group.blocks().len(), 3);
    }

    #[test]
    fn missing_kind_is_none() {
        let group = ContentGroup::new(vec![text("intro")], GroupKind::TEXT);
        assert!(
            group
                .block_of_kind::<CommentContent>(&ContentKind::COMMENT)
                .is_none()
        );
    }

    #[test]
    fn variant_mismatch_is_none() {
        let blocks = vec![text("intro"), user("alice")];
        let mismatch: Option<&CommentContent> =
            ContentGroup::block_of_kind_in(&ContentKind::TEXT, &blocks);
        assert!(mismatch.is_none());

        let any: Option<&ContentBlock> =
            ContentGroup::block_of_kind_in(&ContentKind::USER, &blocks);
        assert_eq!(any.and_then(|block| block.text()), Some("alice"));
    }
}
