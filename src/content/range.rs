string_tag!(
    /// Semantic classification of a [`ContentRange`].
    RangeKind
);

impl RangeKind {
    pub const USER: RangeKind = RangeKind::from_static("user");
    pub const POST: RangeKind = RangeKind::from_static("post");
    pub const COMMENT: RangeKind = RangeKind::from_static("comment");
    pub const STATS: RangeKind = RangeKind::from_static("stat");
    pub const FOLLOW: RangeKind = RangeKind::from_static("follow");
    pub const BLOCKQUOTE: RangeKind = RangeKind::from_static("blockquote");
    pub const NOTICON: RangeKind = RangeKind::from_static("noticon");
    pub const SITE: RangeKind = RangeKind::from_static("site");
    pub const MATCH: RangeKind = RangeKind::from_static("match");
    pub const LINK: RangeKind = RangeKind::from_static("link");
    pub const ITALIC: RangeKind = RangeKind::from_static("i");
    pub const STRONG: RangeKind = RangeKind::from_static("b");
    pub const SCAN: RangeKind = RangeKind::from_static("scan");
    /// Produced by the renderer for `"quoted"` substrings, never by the server.
    pub const QUOTE: RangeKind = RangeKind::from_static("quote");
}

/// Half-open span over a block's text, in UTF-16 code units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextSpan {
    pub location: usize,
    pub length: usize,
}

impl TextSpan {
    pub const fn new(location: usize, length: usize) -> Self {
        TextSpan { location, length }
    }
    pub const fn end(&self) -> usize {
        self.location.saturating_add(self.length)
    }
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }
    /// Whether the span fits inside a text of `len` UTF-16 code units.
    pub const fn is_within(&self, len: usize) -> bool {
        match self.location.checked_add(self.length) {
            Some(end) => end <= len,
            None => false,
        }
    }
}

/// A sub-span of a block's text carrying meaning: a link, a mention, a
/// styled run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRange {
    pub kind: RangeKind,
    pub span: TextSpan,
    pub url: Option<String>,
    pub id: Option<u64>,
    pub site_id: Option<u64>,
    pub post_id: Option<u64>,
    /// Glyph for noticon ranges.
    pub value: Option<String>,
}

impl ContentRange {
    pub fn new(kind: RangeKind, span: TextSpan) -> Self {
        ContentRange {
            kind,
            span,
            url: None,
            id: None,
            site_id: None,
            post_id: None,
            value: None,
        }
    }
    pub fn with_url(self, url: impl Into<String>) -> Self {
        ContentRange {
            url: Some(url.into()),
            ..self
        }
    }
    pub fn with_id(self, id: u64) -> Self {
        ContentRange {
            id: Some(id),
            ..self
        }
    }
    pub fn is_link(&self) -> bool {
        self.url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::TextSpan;

    #[test]
    fn span_bounds() {
        let span = TextSpan::new(6, 5);
        assert_eq!(span.end(), 11);
        assert!(span.is_within(11));
        assert!(!span.is_within(10));
        assert!(TextSpan::new(3, 0).is_empty());
        assert!(!TextSpan::new(usize::MAX, 2).is_within(usize::MAX));
    }
}
