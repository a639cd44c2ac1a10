//! Presentation-neutral rendering of a block into styled runs.
//!
//! Server spans count UTF-16 code units; runs produced here are byte ranges
//! into the rendered Rust string, ready for any text toolkit.

mod filters;

use std::borrow::Cow;
use std::ops::Range;

use tracing::debug;

use crate::config::RenderConfig;
use crate::content::{ContentGroup, FormattableContent, RangeKind};

pub use filters::excerpt;

use self::filters::{byte_offset, quoted_spans, trimmed_bounds};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    /// Byte range into [`StyledText::text`].
    pub range: Range<usize>,
    pub kind: RangeKind,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    pub text: String,
    /// Server ranges in encounter order, then quote runs.
    pub runs: Vec<StyledRun>,
}

impl StyledText {
    pub fn render<C: FormattableContent + ?Sized>(content: &C, config: &RenderConfig) -> Self {
        let text = content.text().unwrap_or_default();
        let mut runs: Vec<StyledRun> = content
            .ranges()
            .iter()
            .filter(|range| config.styles(&range.kind, range.url.as_deref()))
            .filter_map(|range| {
                let start = byte_offset(text, range.span.location);
                let end = byte_offset(text, range.span.end());
                let (Some(start), Some(end)) = (start, end) else {
                    debug!(
                        kind = %range.kind,
                        span = ?range.span,
                        "range does not map onto the text"
                    );
                    return None;
                };
                Some(StyledRun {
                    range: start..end,
                    kind: range.kind.clone(),
                    url: range.url.clone(),
                })
            })
            .collect();

        if config.detect_quotes {
            runs.extend(quoted_spans(text).into_iter().map(|range| StyledRun {
                range,
                kind: RangeKind::QUOTE,
                url: None,
            }));
        }

        if !config.trim_newlines {
            return StyledText {
                text: text.to_owned(),
                runs,
            };
        }

        let bounds = trimmed_bounds(text);
        let runs = runs
            .into_iter()
            .filter_map(|run| shift_into(run, &bounds))
            .collect();
        StyledText {
            text: text[bounds].to_owned(),
            runs,
        }
    }

    pub fn render_group(group: &ContentGroup, config: &RenderConfig) -> Vec<StyledText> {
        group
            .blocks()
            .iter()
            .map(|block| StyledText::render(block, config))
            .collect()
    }

    pub fn slice(&self, run: &StyledRun) -> &str {
        &self.text[run.range.clone()]
    }

    pub fn snippet(&self, words: usize) -> Cow<'_, str> {
        excerpt(&self.text, words)
    }
}

// Clamps a run to the trimmed text and rebases it. Runs lying entirely in
// the trimmed newlines are dropped.
fn shift_into(run: StyledRun, bounds: &Range<usize>) -> Option<StyledRun> {
    let start = run.range.start.clamp(bounds.start, bounds.end);
    let end = run.range.end.clamp(bounds.start, bounds.end);
    let keep = if run.range.is_empty() {
        bounds.contains(&run.range.start) || run.range.start == bounds.end
    } else {
        end > start
    };
    keep.then(|| StyledRun {
        range: start - bounds.start..end - bounds.start,
        ..run
    })
}
