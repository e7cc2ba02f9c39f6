//! Segmentation engine.
//!
//! Reconciles a document's full text with a sparse, possibly unsorted set of
//! annotated spans, producing an ordered partition of the text into mapped
//! (witness-backed) and uncovered segments. All offsets and lengths are
//! character counts; slicing never lands inside a multi-byte character.

use crate::record::RawSpan;

/// Whether a segment came from an annotated span or from gap-filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Mapped,
    Uncovered,
}

/// One segment of the partitioned document text.
#[derive(Debug, Clone)]
pub struct Segment {
    pub start: usize,
    pub canonical: String,
    pub normalized: String,
    pub kind: SegmentKind,
}

impl Segment {
    fn mapped(start: usize, canonical: String, normalized: String) -> Self {
        Self {
            start,
            canonical,
            normalized,
            kind: SegmentKind::Mapped,
        }
    }

    fn uncovered(start: usize, canonical: &str) -> Self {
        Self {
            start,
            canonical: canonical.to_string(),
            normalized: String::new(),
            kind: SegmentKind::Uncovered,
        }
    }

    /// Character length of the canonical text.
    pub fn length(&self) -> usize {
        self.canonical.chars().count()
    }

    /// Offset one past the last character of this segment.
    pub fn end(&self) -> usize {
        self.start + self.length()
    }
}

/// Partition `text` into an ordered sequence of segments.
///
/// Spans without witnesses are discarded; their ranges surface again through
/// gap-filling. Remaining spans are sorted by start offset (equal starts
/// order longest canonical first, deterministically). Gaps between spans
/// become uncovered segments holding the untrimmed slice, except gaps that
/// are pure whitespace, which are dropped from the output entirely.
///
/// Callers must supply non-overlapping spans bounded within the text; this
/// is not validated. Span canonical text is trusted verbatim, without
/// re-slicing against `text`.
pub fn segment(text: &str, mut spans: Vec<RawSpan>) -> Vec<Segment> {
    spans.retain(|span| !span.wits.is_empty());
    spans.sort_by(|a, b| {
        a.begin
            .cmp(&b.begin)
            .then_with(|| b.text.chars().count().cmp(&a.text.chars().count()))
    });

    let total = text.chars().count();
    let mut segments = Vec::new();
    let mut last_end = 0usize;

    for span in spans {
        let RawSpan { begin, text: canonical, wits } = span;

        // Uncovered text before this span
        if begin > last_end {
            let gap = slice_chars(text, last_end, begin);
            if !gap.trim().is_empty() {
                segments.push(Segment::uncovered(last_end, gap));
            }
        }

        let length = canonical.chars().count();
        let normalized = wits.into_iter().next().map(|w| w.text).unwrap_or_default();
        segments.push(Segment::mapped(begin, canonical, normalized));
        last_end = begin + length;
    }

    // Remaining text after the last span
    if last_end < total {
        let tail = slice_chars(text, last_end, total);
        if !tail.trim().is_empty() {
            segments.push(Segment::uncovered(last_end, tail));
        }
    }

    segments
}

/// Slice `text` by character offsets `[start, end)`.
fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(text, start);
    let to = byte_offset(text, end);
    &text[from..to]
}

/// Byte position of the `index`-th character, or the text length past the end.
fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(pos, _)| pos)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Witness;

    fn span(begin: usize, text: &str, wits: &[&str]) -> RawSpan {
        RawSpan {
            begin,
            text: text.to_string(),
            wits: wits
                .iter()
                .map(|w| Witness {
                    text: w.to_string(),
                })
                .collect(),
        }
    }

    /// Concatenated canonical text of the output, for coverage checks.
    fn rejoin(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.canonical.as_str()).collect()
    }

    #[test]
    fn test_scenario_with_interior_gap() {
        // "AB gap CD": AB at [0,2), " gap " at [2,7), CD at [7,9)
        let text = "AB gap CD";
        let segments = segment(
            text,
            vec![span(0, "AB", &["ab"]), span(7, "CD", &["cd"])],
        );

        assert_eq!(segments.len(), 3);

        assert_eq!(segments[0].start, 0);
        assert_eq!(segments[0].canonical, "AB");
        assert_eq!(segments[0].normalized, "ab");
        assert_eq!(segments[0].kind, SegmentKind::Mapped);

        // Uncovered content is stored untrimmed
        assert_eq!(segments[1].start, 2);
        assert_eq!(segments[1].canonical, " gap ");
        assert_eq!(segments[1].normalized, "");
        assert_eq!(segments[1].kind, SegmentKind::Uncovered);

        assert_eq!(segments[2].start, 7);
        assert_eq!(segments[2].canonical, "CD");
        assert_eq!(segments[2].normalized, "cd");

        assert_eq!(rejoin(&segments), text);
    }

    #[test]
    fn test_coverage_and_ordering_invariants() {
        let text = "one two three four five";
        let segments = segment(
            text,
            vec![
                span(8, "three", &["III"]),
                span(0, "one", &["I"]),
                span(18, "five", &["V"]),
            ],
        );

        // Full coverage: concatenation reproduces the text
        assert_eq!(rejoin(&segments), text);

        // Strictly start-ascending, each end meeting the next start
        assert_eq!(segments[0].start, 0);
        for pair in segments.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert_eq!(pair[0].end(), pair[1].start);
        }
        assert_eq!(segments.last().unwrap().end(), text.chars().count());
    }

    #[test]
    fn test_whitespace_only_gap_is_dropped() {
        // Gap [2,4) is "  ": dropped, leaving a hole in coverage
        let text = "AB  CD";
        let segments = segment(
            text,
            vec![span(0, "AB", &["ab"]), span(4, "CD", &["cd"])],
        );

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].canonical, "AB");
        assert_eq!(segments[1].canonical, "CD");
        assert_eq!(rejoin(&segments), "ABCD");

        // The hole is exactly the whitespace-only gap
        assert_eq!(segments[0].end(), 2);
        assert_eq!(segments[1].start, 4);
    }

    #[test]
    fn test_empty_witness_span_is_dropped() {
        // The middle span has no witnesses; its range merges into the gap
        let text = "AB mid CD";
        let segments = segment(
            text,
            vec![
                span(0, "AB", &["ab"]),
                span(3, "mid", &[]),
                span(7, "CD", &["cd"]),
            ],
        );

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].canonical, " mid ");
        assert_eq!(segments[1].kind, SegmentKind::Uncovered);
    }

    #[test]
    fn test_all_spans_witnessless_yields_single_uncovered() {
        let text = "some actual content";
        let segments = segment(text, vec![span(0, "some", &[]), span(5, "actual", &[])]);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, 0);
        assert_eq!(segments[0].canonical, text);
        assert_eq!(segments[0].kind, SegmentKind::Uncovered);
    }

    #[test]
    fn test_trailing_gap() {
        let text = "AB trailing";
        let segments = segment(text, vec![span(0, "AB", &["ab"])]);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].start, 2);
        assert_eq!(segments[1].canonical, " trailing");
        assert_eq!(segments[1].kind, SegmentKind::Uncovered);
    }

    #[test]
    fn test_trailing_whitespace_dropped() {
        let text = "AB   ";
        let segments = segment(text, vec![span(0, "AB", &["ab"])]);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].canonical, "AB");
    }

    #[test]
    fn test_leading_gap() {
        let text = "pre AB";
        let segments = segment(text, vec![span(4, "AB", &["ab"])]);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start, 0);
        assert_eq!(segments[0].canonical, "pre ");
        assert_eq!(segments[1].start, 4);
    }

    #[test]
    fn test_empty_text_yields_no_segments() {
        assert!(segment("", vec![]).is_empty());
    }

    #[test]
    fn test_no_spans_yields_single_uncovered() {
        let text = "just text";
        let segments = segment(text, vec![]);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].canonical, text);
        assert_eq!(segments[0].normalized, "");
    }

    #[test]
    fn test_first_witness_wins() {
        let text = "AB";
        let segments = segment(text, vec![span(0, "AB", &["first", "second"])]);

        assert_eq!(segments[0].normalized, "first");
    }

    #[test]
    fn test_equal_start_orders_longest_first() {
        let text = "ABCD rest";
        let input_a = vec![span(0, "AB", &["ab"]), span(0, "ABCD", &["abcd"])];
        let input_b = vec![span(0, "ABCD", &["abcd"]), span(0, "AB", &["ab"])];

        let out_a = segment(text, input_a);
        let out_b = segment(text, input_b);

        // Deterministic regardless of input order
        assert_eq!(out_a[0].canonical, "ABCD");
        assert_eq!(out_b[0].canonical, "ABCD");
        assert_eq!(out_a[1].canonical, out_b[1].canonical);
    }

    #[test]
    fn test_multibyte_offsets() {
        // Char offsets, not bytes: "æ", "þ" and "·" are 2 bytes each
        let text = "æbc·þer";
        let segments = segment(
            text,
            vec![span(0, "æbc", &["aebc"]), span(4, "þer", &["ther"])],
        );

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].canonical, "·");
        assert_eq!(segments[1].kind, SegmentKind::Uncovered);
        assert_eq!(rejoin(&segments), text);
        assert_eq!(segments[2].start, 4);
        assert_eq!(segments[2].end(), 7);
    }

    #[test]
    fn test_span_covering_whole_text() {
        let text = "whole";
        let segments = segment(text, vec![span(0, "whole", &["hole"])]);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].end(), 5);
    }
}
