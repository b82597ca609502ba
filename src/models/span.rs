use chrono::{DateTime, Utc};

/// A half-open interval `[start, end)` of UTC instants.
///
/// The start instant belongs to the span, the end instant does not. Two
/// back-to-back spans therefore share a boundary without overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSpan {
    /// Build a span, returning `None` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// True if the two spans share any positive-length stretch of time.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if the instant falls inside the span.
    pub fn covers(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 26, h, m, s).unwrap()
    }

    fn span(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeSpan {
        TimeSpan::new(start, end).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted_spans() {
        assert!(TimeSpan::new(at(14, 0, 0), at(14, 0, 0)).is_none());
        assert!(TimeSpan::new(at(15, 0, 0), at(14, 0, 0)).is_none());
        assert!(TimeSpan::new(at(14, 0, 0), at(14, 0, 1)).is_some());
    }

    #[test]
    fn back_to_back_spans_do_not_overlap() {
        let existing = span(at(14, 0, 0), at(15, 0, 0));
        assert!(!existing.overlaps(&span(at(13, 0, 0), at(14, 0, 0))));
        assert!(!existing.overlaps(&span(at(15, 0, 0), at(16, 0, 0))));
    }

    #[test]
    fn one_second_overlap_is_detected() {
        let existing = span(at(14, 0, 0), at(15, 0, 0));
        assert!(existing.overlaps(&span(at(13, 0, 0), at(14, 0, 1))));
        assert!(existing.overlaps(&span(at(14, 59, 59), at(16, 0, 0))));
    }

    #[test]
    fn nested_and_enclosing_spans_overlap() {
        let existing = span(at(14, 0, 0), at(15, 0, 0));
        assert!(existing.overlaps(&span(at(14, 0, 1), at(14, 59, 59))));
        assert!(existing.overlaps(&span(at(13, 0, 0), at(16, 0, 0))));
    }

    #[test]
    fn shared_start_always_overlaps() {
        let existing = span(at(14, 0, 0), at(15, 0, 0));
        assert!(existing.overlaps(&span(at(14, 0, 0), at(14, 0, 1))));
        assert!(existing.overlaps(&span(at(14, 0, 0), at(17, 0, 0))));
    }

    #[test]
    fn overlap_is_symmetric() {
        let marks: Vec<_> = (0..6).map(|i| at(10 + i, 0, 0)).collect();
        let mut spans = Vec::new();
        for (i, &start) in marks.iter().enumerate() {
            for &end in &marks[i + 1..] {
                spans.push(span(start, end));
            }
        }

        for a in &spans {
            for b in &spans {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn covers_includes_start_and_excludes_end() {
        let booked = span(at(12, 0, 0), at(14, 0, 0));
        assert!(booked.covers(at(12, 0, 0)));
        assert!(booked.covers(at(12, 30, 0)));
        assert!(booked.covers(at(13, 59, 59)));
        assert!(!booked.covers(at(14, 0, 0)));
        assert!(!booked.covers(at(11, 59, 59)));
    }
}
