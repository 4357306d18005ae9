// Animated counters.
// Counts `[data-count]` elements up to their target once they scroll into view.

use crate::dom::{Document, EventKind, NodeId, Target};
use crate::error::Result;

use super::bootstrap::{InitContext, Initializer};

pub struct Counters {
    duration_ms: f64,
    threshold: f64,
}

impl Counters {
    pub fn new(duration_ms: f64, threshold: f64) -> Self {
        Self {
            duration_ms,
            threshold,
        }
    }
}

impl Initializer for Counters {
    fn name(&self) -> &'static str {
        "counters"
    }

    fn init(&self, doc: &mut Document, _ctx: &mut InitContext) -> Result<()> {
        let (duration, threshold) = (self.duration_ms, self.threshold);

        for counter in doc.query_all_attr("data-count") {
            doc.add_listener(Target::Node(counter), EventKind::Intersect, move |d, e| {
                if e.intersection_ratio > 0.0 && e.intersection_ratio >= threshold {
                    d.remove_listener(e.listener);
                    animate(d, counter, duration);
                }
            });
        }

        Ok(())
    }
}

/// Start counting `node` up to its `data-count` value.
fn animate(doc: &mut Document, node: NodeId, duration: f64) {
    let Some(target) = doc.attribute(node, "data-count").and_then(parse_count) else {
        return;
    };

    let start = doc.now();
    doc.request_animation_frame(move |d, now| step(d, node, target, start, duration, now));
}

fn step(doc: &mut Document, node: NodeId, target: i64, start: f64, duration: f64, now: f64) {
    let progress = if duration > 0.0 {
        ((now - start) / duration).clamp(0.0, 1.0)
    } else {
        1.0
    };

    if progress < 1.0 {
        let current = (target as f64 * ease_out_cubic(progress)).floor() as i64;
        doc.set_text(node, &format_count(current));
        doc.request_animation_frame(move |d, now| step(d, node, target, start, duration, now));
    } else {
        doc.set_text(node, &format_count(target));
    }
}

pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Parse a counter target, ignoring thousands separators and trailing text.
pub fn parse_count(raw: &str) -> Option<i64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let trimmed = cleaned.trim_start();

    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Format with comma thousands separators (e.g. 6,445,927).
pub fn format_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(count: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let stat = doc.element(doc.body(), "span", &["stat-number"]);
        doc.set_attribute(stat, "data-count", count);
        doc.set_text(stat, "0");
        Counters::new(2000.0, 0.5)
            .init(&mut doc, &mut InitContext::default())
            .unwrap();
        (doc, stat)
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("6445927"), Some(6_445_927));
        assert_eq!(parse_count("6,445,927"), Some(6_445_927));
        assert_eq!(parse_count(" 12px"), Some(12));
        assert_eq!(parse_count("-5"), Some(-5));
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(6_445_927), "6,445,927");
        assert_eq!(format_count(-1234), "-1,234");
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
    }

    #[test]
    fn test_counts_up_after_intersection() {
        let (mut doc, stat) = page("1,000");

        doc.intersect(stat, 0.6);
        assert_eq!(doc.pending_frames(), 1);

        doc.advance_frame(1000.0);
        // Halfway through: floor(1000 * 0.875).
        assert_eq!(doc.text_content(stat), "875");

        doc.advance_frame(2500.0);
        assert_eq!(doc.text_content(stat), "1,000");
        assert_eq!(doc.pending_frames(), 0);
    }

    #[test]
    fn test_below_threshold_does_not_start() {
        let (mut doc, stat) = page("100");

        doc.intersect(stat, 0.2);
        assert_eq!(doc.pending_frames(), 0);
        assert_eq!(doc.text_content(stat), "0");
    }

    #[test]
    fn test_animates_only_once() {
        let (mut doc, stat) = page("100");

        doc.intersect(stat, 1.0);
        doc.advance_frame(5000.0);
        doc.intersect(stat, 1.0);

        assert_eq!(doc.pending_frames(), 0);
        assert_eq!(doc.listener_count(Target::Node(stat), EventKind::Intersect), 0);
    }

    #[test]
    fn test_non_numeric_target_is_ignored() {
        let (mut doc, stat) = page("lots");

        doc.intersect(stat, 1.0);
        assert_eq!(doc.pending_frames(), 0);
        assert_eq!(doc.text_content(stat), "0");
    }
}
