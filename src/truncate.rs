//! Output-size budget for tool results.
//!
//! Tool results have the shape `{"content": [item, ...]}`. [`Truncator`] keeps
//! as many whole leading items as fit the budget and replaces the rest with a
//! single sentinel item. Early items are assumed to be the most relevant (top
//! search hits), so a complete first result beats a partial later one.
//!
//! Sizes are byte lengths of the compact JSON serialization.

use std::io;

use serde_json::{json, Map, Value};

/// Default ceiling for a serialized tool result.
///
/// Counted in bytes of compact JSON (no spaces after `,` or `:`, non-ASCII
/// left unescaped), so it admits a few more characters per item than a
/// character count over spaced, ASCII-escaped JSON would.
pub const MAX_TOOL_OUTPUT_LENGTH: usize = 40_000;

/// Text shown wherever content was cut.
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Room reserved for the marker and JSON punctuation when cutting a single item.
const MARKER_OVERHEAD: usize = 20;

/// Greedy, order-preserving, single-pass truncation to a size budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncator {
    max_length: usize,
}

impl Default for Truncator {
    fn default() -> Self {
        Self::new(MAX_TOOL_OUTPUT_LENGTH)
    }
}

impl Truncator {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Fit `response` into the budget.
    ///
    /// - Input without a `content` array becomes a lone sentinel item.
    /// - Items without a string `text` are dropped.
    /// - Items are kept whole while the content array stays within budget
    ///   (inclusive). The first item that would overflow stops the scan: it is
    ///   cut down if nothing was kept yet, otherwise replaced by the sentinel.
    pub fn truncate(&self, response: &Value) -> Value {
        let Some(items) = response.get("content").and_then(Value::as_array) else {
            return json!({ "content": [sentinel()] });
        };

        let base_size = serialized_len(&json!({ "content": [] }));
        let mut kept: Vec<Value> = Vec::new();
        // Serialized size of `kept` as a JSON array.
        let mut kept_size = 2;

        for item in items {
            let Some(text) = item.get("text").and_then(Value::as_str) else {
                continue;
            };

            let item_size = serialized_len(item);
            let next_size = if kept.is_empty() {
                2 + item_size
            } else {
                kept_size + 1 + item_size
            };

            if next_size <= self.max_length {
                kept.push(item.clone());
                kept_size = next_size;
                continue;
            }

            if kept.is_empty() {
                kept.push(self.cut_item(item, text, base_size));
            } else {
                kept.push(sentinel());
            }
            break;
        }

        json!({ "content": kept })
    }

    /// Shorten the text of an item that alone exceeds the budget.
    fn cut_item(&self, item: &Value, text: &str, base_size: usize) -> Value {
        let fields = item.as_object().cloned().unwrap_or_default();
        let mut rest = fields.clone();
        rest.remove("text");
        let rest_size = serialized_len(&Value::Object(rest));

        let available = self
            .max_length
            .saturating_sub(base_size + rest_size + MARKER_OVERHEAD);
        let mut keep = available.min(text.chars().count());

        // JSON escaping and multi-byte characters can still overflow; scale the
        // kept prefix down until the one-item array fits.
        loop {
            let candidate = with_text(&fields, text, keep);
            let size = 2 + serialized_len(&candidate);
            if size <= self.max_length || keep == 0 {
                return candidate;
            }
            keep = (keep * self.max_length / size).min(keep - 1);
        }
    }
}

/// Replace the text in place so the item keeps its field order.
fn with_text(fields: &Map<String, Value>, text: &str, keep: usize) -> Value {
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str(TRUNCATION_MARKER);

    let mut item = fields.clone();
    item.insert("text".into(), Value::String(cut));
    Value::Object(item)
}

fn sentinel() -> Value {
    json!({ "type": "text", "text": TRUNCATION_MARKER })
}

/// Compact serialized size of `value` in bytes, without building the string.
pub fn serialized_len(value: &Value) -> usize {
    let mut counter = ByteCounter(0);
    // Writing into a counter cannot fail and `Value` always serializes.
    let _ = serde_json::to_writer(&mut counter, value);
    counter.0
}

struct ByteCounter(usize);

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
