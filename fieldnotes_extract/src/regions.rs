//! Locating and replacing the table and JSON regions of a document.
//!
//! A document holds at most one fact table, starting at [`TABLE_HEADER`] and
//! running through the consecutive `|` rows after it, and at most one JSON
//! region enclosed by two [`JSON_SENTINEL`] lines. Everything else is free
//! text and keeps its relative order when a region is replaced.

use std::ops::Range;

use fieldnotes_core::{JSON_SENTINEL, TABLE_HEADER};

/// Lines of `text` with their starting byte offsets, newline included.
pub fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0usize, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}

/// Byte range of the rendered table, trailing newline included.
#[must_use]
pub fn table_region(text: &str) -> Option<Range<usize>> {
    let mut lines = lines_with_offsets(text);
    let (start, header) = lines.find(|(_, line)| line.trim() == TABLE_HEADER)?;

    let mut end = start + header.len();
    for (offset, line) in lines {
        if !line.trim_start().starts_with('|') {
            break;
        }
        end = offset + line.len();
    }
    Some(start..end)
}

/// Byte range of the JSON region, both sentinel lines included.
///
/// An opening sentinel without a closing one is not a region.
#[must_use]
pub fn json_region(text: &str) -> Option<Range<usize>> {
    let mut sentinels = lines_with_offsets(text).filter(|(_, line)| line.trim() == JSON_SENTINEL);
    let (start, _) = sentinels.next()?;
    let (close, line) = sentinels.next()?;
    Some(start..close + line.len())
}

/// Text between the two sentinel lines.
#[must_use]
pub fn json_region_body(text: &str) -> Option<&str> {
    let region = &text[json_region(text)?];
    let body = region
        .trim_start()
        .strip_prefix(JSON_SENTINEL)?
        .trim_start_matches(['\r', '\n']);
    let close = body.rfind(JSON_SENTINEL)?;
    Some(&body[..close])
}

/// Wrap pretty-printed objects in sentinel lines.
#[must_use]
pub fn render_json_region(objects: &[String]) -> String {
    format!("{JSON_SENTINEL}\n{}\n{JSON_SENTINEL}\n", objects.join("\n"))
}

/// Where the cursor lands after `range` is replaced by `inserted` bytes.
const fn remap_cursor(cursor: usize, range: &Range<usize>, inserted: usize) -> usize {
    if cursor < range.start {
        cursor
    } else if cursor >= range.end {
        cursor - (range.end - range.start) + inserted
    } else {
        range.start + inserted
    }
}

/// Put `table` into `text`, replacing an existing table in place.
///
/// Without an existing table the new one goes to the top followed by a blank
/// line, and the cursor moves to the end of the document.
#[must_use]
pub fn replace_table(text: &str, cursor: usize, table: &str) -> (String, usize) {
    match table_region(text) {
        Some(range) => {
            let cursor = remap_cursor(cursor, &range, table.len());
            let mut out = String::with_capacity(text.len() + table.len());
            out.push_str(&text[..range.start]);
            out.push_str(table);
            out.push_str(&text[range.end..]);
            (out, cursor)
        }
        None => {
            let out = format!("{table}\n{text}");
            let cursor = out.len();
            (out, cursor)
        }
    }
}

/// Put `region` into `text`, replacing an existing JSON region in place.
///
/// Without an existing region the new one is appended after a blank line,
/// so text typed at the old end of the document never runs into the opening
/// sentinel. `None` removes any existing region.
#[must_use]
pub fn replace_json_region(text: &str, cursor: usize, region: Option<&str>) -> (String, usize) {
    let replacement = region.unwrap_or_default();
    if let Some(range) = json_region(text) {
        let cursor = remap_cursor(cursor, &range, replacement.len());
        let mut out = String::with_capacity(text.len() + replacement.len());
        out.push_str(&text[..range.start]);
        out.push_str(replacement);
        out.push_str(&text[range.end..]);
        return (out, cursor);
    }

    let mut out = text.to_string();
    if !replacement.is_empty() {
        if !out.is_empty() {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
        }
        out.push_str(replacement);
    }
    (out, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "| Data | Content | Link |\n| ---- | ------- | ---- |\n| host | web01 |  |\n";

    #[test]
    fn test_table_region_stops_at_first_non_row() {
        let text = format!("intro\n{TABLE}notes here\n| stray |\n");
        let range = table_region(&text);
        assert_eq!(range, Some(6..6 + TABLE.len()));
    }

    #[test]
    fn test_replace_table_in_place_keeps_surrounding_text() {
        let text = format!("intro\n{TABLE}notes here");
        let cursor = text.len();
        let table = "| Data | Content | Link |\n| ---- | ------- | ---- |\n";

        let (out, new_cursor) = replace_table(&text, cursor, table);
        assert_eq!(out, format!("intro\n{table}notes here"));
        assert_eq!(new_cursor, out.len());
    }

    #[test]
    fn test_replace_table_prepends_when_missing() {
        let (out, cursor) = replace_table("free text", 0, TABLE);
        assert_eq!(out, format!("{TABLE}\nfree text"));
        assert_eq!(cursor, out.len());

        let (out, cursor) = replace_table("", 0, TABLE);
        assert_eq!(out, format!("{TABLE}\n"));
        assert_eq!(cursor, out.len());
    }

    #[test]
    fn test_json_region_round_trip() {
        let region = render_json_region(&["{\n    \"k\": 1\n}".to_string()]);
        let text = format!("notes\n{region}more");

        assert_eq!(json_region(&text), Some(6..6 + region.len()));
        assert_eq!(json_region_body(&text), Some("{\n    \"k\": 1\n}\n"));
    }

    #[test]
    fn test_unclosed_sentinel_is_not_a_region() {
        assert_eq!(json_region("---JSON---\n{}\n"), None);
    }

    #[test]
    fn test_replace_json_region_appends_then_replaces_then_removes() {
        let first = render_json_region(&["{}".to_string()]);
        let (text, cursor) = replace_json_region("notes", 2, Some(&first));
        assert_eq!(text, format!("notes\n\n{first}"));
        assert_eq!(cursor, 2);

        let second = render_json_region(&["[]".to_string()]);
        let (text, _) = replace_json_region(&text, 2, Some(&second));
        assert_eq!(text, format!("notes\n\n{second}"));

        let (text, cursor) = replace_json_region(&text, text.len(), None);
        assert_eq!(text, "notes\n\n");
        assert_eq!(cursor, text.len());
    }
}
