//! Tolerant HTML parser for MediaWiki `action=parse` output.
//!
//! Handles the subset the dictionary markup actually uses: elements with
//! quoted or bare attributes, text with basic entities, comments, void and
//! self-closing elements. Anything unrecognized degrades to text instead of
//! failing; close tags that match nothing are dropped.

use lazy_static::lazy_static;
use regex::Regex;

use super::{Document, NodeData, NodeId, VOID_TAGS};

lazy_static! {
    static ref ATTR_PATTERN: Regex = Regex::new(
        r#"([A-Za-z_][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#
    )
    .unwrap();
}

pub fn parse_html(input: &str) -> Document {
    let mut doc = Document::default();
    let mut open: Vec<NodeId> = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        let Some(offset) = rest.find('<') else {
            append_text(&mut doc, &open, rest);
            break;
        };
        if offset > 0 {
            append_text(&mut doc, &open, &rest[..offset]);
            pos += offset;
        }

        let rest = &input[pos..];
        if let Some(comment) = rest.strip_prefix("<!--") {
            pos += match comment.find("-->") {
                Some(end) => 4 + end + 3,
                None => rest.len(),
            };
        } else if rest.starts_with("</") {
            let Some(end) = rest.find('>') else {
                break;
            };
            close_element(&mut open, &doc, rest[2..end].trim());
            pos += end + 1;
        } else if rest.starts_with("<!") {
            // doctype and the like
            pos += match rest.find('>') {
                Some(end) => end + 1,
                None => rest.len(),
            };
        } else {
            let Some(end) = rest.find('>') else {
                break;
            };
            match open_element(&mut doc, &open, &rest[1..end]) {
                Some((id, closed)) => {
                    if !closed {
                        open.push(id);
                    }
                    pos += end + 1;
                }
                // A stray '<' that opens no element stays literal text and
                // scanning resumes right after it.
                None => {
                    append_text(&mut doc, &open, "<");
                    pos += 1;
                }
            }
        }
    }

    doc
}

fn open_element(doc: &mut Document, open: &[NodeId], inner: &str) -> Option<(NodeId, bool)> {
    let self_closing = inner.ends_with('/');
    let inner = inner.trim_end_matches('/').trim();
    let name_len = inner
        .find(|c: char| c.is_whitespace())
        .unwrap_or(inner.len());
    let (name, attr_text) = inner.split_at(name_len);
    if name.is_empty() || !name.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let tag = name.to_ascii_lowercase();
    let attrs = ATTR_PATTERN
        .captures_iter(attr_text)
        .map(|capture| {
            let value = capture
                .get(2)
                .or_else(|| capture.get(3))
                .or_else(|| capture.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            (capture[1].to_ascii_lowercase(), value)
        })
        .collect();

    let closed = self_closing || VOID_TAGS.contains(&tag.as_str());
    let id = doc.push(NodeData::Element { tag, attrs }, open.last().copied());
    Some((id, closed))
}

fn close_element(open: &mut Vec<NodeId>, doc: &Document, name: &str) {
    let name = name.to_ascii_lowercase();
    if let Some(index) = open.iter().rposition(|&id| doc.tag(id) == Some(&name)) {
        open.truncate(index);
    }
}

fn append_text(doc: &mut Document, open: &[NodeId], raw: &str) {
    // Inter-element whitespace carries no content and is not kept.
    if raw.trim().is_empty() {
        return;
    }
    doc.push(
        NodeData::Text(decode_entities(raw)),
        open.last().copied(),
    );
}

pub(crate) fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_owned();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        match rest.find(';').filter(|&end| end <= 10) {
            Some(end) => {
                match decode_entity(&rest[1..end]) {
                    Some(decoded) => out.push(decoded),
                    None => out.push_str(&rest[..end + 1]),
                }
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
