use std::collections::HashSet;
use std::iter;

use percent_encoding::percent_decode_str;

use super::Sense;
use crate::config::{Config, WIKI_DIRECTORY};
use crate::markup::{Document, NodeId};

/// Collects the base-form references of a sense: words pointed to by inline
/// annotations marked with one of the configured form-of classes.
///
/// Duplicates collapse to the first occurrence; the returned order is the
/// order of first discovery. Annotations without an anchor, without an href,
/// or with an href that normalizes to nothing are skipped silently.
pub fn base_form_references(sense: &Sense, config: &Config) -> Vec<String> {
    let doc = &sense.doc;
    let mut seen = HashSet::new();
    let mut references = Vec::new();

    for &root in &sense.content {
        for id in iter::once(root).chain(doc.descendants(root)) {
            let Some(class) = doc.attr(id, "class") else {
                continue;
            };
            if !config
                .base_form_classes
                .iter()
                .any(|marker| class.contains(marker.as_str()))
            {
                continue;
            }
            let Some(href) = first_anchor_href(doc, id) else {
                continue;
            };
            let Some(word) = normalize_reference(href) else {
                continue;
            };
            if seen.insert(word.clone()) {
                references.push(word);
            }
        }
    }

    references
}

/// Href of the first anchor descendant; a first anchor without an href is
/// not retried against later anchors.
fn first_anchor_href<'a>(doc: &'a Document, id: NodeId) -> Option<&'a str> {
    let anchor = doc.descendants(id).find(|&n| doc.tag(n) == Some("a"))?;
    doc.attr(anchor, "href")
}

/// Turns a link target into the referenced word: the fragment is dropped,
/// the wiki directory prefix stripped, and percent escapes decoded.
fn normalize_reference(href: &str) -> Option<String> {
    let path = match href.split_once('#') {
        Some((path, _)) => path,
        None => href,
    };
    let title = path.strip_prefix(WIKI_DIRECTORY).unwrap_or(path);
    let title = percent_decode_str(title).decode_utf8().ok()?;
    let title = title.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_owned())
    }
}
