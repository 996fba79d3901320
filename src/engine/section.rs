use std::sync::Arc;

use crate::config::Config;
use crate::markup::{Document, NodeId};
use crate::{Error, Result};

/// The contiguous run of top-level nodes belonging to one language within an
/// entry document.
#[derive(Debug, Clone)]
pub struct LanguageSection {
    pub doc: Arc<Document>,
    pub nodes: Vec<NodeId>,
}

/// Isolates the target language's section: every sibling following the
/// heading that carries the language identifier, up to the next horizontal
/// rule or the next language-level heading, exclusive.
///
/// The walk happens at the heading container's sibling level, not at the
/// document roots: the parse API wraps the whole page in a
/// `div.mw-parser-output`, so language sections sit one level down.
pub fn language_section(
    doc: &Arc<Document>,
    word: &str,
    config: &Config,
) -> Result<LanguageSection> {
    let marker = doc
        .find_by_id(&config.language)
        .ok_or_else(|| Error::LanguageNotFound {
            word: word.to_owned(),
            language: config.language.clone(),
        })?;

    // The identifier may sit on a headline span inside the heading, on the
    // heading element itself, or under a skin's heading wrapper. Climb to
    // the outermost heading-shaped ancestor; its siblings are the section.
    let mut container = marker;
    while let Some(parent) = doc.parent(container) {
        if !is_heading_container(doc, parent) {
            break;
        }
        container = parent;
    }
    let siblings: &[NodeId] = match doc.parent(container) {
        Some(parent) => doc.children(parent),
        None => doc.roots(),
    };
    let start = siblings
        .iter()
        .position(|&id| id == container)
        .map(|index| index + 1)
        .unwrap_or(siblings.len());

    let mut nodes = Vec::new();
    for &id in &siblings[start..] {
        if is_section_end(doc, id) {
            break;
        }
        nodes.push(id);
    }

    Ok(LanguageSection {
        doc: Arc::clone(doc),
        nodes,
    })
}

fn is_heading_container(doc: &Document, id: NodeId) -> bool {
    match doc.tag(id) {
        Some("h1") | Some("h2") | Some("h3") | Some("h4") | Some("h5") | Some("h6") => true,
        Some(_) => doc.has_class(id, "mw-heading"),
        None => false,
    }
}

fn is_section_end(doc: &Document, id: NodeId) -> bool {
    match doc.tag(id) {
        Some("hr") | Some("h2") => true,
        // Skins that wrap headings put the level on the container class.
        Some(_) => doc.has_class(id, "mw-heading2"),
        None => false,
    }
}
