//! Turns resolved groups into something printable.
//!
//! The parsed tree is immutable, so every cosmetic rewrite the dictionary
//! markup needs before display happens here, while serializing: edit
//! affordances are dropped, internal links rewritten to bare words, and
//! grammatical labels in inflection tables abbreviated.

use serde::Serialize;

use crate::config::{Config, WIKI_DIRECTORY};
use crate::engine::{Group, Sense};
use crate::markup::{Document, NodeData, NodeId, VOID_TAGS};

#[derive(Serialize)]
pub struct SenseOutput {
    pub part_of_speech: String,
    pub derived: bool,
    pub html: String,
}

#[derive(Serialize)]
pub struct GroupOutput {
    pub senses: Vec<SenseOutput>,
}

/// Hands the groups over in their resolution order; the engine's ordering
/// contract survives serialization untouched.
pub fn group_outputs(groups: &[Group], config: &Config) -> Vec<GroupOutput> {
    groups
        .iter()
        .map(|group| GroupOutput {
            senses: group
                .senses
                .iter()
                .map(|sense| SenseOutput {
                    part_of_speech: sense.part_of_speech.to_string(),
                    derived: sense.derived,
                    html: render_sense_html(sense, config),
                })
                .collect(),
        })
        .collect()
}

pub fn render_group_html(group: &Group, config: &Config) -> String {
    let parts: Vec<String> = group
        .senses
        .iter()
        .map(|sense| render_sense_html(sense, config))
        .collect();
    parts.join("<p></p>")
}

pub fn render_sense_html(sense: &Sense, config: &Config) -> String {
    let mut out = String::new();
    if let Some(etymology) = &sense.etymology {
        for &id in etymology {
            render_node(&sense.doc, id, config, &mut out);
        }
    }
    for &id in &sense.content {
        render_node(&sense.doc, id, config, &mut out);
    }
    out
}

pub fn render_group_text(group: &Group, config: &Config) -> String {
    let mut out = String::new();
    for sense in &group.senses {
        if sense.derived {
            out.push_str(&format!("[{}, base form]\n", sense.part_of_speech));
        } else {
            out.push_str(&format!("[{}]\n", sense.part_of_speech));
        }
        if let Some(etymology) = &sense.etymology {
            push_text_lines(&sense.doc, etymology, &mut out);
        }
        push_text_lines(&sense.doc, &sense.content, &mut out);
        out.push('\n');
    }
    out
}

fn push_text_lines(doc: &Document, nodes: &[NodeId], out: &mut String) {
    for &id in nodes {
        let mut text = String::new();
        plain_text(doc, id, &mut text);
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            out.push_str(&collapsed);
            out.push('\n');
        }
    }
}

fn plain_text(doc: &Document, id: NodeId, out: &mut String) {
    match doc.data(id) {
        NodeData::Text(text) => out.push_str(text),
        NodeData::Element { tag, .. } => {
            if tag == "span" && doc.has_class(id, "mw-editsection") {
                return;
            }
            for &child in doc.children(id) {
                plain_text(doc, child, out);
            }
        }
    }
}

fn render_node(doc: &Document, id: NodeId, config: &Config, out: &mut String) {
    match doc.data(id) {
        NodeData::Text(text) => out.push_str(&escape_text(text)),
        NodeData::Element { tag, attrs } => {
            if tag == "span" && doc.has_class(id, "mw-editsection") {
                return;
            }

            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                let value = if tag == "a" && name == "href" {
                    rewrite_href(value, config)
                } else {
                    value.clone()
                };
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(&value));
                out.push('"');
            }
            out.push('>');
            if VOID_TAGS.contains(&tag.as_str()) {
                return;
            }

            if abbreviation_target(tag) {
                if let Some(short) = abbreviation(doc, id, config) {
                    out.push_str(&escape_text(short));
                    out.push_str(&format!("</{tag}>"));
                    return;
                }
            }

            for &child in doc.children(id) {
                render_node(doc, child, config, out);
            }
            out.push_str(&format!("</{tag}>"));
        }
    }
}

fn abbreviation_target(tag: &str) -> bool {
    matches!(tag, "td" | "th" | "h3" | "h4" | "h5" | "h6")
}

fn abbreviation<'a>(doc: &Document, id: NodeId, config: &'a Config) -> Option<&'a str> {
    // Keyed on the displayed text, so edit affordances must not leak in.
    let mut text = String::new();
    plain_text(doc, id, &mut text);
    let key = text.trim().to_lowercase();
    config.abbreviations.get(&key).map(String::as_str)
}

/// Internal links pointing at the target language (or at no section in
/// particular) become bare words the lookup form can resolve again; other
/// relative links are absolutized against the wiki.
fn rewrite_href(href: &str, config: &Config) -> String {
    let lower = href.to_lowercase();
    let language_fragment = format!("#{}", config.language.to_lowercase());
    if lower.starts_with(WIKI_DIRECTORY)
        && (lower.contains(&language_fragment) || !lower.contains('#'))
    {
        let bare = &href[WIKI_DIRECTORY.len()..];
        match bare.split_once('#') {
            Some((word, _)) => word.to_owned(),
            None => bare.to_owned(),
        }
    } else if !(lower.starts_with("http") || lower.starts_with("//")) {
        format!("{}{}", config.site_url, href)
    } else {
        href.to_owned()
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
