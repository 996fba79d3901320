use std::iter;
use std::sync::Arc;

use super::{classify_heading, HeadingKind, LanguageSection, Sense};
use crate::config::{Config, ETYMOLOGY_LABEL};
use crate::markup::{Document, NodeId};
use crate::{Error, Result};

/// Partitions a language section into one fragment per sense.
///
/// Every fragment opens at a node that carries (itself or among its
/// descendants) an identifier classified as a part of speech or an
/// auxiliary label, and runs until the next such node. Label fragments are
/// auxiliary and excluded from the returned senses, except for the
/// etymology pairing below. Fragments are scanned from the first classified
/// heading in the section, so etymology blocks preceding the first sense
/// heading still count; a section with no part-of-speech heading at all is
/// an error.
///
/// Etymology pairing is a positional best-effort heuristic: only when the
/// number of etymology fragments exactly equals the number of senses is
/// etymology fragment i attached to sense i. The markup expresses no real
/// parent/child relation between the two; when the counts differ, no
/// pairing is attempted.
pub fn segment(section: &LanguageSection, word: &str, config: &Config) -> Result<Vec<Sense>> {
    let doc = &section.doc;
    section
        .nodes
        .iter()
        .position(|&id| {
            matches!(
                fragment_heading(doc, id, config),
                Some((HeadingKind::PartOfSpeech(_), _))
            )
        })
        .ok_or_else(|| Error::NoSenseFound {
            word: word.to_owned(),
            language: config.language.clone(),
        })?;
    let scan_start = section
        .nodes
        .iter()
        .position(|&id| fragment_heading(doc, id, config).is_some())
        .unwrap_or(section.nodes.len());

    let mut senses = Vec::new();
    let mut etymologies = Vec::new();
    let mut index = scan_start;
    while index < section.nodes.len() {
        let lead = fragment_heading(doc, section.nodes[index], config);
        let mut content = vec![section.nodes[index]];
        index += 1;
        while index < section.nodes.len()
            && fragment_heading(doc, section.nodes[index], config).is_none()
        {
            content.push(section.nodes[index]);
            index += 1;
        }

        match lead {
            Some((HeadingKind::PartOfSpeech(part_of_speech), _)) => senses.push(Sense {
                doc: Arc::clone(doc),
                part_of_speech,
                content,
                etymology: None,
                derived: false,
            }),
            Some((HeadingKind::Label, ident)) if ident.starts_with(ETYMOLOGY_LABEL) => {
                etymologies.push(content)
            }
            _ => {}
        }
    }

    if !etymologies.is_empty() && etymologies.len() == senses.len() {
        for (sense, etymology) in senses.iter_mut().zip(etymologies) {
            sense.etymology = Some(etymology);
        }
    }

    Ok(senses)
}

/// First classified identifier on the node or its descendants, in document
/// order. `None` means the node continues the current fragment.
fn fragment_heading<'a>(
    doc: &'a Document,
    node: NodeId,
    config: &Config,
) -> Option<(HeadingKind, &'a str)> {
    iter::once(node)
        .chain(doc.descendants(node))
        .find_map(|id| {
            let ident = doc.id_attr(id)?;
            match classify_heading(ident, config) {
                HeadingKind::Other => None,
                kind => Some((kind, ident)),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{language_section, PartOfSpeech};
    use crate::markup::parse_html;

    fn senses_of(body: &str) -> (Arc<Document>, Vec<Sense>) {
        let html = format!(
            r#"<h2><span class="mw-headline" id="Latin">Latin</span></h2>{body}<hr>"#
        );
        let doc = Arc::new(parse_html(&html));
        let config = Config::latin();
        let section = language_section(&doc, "w", &config).unwrap();
        let senses = segment(&section, "w", &config).unwrap();
        (doc, senses)
    }

    #[test]
    fn single_heading_spans_to_section_end() {
        let (doc, senses) = senses_of(concat!(
            r#"<h3><span class="mw-headline" id="Verb">Verb</span></h3>"#,
            "<p>amo</p>",
            "<ol><li>I love</li></ol>",
        ));
        assert_eq!(senses.len(), 1);
        assert_eq!(senses[0].part_of_speech, PartOfSpeech::Verb);
        assert_eq!(senses[0].content.len(), 3);
        assert_eq!(doc.text(senses[0].content[2]), "I love");
    }

    #[test]
    fn fragments_partition_the_section() {
        let (_, senses) = senses_of(concat!(
            r#"<h3 id="Noun">Noun</h3>"#,
            "<p>n1</p>",
            "<p>n2</p>",
            r#"<h3 id="Verb">Verb</h3>"#,
            "<p>v1</p>",
        ));
        assert_eq!(senses.len(), 2);
        assert_eq!(senses[0].part_of_speech, PartOfSpeech::Noun);
        assert_eq!(senses[1].part_of_speech, PartOfSpeech::Verb);
        // Every node from the first sense heading onward lands in exactly
        // one fragment.
        assert_eq!(senses[0].content.len(), 3);
        assert_eq!(senses[1].content.len(), 2);
        let mut all: Vec<_> = senses
            .iter()
            .flat_map(|sense| sense.content.iter().copied())
            .collect();
        let total = all.len();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn content_before_the_first_sense_heading_is_skipped() {
        let (doc, senses) = senses_of(concat!(
            "<p>table of contents</p>",
            r#"<h3 id="Verb">Verb</h3>"#,
            "<p>v</p>",
        ));
        assert_eq!(senses.len(), 1);
        assert_eq!(doc.text(senses[0].content[0]), "Verb");
    }

    #[test]
    fn label_fragment_ends_the_previous_sense() {
        let (doc, senses) = senses_of(concat!(
            r#"<h3 id="Verb">Verb</h3>"#,
            "<p>v</p>",
            r#"<h3 id="References">References</h3>"#,
            "<p>refs</p>",
        ));
        assert_eq!(senses.len(), 1);
        assert_eq!(senses[0].content.len(), 2);
        assert_eq!(doc.text(senses[0].content[1]), "v");
    }

    #[test]
    fn etymologies_pair_positionally_when_counts_match() {
        let (doc, senses) = senses_of(concat!(
            r#"<h3 id="Verb">Verb</h3>"#,
            "<p>v</p>",
            r#"<h3 id="Etymology">Etymology</h3>"#,
            "<p>from amare</p>",
            r#"<h3 id="Noun">Noun</h3>"#,
            "<p>n</p>",
            r#"<h3 id="Etymology_2">Etymology</h3>"#,
            "<p>from amor</p>",
        ));
        assert_eq!(senses.len(), 2);
        let first = senses[0].etymology.as_ref().unwrap();
        assert_eq!(doc.text(first[1]), "from amare");
        let second = senses[1].etymology.as_ref().unwrap();
        assert_eq!(doc.text(second[1]), "from amor");
    }

    #[test]
    fn etymologies_preceding_their_sense_headings_pair() {
        // The usual page shape: each etymology block comes before the sense
        // heading it belongs to, including before the first one.
        let (doc, senses) = senses_of(concat!(
            r#"<h3 id="Etymology">Etymology</h3>"#,
            "<p>from amare</p>",
            r#"<h3 id="Verb">Verb</h3>"#,
            "<p>v</p>",
            r#"<h3 id="Etymology_2">Etymology</h3>"#,
            "<p>from amor</p>",
            r#"<h3 id="Noun">Noun</h3>"#,
            "<p>n</p>",
        ));
        assert_eq!(senses.len(), 2);
        let first = senses[0].etymology.as_ref().unwrap();
        assert_eq!(doc.text(first[1]), "from amare");
        let second = senses[1].etymology.as_ref().unwrap();
        assert_eq!(doc.text(second[1]), "from amor");
    }

    #[test]
    fn etymology_pairing_needs_an_exact_count_match() {
        let (_, senses) = senses_of(concat!(
            r#"<h3 id="Verb">Verb</h3>"#,
            "<p>v</p>",
            r#"<h3 id="Etymology">Etymology</h3>"#,
            "<p>e</p>",
            r#"<h3 id="Noun">Noun</h3>"#,
            "<p>n</p>",
        ));
        assert_eq!(senses.len(), 2);
        assert!(senses.iter().all(|sense| sense.etymology.is_none()));
    }

    #[test]
    fn section_without_sense_headings_is_an_error() {
        let html = concat!(
            r#"<h2 id="Latin">Latin</h2>"#,
            r#"<h3 id="Pronunciation">Pronunciation</h3>"#,
            "<p>IPA</p>",
            "<hr>",
        );
        let doc = Arc::new(parse_html(html));
        let config = Config::latin();
        let section = language_section(&doc, "w", &config).unwrap();
        let error = segment(&section, "w", &config).unwrap_err();
        assert!(matches!(error, Error::NoSenseFound { .. }));
    }
}
