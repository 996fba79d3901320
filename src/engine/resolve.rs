use super::{base_form_references, language_section, segment, Group, Sense};
use crate::config::Config;
use crate::wiktionary::MarkupSource;
use crate::Result;

/// Drives one lookup end to end: fetch, section extraction, segmentation,
/// then one level of base-form resolution per sense.
pub struct Resolver<S> {
    source: S,
    config: Config,
}

impl<S: MarkupSource> Resolver<S> {
    pub fn new(source: S, config: Config) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves a word into ordered groups, one per sense of the word, each
    /// followed by the base-form senses sharing its part of speech.
    ///
    /// Errors on the top-level word propagate. Errors while resolving a
    /// base-form reference never do: the reference is skipped and the group
    /// keeps whatever it already has, so a broken cross-reference costs at
    /// most its own contribution.
    pub async fn resolve(&self, word: &str) -> Result<Vec<Group>> {
        let senses = self.lookup(word).await?;

        let mut groups = Vec::with_capacity(senses.len());
        for sense in senses {
            let references = base_form_references(&sense, &self.config);
            let mut group = Group {
                senses: vec![sense],
            };
            let wanted = group.primary().part_of_speech;

            // References are fetched sequentially, in discovery order.
            for reference in references {
                let base_senses = match self.lookup(&reference).await {
                    Ok(base_senses) => base_senses,
                    Err(error) => {
                        tracing::debug!(word = %reference, "base form skipped: {error}");
                        continue;
                    }
                };
                for mut base in base_senses {
                    if base.part_of_speech == wanted {
                        base.derived = true;
                        group.senses.push(base);
                    }
                }
                // Base senses are not expanded for their own references:
                // resolution depth is fixed at one level, which is also why
                // reference cycles terminate. Deeper recursion requires a
                // visited set keyed by word.
            }

            groups.push(group);
        }

        Ok(groups)
    }

    async fn lookup(&self, word: &str) -> Result<Vec<Sense>> {
        let doc = self.source.fetch(word).await?;
        let section = language_section(&doc, word, &self.config)?;
        segment(&section, word, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::engine::PartOfSpeech;
    use crate::markup::{parse_html, Document};
    use crate::Error;

    struct FakeSource {
        entries: HashMap<String, String>,
    }

    impl FakeSource {
        fn new(entries: &[(&str, String)]) -> Self {
            Self {
                entries: entries
                    .iter()
                    .map(|(word, html)| (word.to_string(), html.clone()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl MarkupSource for FakeSource {
        async fn fetch(&self, word: &str) -> Result<Arc<Document>> {
            match self.entries.get(word) {
                Some(html) => Ok(Arc::new(parse_html(html))),
                None => Err(Error::WordNotFound(word.to_owned())),
            }
        }
    }

    // Entries carry the div.mw-parser-output wrapper the parse API puts
    // around every page.
    fn entry(body: &str) -> String {
        format!(
            concat!(
                r#"<div class="mw-parser-output">"#,
                r#"<h2><span class="mw-headline" id="Latin">Latin</span></h2>"#,
                "{body}<hr></div>",
            ),
            body = body
        )
    }

    fn verb_sense(definition: &str) -> String {
        format!(r#"<h3 id="Verb">Verb</h3><ol><li>{definition}</li></ol>"#)
    }

    fn form_of(definition: &str, target: &str) -> String {
        format!(
            r#"<h3 id="Verb">Verb</h3><ol><li>{definition} <span class="form-of-definition-link"><a href="/wiki/{target}#Latin">{target}</a></span></li></ol>"#
        )
    }

    fn resolver(entries: &[(&str, String)]) -> Resolver<FakeSource> {
        Resolver::new(FakeSource::new(entries), Config::latin())
    }

    #[tokio::test]
    async fn lemma_without_references_yields_one_singleton_group() {
        let resolver = resolver(&[("amō", entry(&verb_sense("I love")))]);
        let groups = resolver.resolve("amō").await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].senses.len(), 1);
        assert_eq!(groups[0].primary().part_of_speech, PartOfSpeech::Verb);
        assert!(!groups[0].primary().derived);
    }

    #[tokio::test]
    async fn inflected_form_pulls_in_its_base_sense() {
        let resolver = resolver(&[
            ("amāris", entry(&form_of("second-person form of", "amō"))),
            ("amō", entry(&verb_sense("I love"))),
        ]);
        let groups = resolver.resolve("amāris").await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].senses.len(), 2);
        assert!(!groups[0].senses[0].derived);
        assert!(groups[0].senses[1].derived);
        assert_eq!(groups[0].senses[1].part_of_speech, PartOfSpeech::Verb);
    }

    #[tokio::test]
    async fn broken_reference_is_dropped_silently() {
        let resolver = resolver(&[(
            "amāris",
            entry(&form_of("form of", "nonexistentum")),
        )]);
        let groups = resolver.resolve("amāris").await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].senses.len(), 1);
    }

    #[tokio::test]
    async fn broken_reference_does_not_abort_sibling_references() {
        let body = concat!(
            r#"<h3 id="Verb">Verb</h3><ol>"#,
            r#"<li><span class="form-of-definition-link"><a href="/wiki/missing">missing</a></span></li>"#,
            r#"<li><span class="form-of-definition-link"><a href="/wiki/amō">amō</a></span></li>"#,
            "</ol>",
        );
        let resolver = resolver(&[
            ("amāris", entry(body)),
            ("amō", entry(&verb_sense("I love"))),
        ]);
        let groups = resolver.resolve("amāris").await.unwrap();
        assert_eq!(groups[0].senses.len(), 2);
    }

    #[tokio::test]
    async fn groups_follow_document_order() {
        let body = concat!(
            r#"<h3 id="Noun">Noun</h3><p>n</p>"#,
            r#"<h3 id="Verb">Verb</h3><p>v</p>"#,
        );
        let resolver = resolver(&[("liber", entry(body))]);
        let groups = resolver.resolve("liber").await.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].primary().part_of_speech, PartOfSpeech::Noun);
        assert_eq!(groups[1].primary().part_of_speech, PartOfSpeech::Verb);
        assert!(groups.iter().all(|group| group.senses.len() == 1));
    }

    #[tokio::test]
    async fn base_senses_filter_to_the_primary_part_of_speech() {
        let base = concat!(
            r#"<h3 id="Noun">Noun</h3><p>love (noun)</p>"#,
            r#"<h3 id="Verb">Verb</h3><p>to love</p>"#,
        );
        let resolver = resolver(&[
            ("amāris", entry(&form_of("form of", "amō"))),
            ("amō", entry(base)),
        ]);
        let groups = resolver.resolve("amāris").await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].senses.len(), 2);
        assert!(groups[0]
            .senses
            .iter()
            .all(|sense| sense.part_of_speech == groups[0].primary().part_of_speech));
    }

    #[tokio::test]
    async fn base_entry_without_target_language_is_skipped() {
        let resolver = resolver(&[
            ("amāris", entry(&form_of("form of", "amō"))),
            ("amō", String::from(r#"<h2 id="Spanish">Spanish</h2><p>x</p>"#)),
        ]);
        let groups = resolver.resolve("amāris").await.unwrap();
        assert_eq!(groups[0].senses.len(), 1);
    }

    #[tokio::test]
    async fn unknown_top_level_word_is_fatal() {
        let resolver = resolver(&[]);
        let error = resolver.resolve("nihil").await.unwrap_err();
        assert!(matches!(error, Error::WordNotFound(word) if word == "nihil"));
    }
}
