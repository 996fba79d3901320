use core::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::markup::{Document, NodeId};

mod baseform;
mod resolve;
mod section;
mod segment;

pub use baseform::base_form_references;
pub use resolve::Resolver;
pub use section::{language_section, LanguageSection};
pub use segment::segment;

/// Closed set of part-of-speech headings. Declaration order doubles as the
/// matching priority when a heading identifier is classified.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum PartOfSpeech {
    Verb,
    Noun,
    Adjective,
    Adverb,
    Participle,
    Pronoun,
    Determiner,
    Preposition,
    Numeral,
    Interjection,
    Conjunction,
    Particle,
    Suffix,
    Phrase,
    Idiom,
    Proverb,
    Letter,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 17] = [
        PartOfSpeech::Verb,
        PartOfSpeech::Noun,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
        PartOfSpeech::Participle,
        PartOfSpeech::Pronoun,
        PartOfSpeech::Determiner,
        PartOfSpeech::Preposition,
        PartOfSpeech::Numeral,
        PartOfSpeech::Interjection,
        PartOfSpeech::Conjunction,
        PartOfSpeech::Particle,
        PartOfSpeech::Suffix,
        PartOfSpeech::Phrase,
        PartOfSpeech::Idiom,
        PartOfSpeech::Proverb,
        PartOfSpeech::Letter,
    ];

    /// Name as it appears in heading identifiers ("Verb", "Verb_2", ...).
    pub fn as_str(&self) -> &'static str {
        match *self {
            PartOfSpeech::Verb => "Verb",
            PartOfSpeech::Noun => "Noun",
            PartOfSpeech::Adjective => "Adjective",
            PartOfSpeech::Adverb => "Adverb",
            PartOfSpeech::Participle => "Participle",
            PartOfSpeech::Pronoun => "Pronoun",
            PartOfSpeech::Determiner => "Determiner",
            PartOfSpeech::Preposition => "Preposition",
            PartOfSpeech::Numeral => "Numeral",
            PartOfSpeech::Interjection => "Interjection",
            PartOfSpeech::Conjunction => "Conjunction",
            PartOfSpeech::Particle => "Particle",
            PartOfSpeech::Suffix => "Suffix",
            PartOfSpeech::Phrase => "Phrase",
            PartOfSpeech::Idiom => "Idiom",
            PartOfSpeech::Proverb => "Proverb",
            PartOfSpeech::Letter => "Letter",
        }
    }

    /// First variant in declaration order whose name prefixes the heading
    /// identifier, e.g. "Noun_2" classifies as `Noun`.
    pub fn from_heading_id(ident: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|pos| ident.starts_with(pos.as_str()))
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_lowercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

/// Total classification of a heading identifier, computed once per heading.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum HeadingKind {
    PartOfSpeech(PartOfSpeech),
    Label,
    Other,
}

pub fn classify_heading(ident: &str, config: &Config) -> HeadingKind {
    if let Some(pos) = PartOfSpeech::from_heading_id(ident) {
        return HeadingKind::PartOfSpeech(pos);
    }
    if config
        .labels
        .iter()
        .any(|label| ident.starts_with(label.as_str()))
    {
        HeadingKind::Label
    } else {
        HeadingKind::Other
    }
}

/// One part-of-speech block of a language section: the heading's container
/// plus everything up to the next sense or label heading. The content is a
/// slice of top-level node ids into the shared entry document.
#[derive(Debug, Clone)]
pub struct Sense {
    pub doc: Arc<Document>,
    pub part_of_speech: PartOfSpeech,
    pub content: Vec<NodeId>,
    /// Positionally paired etymology fragment, when the segmenter's
    /// count-equality heuristic fires.
    pub etymology: Option<Vec<NodeId>>,
    /// Set on senses contributed by a base-form entry rather than the
    /// looked-up word itself.
    pub derived: bool,
}

/// The primary sense followed by its matching base-form senses.
#[derive(Debug, Clone)]
pub struct Group {
    pub senses: Vec<Sense>,
}

impl Group {
    pub fn primary(&self) -> &Sense {
        &self.senses[0]
    }
}
