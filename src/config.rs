use std::collections::HashMap;

/// Path prefix of internal wiki links.
pub const WIKI_DIRECTORY: &str = "/wiki/";

/// Heading-identifier prefix of etymology sections, used for the positional
/// etymology-to-sense pairing in the segmenter.
pub const ETYMOLOGY_LABEL: &str = "Etymology";

/// Everything the engine needs to know about one deployment: which language
/// section to extract, which headings are auxiliary labels, which markup
/// classes mark a form-of reference, and how to abbreviate grammatical
/// labels for display. One `Config` per engine; nothing here is global.
#[derive(Clone, Debug)]
pub struct Config {
    pub language: String,
    pub site_url: String,
    pub api_endpoint: String,
    /// Auxiliary section headings that end a sense fragment but are not
    /// senses themselves.
    pub labels: Vec<String>,
    /// Class-attribute substrings marking an inline form-of reference.
    pub base_form_classes: Vec<String>,
    pub abbreviations: HashMap<String, String>,
}

impl Config {
    pub fn latin() -> Self {
        let abbreviations = [
            ("first", "1st"),
            ("second", "2nd"),
            ("third", "3rd"),
            ("imperfect", "imperf."),
            ("future perfect", "fut.perf."),
            ("future\u{a0}perfect", "fut.perf."),
            ("pluperfect", "plu.perf."),
            ("passive", "pass."),
            ("active", "act."),
            ("singular", "sing."),
            ("plural", "plur."),
            ("non-finite forms", "non-finite"),
            ("nominative", "nom."),
            ("genitive", "gen."),
            ("dative", "dat."),
            ("accusative", "acc."),
            ("ablative", "abl."),
            ("vocative", "voc."),
            ("possessive", "poss."),
            ("neuter", "neut."),
            ("feminine", "fem."),
            ("masculine", "masc."),
            ("reflexive", "reflex."),
        ]
        .iter()
        .map(|&(from, to)| (from.to_owned(), to.to_owned()))
        .collect();

        Self {
            language: String::from("Latin"),
            site_url: String::from("https://en.wiktionary.org"),
            api_endpoint: String::from("https://en.wiktionary.org/w/api.php"),
            labels: [
                "Alternative_forms",
                "Etymology",
                "Pronunciation",
                "References",
                "External_links",
            ]
            .iter()
            .map(|&l| l.to_owned())
            .collect(),
            base_form_classes: vec![String::from("form-of-definition-link")],
            abbreviations,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::latin()
    }
}
