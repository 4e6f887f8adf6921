// src/extractors/header.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

// --- Constants ---
/// Emphasis and heading markers the generation service sprinkles into its output.
pub const MARKUP_CHARS: [char; 2] = ['*', '#'];

// --- Default Vocabulary (Lazy Static) ---
// Mirrors the headers the built-in prompts ask for, plus the spellings the model is known to drift to.
static DEFAULT_VOCABULARY: Lazy<HeaderVocabulary> = Lazy::new(|| {
    let titles = vec![
        SectionTitle::new("Purpose"),
        SectionTitle::new("Scope"),
        SectionTitle::with_synonyms(
            "Definitions, Acronyms and Abbreviations",
            &["Definitions, Acronyms, and Abbreviations"],
        ),
        SectionTitle::new("Overview of Item"),
        SectionTitle::new("Components of the item"),
        SectionTitle::new("Operational environment of the item"),
        SectionTitle::new("Item Boundary"),
        SectionTitle::new("Interaction with other Items/Component"),
        SectionTitle::new("Internal Interfaces"),
        SectionTitle::new("Assets of the Item"),
        SectionTitle::new("Cybersecurity Requirements"),
        SectionTitle::new("Assumptions"),
        SectionTitle::with_synonyms("Constraints and Compliance", &["Constraints and compliance"]),
        SectionTitle::new("Known Vulnerabilities"),
        SectionTitle::new("Conclusion"),
    ];
    HeaderVocabulary::new(titles).expect("Failed to compile DEFAULT_VOCABULARY")
});

/// Removes every markup character from `text`. Applying it twice is a no-op.
pub fn strip_markup(text: &str) -> String {
    text.chars().filter(|c| !MARKUP_CHARS.contains(c)).collect()
}

// --- Data Structures ---
/// One recognized section title and the alternative spellings accepted for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionTitle {
    pub title: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl SectionTitle {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            synonyms: Vec::new(),
        }
    }

    pub fn with_synonyms(title: &str, synonyms: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The canonical title followed by its synonyms.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(self.synonyms.iter().map(String::as_str))
    }
}

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    titles: Vec<SectionTitle>,
}

/// The closed set of section headers the splitter will recognize.
///
/// A line is a header iff, once markup is stripped and whitespace trimmed, it is
/// exactly one accepted spelling followed by a colon. Matching is case-sensitive;
/// alternative casings only match when listed as synonyms.
#[derive(Debug, Clone)]
pub struct HeaderVocabulary {
    titles: Vec<SectionTitle>,
    pattern: Regex,
}

impl HeaderVocabulary {
    /// Validates the titles and compiles the anchored header pattern.
    pub fn new(titles: Vec<SectionTitle>) -> Result<Self, ExtractError> {
        if titles.is_empty() {
            return Err(ExtractError::Vocabulary("no titles configured".to_string()));
        }

        let mut alternatives: Vec<String> = Vec::new();
        for spelling in titles.iter().flat_map(SectionTitle::spellings) {
            validate_spelling(spelling)?;
            if alternatives.iter().any(|seen| seen == &regex::escape(spelling)) {
                return Err(ExtractError::Vocabulary(format!(
                    "'{}' is listed more than once",
                    spelling
                )));
            }
            alternatives.push(regex::escape(spelling));
        }

        let pattern = Regex::new(&format!(r"^({}):$", alternatives.join("|")))?;
        tracing::debug!(
            "Compiled header vocabulary: {} titles, {} spellings",
            titles.len(),
            alternatives.len()
        );

        Ok(Self { titles, pattern })
    }

    /// Loads a vocabulary from JSON of the form `{"titles": [{"title": "...", "synonyms": [...]}]}`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let file: VocabularyFile = serde_json::from_str(&raw)?;
        tracing::info!(
            "Loaded header vocabulary from {}",
            path.as_ref().display()
        );
        Self::new(file.titles)
    }

    pub fn titles(&self) -> &[SectionTitle] {
        &self.titles
    }

    /// Returns the spelling a header line uses, or `None` when the line is not a header.
    pub fn recognize(&self, line: &str) -> Option<&str> {
        let cleaned = strip_markup(line);
        let caps = self.pattern.captures(cleaned.trim())?;
        let observed = caps.get(1)?.as_str();
        self.titles
            .iter()
            .flat_map(SectionTitle::spellings)
            .find(|spelling| *spelling == observed)
    }

    pub fn is_header(&self, line: &str) -> bool {
        self.recognize(line).is_some()
    }

    /// Maps any accepted spelling back to its canonical title.
    pub fn canonical(&self, spelling: &str) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| t.spellings().any(|s| s == spelling))
            .map(|t| t.title.as_str())
    }
}

impl Default for HeaderVocabulary {
    fn default() -> Self {
        DEFAULT_VOCABULARY.clone()
    }
}

fn validate_spelling(spelling: &str) -> Result<(), ExtractError> {
    if spelling.trim().is_empty() {
        return Err(ExtractError::Vocabulary("blank title".to_string()));
    }
    if spelling.trim() != spelling {
        return Err(ExtractError::Vocabulary(format!(
            "'{}' has surrounding whitespace",
            spelling
        )));
    }
    if spelling.contains(':') || spelling.contains('\n') {
        return Err(ExtractError::Vocabulary(format!(
            "'{}' may not contain a colon or line break",
            spelling
        )));
    }
    if spelling.contains(MARKUP_CHARS) {
        return Err(ExtractError::Vocabulary(format!(
            "'{}' contains markup characters that are stripped before matching",
            spelling
        )));
    }
    Ok(())
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn recognizes_exact_header_lines() {
        let vocab = HeaderVocabulary::default();
        assert_eq!(vocab.recognize("Purpose:"), Some("Purpose"));
        assert_eq!(vocab.recognize("   Item Boundary:  "), Some("Item Boundary"));
        assert_eq!(
            vocab.recognize("Interaction with other Items/Component:"),
            Some("Interaction with other Items/Component")
        );
    }

    #[test]
    fn strips_markup_before_matching() {
        let vocab = HeaderVocabulary::default();
        assert_eq!(vocab.recognize("**Scope:**"), Some("Scope"));
        assert_eq!(vocab.recognize("### Assumptions:"), Some("Assumptions"));
    }

    #[test]
    fn rejects_near_matches() {
        let vocab = HeaderVocabulary::default();
        assert!(!vocab.is_header("purpose:"));
        assert!(!vocab.is_header("Purpose"));
        assert!(!vocab.is_header("Purpose: build a thing"));
        assert!(!vocab.is_header("Purpose :"));
        assert!(!vocab.is_header("The Purpose:"));
        assert!(!vocab.is_header("Known vulnerabilities:"));
    }

    #[test]
    fn synonyms_match_and_map_to_canonical() {
        let vocab = HeaderVocabulary::default();
        let spelled = vocab
            .recognize("Definitions, Acronyms, and Abbreviations:")
            .expect("synonym should match");
        assert_eq!(spelled, "Definitions, Acronyms, and Abbreviations");
        assert_eq!(
            vocab.canonical(spelled),
            Some("Definitions, Acronyms and Abbreviations")
        );

        assert_eq!(
            vocab.recognize("Constraints and compliance:"),
            Some("Constraints and compliance")
        );
        assert!(!vocab.is_header("constraints and compliance:"));
    }

    #[test]
    fn regex_metacharacters_in_titles_are_literal() {
        let vocab = HeaderVocabulary::new(vec![SectionTitle::new("Cost (USD)")]).unwrap();
        assert!(vocab.is_header("Cost (USD):"));
        assert!(!vocab.is_header("Cost USD:"));
    }

    #[test]
    fn strip_markup_is_idempotent() {
        let text = "**Bold** and ## heading # with *stars*";
        let once = strip_markup(text);
        assert_eq!(once, "Bold and  heading  with stars");
        assert_eq!(strip_markup(&once), once);
    }

    #[test]
    fn rejects_invalid_vocabularies() {
        assert!(HeaderVocabulary::new(Vec::new()).is_err());
        assert!(HeaderVocabulary::new(vec![SectionTitle::new("  ")]).is_err());
        assert!(HeaderVocabulary::new(vec![SectionTitle::new("Scope:")]).is_err());
        assert!(HeaderVocabulary::new(vec![SectionTitle::new("*Scope")]).is_err());
        assert!(HeaderVocabulary::new(vec![
            SectionTitle::new("Scope"),
            SectionTitle::with_synonyms("Range", &["Scope"]),
        ])
        .is_err());
    }

    #[test]
    fn loads_vocabulary_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"titles": [{{"title": "Summary"}}, {{"title": "Risks", "synonyms": ["RISKS"]}}]}}"#
        )
        .unwrap();

        let vocab = HeaderVocabulary::from_json_file(file.path()).unwrap();
        assert_eq!(vocab.titles().len(), 2);
        assert!(vocab.is_header("Summary:"));
        assert_eq!(vocab.canonical("RISKS"), Some("Risks"));
        assert!(!vocab.is_header("Purpose:"));
    }
}
