// src/extractors/section.rs

// --- Imports ---
use crate::extractors::header::{strip_markup, HeaderVocabulary};

/// Strips markup globally, then trims every line. Runs before header matching so
/// indentation or emphasis around a header cannot hide it.
pub fn normalize(raw: &str) -> String {
    strip_markup(raw)
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

// --- Data Structures ---
/// Header -> body, in first-occurrence order.
///
/// Inserting an existing header replaces its body but keeps its position, so a
/// header repeated in the generated text keeps the body of its last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<(String, String)>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, header: &str, body: &str) {
        match self.entries.iter_mut().find(|(h, _)| h == header) {
            Some((_, existing)) => {
                tracing::debug!("Section '{}' seen again, keeping the later body", header);
                *existing = body.to_string();
            }
            None => self.entries.push((header.to_string(), body.to_string())),
        }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, body)| body.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, b)| (h.as_str(), b.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(h, _)| h.as_str())
    }
}

// --- Main Splitter Structure ---
pub struct SectionSplitter {
    vocabulary: HeaderVocabulary,
}

impl SectionSplitter {
    pub fn new(vocabulary: HeaderVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &HeaderVocabulary {
        &self.vocabulary
    }

    /// Partitions raw generated text into sections.
    ///
    /// Total over any input: text before the first header is dropped, unknown
    /// headers stay part of the surrounding body, and input without any recognized
    /// header yields an empty map.
    pub fn split(&self, raw: &str) -> SectionMap {
        let normalized = normalize(raw);
        let mut sections = SectionMap::new();
        let mut current: Option<(&str, Vec<&str>)> = None;

        for line in normalized.lines() {
            if let Some(header) = self.vocabulary.recognize(line) {
                if let Some((previous, body)) = current.take() {
                    sections.insert(previous, body.join("\n").trim());
                }
                current = Some((header, Vec::new()));
            } else if let Some((_, body)) = current.as_mut() {
                body.push(line);
            }
        }
        if let Some((last, body)) = current {
            sections.insert(last, body.join("\n").trim());
        }

        tracing::debug!(
            "Split {} bytes of generated text into {} sections",
            raw.len(),
            sections.len()
        );
        sections
    }
}

impl Default for SectionSplitter {
    fn default() -> Self {
        Self::new(HeaderVocabulary::default())
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_headers_yields_empty_map() {
        let splitter = SectionSplitter::default();
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("Just some prose.\nNo headers: here").is_empty());
        assert!(splitter.split("purpose:\nlowercase is not a header").is_empty());
    }

    #[test]
    fn splits_worked_example() {
        let splitter = SectionSplitter::default();
        let sections = splitter.split("Purpose:\nBuild X.\n\nScope:\n|A|B|\n|-|-|\n|1|2|\n");

        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get("Purpose"), Some("Build X."));
        assert_eq!(sections.get("Scope"), Some("|A|B|\n|-|-|\n|1|2|"));
        assert_eq!(sections.keys().collect::<Vec<_>>(), vec!["Purpose", "Scope"]);
    }

    #[test]
    fn body_runs_to_end_of_input() {
        let splitter = SectionSplitter::default();
        let sections = splitter.split("Assumptions:\n  first line  \n\n  second line\n\n\n");
        assert_eq!(sections.get("Assumptions"), Some("first line\n\nsecond line"));
    }

    #[test]
    fn markup_and_indentation_do_not_hide_headers() {
        let splitter = SectionSplitter::default();
        let raw = "Intro chatter that is dropped.\n   **Purpose:**\n\t*Build* the **thing**.\n## Item Boundary:\n  CAN bus";
        let sections = splitter.split(raw);

        assert_eq!(sections.get("Purpose"), Some("Build the thing."));
        assert_eq!(sections.get("Item Boundary"), Some("CAN bus"));
    }

    #[test]
    fn last_occurrence_wins_but_keeps_first_position() {
        let splitter = SectionSplitter::default();
        let raw = "Scope:\nold scope\nPurpose:\nthe purpose\nScope:\nnew scope";
        let sections = splitter.split(raw);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get("Scope"), Some("new scope"));
        assert_eq!(sections.keys().collect::<Vec<_>>(), vec!["Scope", "Purpose"]);
    }

    #[test]
    fn order_follows_input_not_vocabulary() {
        let splitter = SectionSplitter::default();
        let sections = splitter.split("Known Vulnerabilities:\nnone\nPurpose:\np");
        assert_eq!(
            sections.keys().collect::<Vec<_>>(),
            vec!["Known Vulnerabilities", "Purpose"]
        );
    }

    #[test]
    fn absent_sections_have_no_entry() {
        let splitter = SectionSplitter::default();
        let sections = splitter.split("Purpose:\n");
        assert_eq!(sections.get("Purpose"), Some(""));
        assert_eq!(sections.get("Scope"), None);
    }

    #[test]
    fn synonym_spelling_is_kept_as_key() {
        let splitter = SectionSplitter::default();
        let sections = splitter.split("Definitions, Acronyms, and Abbreviations:\n|A|B|");
        assert_eq!(
            sections.keys().collect::<Vec<_>>(),
            vec!["Definitions, Acronyms, and Abbreviations"]
        );
    }

    #[test]
    fn normalize_is_stable() {
        let raw = "  **Purpose:**  \r\n\t# body #\n";
        let once = normalize(raw);
        assert_eq!(once, "Purpose:\nbody");
        assert_eq!(normalize(&once), once);
    }
}
