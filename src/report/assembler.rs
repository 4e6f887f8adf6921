// src/report/assembler.rs
use crate::extractors::section::SectionMap;
use crate::extractors::table::ContentEntry;
use crate::report::revisions::{RevisionRecord, REVISION_COLUMNS};
use crate::utils::error::FrontMatterError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const REVIEW_HISTORY_HEADING: &str = "Review History";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// A renderer-independent unit of document content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Image {
        path: PathBuf,
        width_in: f32,
        height_in: f32,
    },
    Heading {
        text: String,
        level: u8,
    },
    Paragraph {
        text: String,
        alignment: Alignment,
    },
    /// Rectangular rows; for body tables the first row is the header row.
    Table {
        rows: Vec<Vec<String>>,
        alignment: Alignment,
    },
    PageBreak,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPlan {
    pub blocks: Vec<Block>,
}

impl DocumentPlan {
    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetadataField {
    pub key: String,
    pub value: String,
}

impl MetadataField {
    fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Fixed content placed before the generated sections.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub logo: Option<PathBuf>,
    pub logo_width_in: f32,
    pub logo_height_in: f32,
    pub title_suffix: String,
    pub metadata: Vec<MetadataField>,
    pub attribution: Vec<String>,
    pub boilerplate: Vec<String>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            logo: Some(PathBuf::from("logo.jpg")),
            logo_width_in: 1.0,
            logo_height_in: 1.0,
            title_suffix: " Automotive CyberSecurity Item Definition.".to_string(),
            metadata: vec![
                MetadataField::new("Template Ref No:", "TDACS/QSTE/RE/01"),
                MetadataField::new("Template Version:", "1.0"),
                MetadataField::new("Document No:", ""),
                MetadataField::new("Document Ver:", ""),
                MetadataField::new("Date:", "9-mar-2021"),
                MetadataField::new("Prepared by:", "AF"),
                MetadataField::new("Approved by:", "BN"),
            ],
            attribution: vec!["\nCompany Internal".to_string(), "Tata Elxsi".to_string()],
            boilerplate: vec![
                "\n\n\n\nCreated by Tata Elxsi., Quality Group\nCopyright 2021 Tata Elxsi.\nAll rights reserved.".to_string(),
                "\nThis document contains information that is proprietary to Tata Elxsi. No part of this document may be reproduced\n or used in whole or part in any form or by any means - graphic, electronic or mechanical without the\n written permission of Tata Elxsi\n".to_string(),
            ],
        }
    }
}

impl FrontMatter {
    /// Reads front matter from JSON; omitted fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, FrontMatterError> {
        let raw = std::fs::read_to_string(path)?;
        let front_matter = serde_json::from_str(&raw)?;
        tracing::debug!("Loaded front matter from {}", path.display());
        Ok(front_matter)
    }
}

pub struct DocumentAssembler {
    front_matter: FrontMatter,
}

impl DocumentAssembler {
    pub fn new(front_matter: FrontMatter) -> Self {
        Self { front_matter }
    }

    /// Lays out front matter, review history and every section in stored order.
    pub fn assemble(
        &self,
        subject: &str,
        revisions: &[RevisionRecord],
        sections: &SectionMap,
    ) -> DocumentPlan {
        let mut plan = DocumentPlan::default();

        self.push_front_matter(&mut plan, subject);
        plan.push(Block::PageBreak);
        push_revision_history(&mut plan, revisions);
        plan.push(Block::PageBreak);

        for (header, body) in sections.iter() {
            plan.push(Block::Heading {
                text: header.to_string(),
                level: 1,
            });
            match ContentEntry::classify(body) {
                ContentEntry::Prose(text) => plan.push(Block::Paragraph {
                    text,
                    alignment: Alignment::Left,
                }),
                ContentEntry::Table(table) if table.header.is_empty() => {
                    tracing::warn!(
                        "Section '{}' looks tabular but has no pipe rows; rendering heading only",
                        header
                    );
                }
                ContentEntry::Table(table) => {
                    tracing::debug!(
                        "Section '{}' rendered as {}x{} table",
                        header,
                        table.rows.len() + 1,
                        table.width()
                    );
                    let mut rows = vec![table.header.clone()];
                    rows.extend(table.fitted_rows());
                    plan.push(Block::Table {
                        rows,
                        alignment: Alignment::Center,
                    });
                }
            }
        }

        tracing::info!(
            "Assembled document plan for '{}': {} sections, {} blocks",
            subject,
            sections.len(),
            plan.blocks.len()
        );
        plan
    }

    fn push_front_matter(&self, plan: &mut DocumentPlan, subject: &str) {
        let fm = &self.front_matter;

        if let Some(logo) = &fm.logo {
            plan.push(Block::Image {
                path: logo.clone(),
                width_in: fm.logo_width_in,
                height_in: fm.logo_height_in,
            });
        }
        plan.push(Block::Heading {
            text: format!("{}{}", subject, fm.title_suffix),
            level: 2,
        });
        plan.push(Block::Table {
            rows: fm
                .metadata
                .iter()
                .map(|field| vec![field.key.clone(), field.value.clone()])
                .collect(),
            alignment: Alignment::Left,
        });
        for line in &fm.attribution {
            plan.push(Block::Paragraph {
                text: line.clone(),
                alignment: Alignment::Right,
            });
        }
        for line in &fm.boilerplate {
            plan.push(Block::Paragraph {
                text: line.clone(),
                alignment: Alignment::Center,
            });
        }
    }
}

fn push_revision_history(plan: &mut DocumentPlan, revisions: &[RevisionRecord]) {
    plan.push(Block::Heading {
        text: REVIEW_HISTORY_HEADING.to_string(),
        level: 1,
    });

    let mut rows = vec![REVISION_COLUMNS.iter().map(|c| c.to_string()).collect()];
    rows.extend(revisions.iter().map(RevisionRecord::cells));
    plan.push(Block::Table {
        rows,
        alignment: Alignment::Left,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::section::SectionSplitter;

    fn no_logo() -> FrontMatter {
        FrontMatter {
            logo: None,
            ..FrontMatter::default()
        }
    }

    fn body_blocks(plan: &DocumentPlan) -> &[Block] {
        let last_break = plan
            .blocks
            .iter()
            .rposition(|b| *b == Block::PageBreak)
            .expect("plan has page breaks");
        &plan.blocks[last_break + 1..]
    }

    #[test]
    fn front_matter_layout_is_fixed() {
        let plan = DocumentAssembler::new(FrontMatter::default()).assemble(
            "Gateway ECU",
            &[],
            &SectionMap::new(),
        );

        assert!(matches!(plan.blocks[0], Block::Image { .. }));
        assert_eq!(
            plan.blocks[1],
            Block::Heading {
                text: "Gateway ECU Automotive CyberSecurity Item Definition.".to_string(),
                level: 2
            }
        );
        match &plan.blocks[2] {
            Block::Table { rows, .. } => {
                assert_eq!(rows.len(), 7);
                assert_eq!(rows[0], vec!["Template Ref No:", "TDACS/QSTE/RE/01"]);
                assert_eq!(rows[6][0], "Approved by:");
            }
            other => panic!("expected metadata table, got {:?}", other),
        }
        let alignments: Vec<Alignment> = plan.blocks[3..7]
            .iter()
            .map(|b| match b {
                Block::Paragraph { alignment, .. } => *alignment,
                other => panic!("expected paragraph, got {:?}", other),
            })
            .collect();
        assert_eq!(
            alignments,
            vec![Alignment::Right, Alignment::Right, Alignment::Center, Alignment::Center]
        );
        assert_eq!(plan.blocks[7], Block::PageBreak);
    }

    #[test]
    fn revision_history_lists_every_record() {
        let revisions = vec![
            RevisionRecord {
                revision: "1".into(),
                date: "2021-03-09".into(),
                author: "AF".into(),
                approver: "BN".into(),
                description: "Initial".into(),
            },
            RevisionRecord::default(),
        ];
        let plan = DocumentAssembler::new(no_logo()).assemble("X", &revisions, &SectionMap::new());

        let heading_at = plan
            .blocks
            .iter()
            .position(|b| matches!(b, Block::Heading { text, .. } if text == REVIEW_HISTORY_HEADING))
            .unwrap();
        match &plan.blocks[heading_at + 1] {
            Block::Table { rows, .. } => {
                assert_eq!(rows.len(), 3);
                assert_eq!(rows[0][3], "Reviewed/Approved by");
                assert_eq!(rows[1], vec!["1", "2021-03-09", "AF", "BN", "Initial"]);
                assert!(rows.iter().all(|r| r.len() == 5));
            }
            other => panic!("expected revision table, got {:?}", other),
        }
        assert_eq!(plan.blocks[heading_at + 2], Block::PageBreak);
    }

    #[test]
    fn empty_section_map_leaves_no_body() {
        let plan = DocumentAssembler::new(no_logo()).assemble("X", &[], &SectionMap::new());
        assert!(body_blocks(&plan).is_empty());
        assert_eq!(plan.blocks.last(), Some(&Block::PageBreak));
    }

    #[test]
    fn sections_render_as_paragraph_or_table_in_order() {
        let sections = SectionSplitter::default()
            .split("Purpose:\nBuild X.\n\nScope:\n|A|B|\n|-|-|\n|1|2|\n");
        let plan = DocumentAssembler::new(no_logo()).assemble("X", &[], &sections);

        assert_eq!(
            body_blocks(&plan),
            &[
                Block::Heading {
                    text: "Purpose".into(),
                    level: 1
                },
                Block::Paragraph {
                    text: "Build X.".into(),
                    alignment: Alignment::Left
                },
                Block::Heading {
                    text: "Scope".into(),
                    level: 1
                },
                Block::Table {
                    rows: vec![vec!["A".into(), "B".into()], vec!["1".into(), "2".into()]],
                    alignment: Alignment::Center
                },
            ]
        );
    }

    #[test]
    fn pipeless_body_is_always_one_paragraph() {
        let sections = SectionSplitter::default()
            .split("Assumptions:\n- enclosure is tamper proof\n- PKI is managed\n\nsecond paragraph");
        let plan = DocumentAssembler::new(no_logo()).assemble("X", &[], &sections);

        let body = body_blocks(&plan);
        assert_eq!(body.len(), 2);
        assert_eq!(
            body[1],
            Block::Paragraph {
                text: "- enclosure is tamper proof\n- PKI is managed\n\nsecond paragraph".into(),
                alignment: Alignment::Left
            }
        );
    }

    #[test]
    fn stray_pipe_without_rows_renders_heading_only() {
        let sections = SectionSplitter::default().split("Scope:\nIn scope: A | B\nPurpose:\np");
        let plan = DocumentAssembler::new(no_logo()).assemble("X", &[], &sections);

        let body = body_blocks(&plan);
        assert_eq!(plan.headings().filter(|h| *h == "Scope").count(), 1);
        assert!(matches!(&body[0], Block::Heading { text, .. } if text == "Scope"));
        assert!(matches!(&body[1], Block::Heading { text, .. } if text == "Purpose"));
    }

    #[test]
    fn ragged_rows_are_fitted_to_header_width() {
        let sections = SectionSplitter::default().split("Scope:\n|A|B|\n|-|-|\n|1|2|3|\n|4|");
        let plan = DocumentAssembler::new(no_logo()).assemble("X", &[], &sections);

        match &body_blocks(&plan)[1] {
            Block::Table { rows, .. } => {
                assert!(rows.iter().all(|r| r.len() == 2));
                assert_eq!(rows[2], vec!["4".to_string(), String::new()]);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn front_matter_json_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.json");
        std::fs::write(
            &path,
            r#"{"logo": null, "title_suffix": " Item Definition", "attribution": ["Internal"]}"#,
        )
        .unwrap();

        let fm = FrontMatter::from_json_file(&path).unwrap();
        assert_eq!(fm.logo, None);
        assert_eq!(fm.title_suffix, " Item Definition");
        assert_eq!(fm.attribution, vec!["Internal".to_string()]);
        assert_eq!(fm.metadata.len(), 7);
    }

    #[test]
    fn front_matter_file_errors_keep_their_cause() {
        let dir = tempfile::tempdir().unwrap();

        let missing = FrontMatter::from_json_file(&dir.path().join("absent.json"));
        assert!(matches!(missing, Err(FrontMatterError::Io(_))));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"logo": "#).unwrap();
        let broken = FrontMatter::from_json_file(&path);
        assert!(matches!(broken, Err(FrontMatterError::Format(_))));
    }
}
