// src/extractors/mod.rs
pub mod header;
pub mod section;
pub mod table;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use header::{HeaderVocabulary, SectionTitle};
#[allow(unused_imports)]
pub use section::{SectionMap, SectionSplitter};
#[allow(unused_imports)]
pub use table::{ContentEntry, TableBlock};
