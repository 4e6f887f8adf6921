// src/report/mod.rs
pub mod assembler;
pub mod docx;
pub mod revisions;

#[allow(unused_imports)]
pub use assembler::{Block, DocumentAssembler, DocumentPlan, FrontMatter};
#[allow(unused_imports)]
pub use docx::DocxRenderer;
#[allow(unused_imports)]
pub use revisions::{load_revisions, RevisionRecord};
