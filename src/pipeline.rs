// src/pipeline.rs
use crate::extractors::header::HeaderVocabulary;
use crate::extractors::section::SectionSplitter;
use crate::generation::client::TextGenerator;
use crate::generation::prompts::{PromptTemplate, PART_ONE, PART_TWO};
use crate::report::assembler::{DocumentAssembler, FrontMatter};
use crate::report::docx::DocxRenderer;
use crate::report::revisions::{load_revisions, RevisionRecord};
use crate::storage::ArtifactStore;
use crate::utils::AppError;
use std::path::PathBuf;

/// Where a finished report ended up and which sections made it in.
#[derive(Debug, Clone)]
pub struct StoredReport {
    pub path: PathBuf,
    pub sections: Vec<String>,
}

/// Joins the two generation halves with a blank line between them.
pub fn combine(first: &str, second: &str) -> String {
    format!("{}\n\n{}", first, second)
}

/// Subject in, stored document out.
///
/// Generation, splitting, assembly and rendering run strictly in sequence. The
/// store is a single fixed location, so callers serving concurrent requests must
/// serialize calls to [`ReportPipeline::generate`].
pub struct ReportPipeline<G> {
    generator: G,
    prompts: [PromptTemplate; 2],
    splitter: SectionSplitter,
    assembler: DocumentAssembler,
    renderer: DocxRenderer,
    store: ArtifactStore,
    revisions: Option<PathBuf>,
    debug: bool,
}

impl<G: TextGenerator> ReportPipeline<G> {
    pub fn new(
        generator: G,
        vocabulary: HeaderVocabulary,
        front_matter: FrontMatter,
        store: ArtifactStore,
    ) -> Self {
        Self {
            generator,
            prompts: [PART_ONE, PART_TWO],
            splitter: SectionSplitter::new(vocabulary),
            assembler: DocumentAssembler::new(front_matter),
            renderer: DocxRenderer::new(),
            store,
            revisions: None,
            debug: false,
        }
    }

    pub fn with_revisions(mut self, revisions: Option<PathBuf>) -> Self {
        self.revisions = revisions;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Runs both generation prompts for `subject`, then renders and stores the report.
    /// Any generation failure aborts the whole request; nothing is retried.
    pub async fn generate(&self, subject: &str) -> Result<StoredReport, AppError> {
        let raw = self.generate_text(subject).await?;
        self.render_raw(subject.trim(), &raw)
    }

    /// Runs both generation prompts for `subject` and returns the combined text.
    pub async fn generate_text(&self, subject: &str) -> Result<String, AppError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(AppError::Config("subject must not be empty".to_string()));
        }

        tracing::info!("Generating report for '{}'; this can take several minutes", subject);
        let [first_prompt, second_prompt] = &self.prompts;

        let first = self.generator.generate(&first_prompt.render(subject)).await?;
        tracing::info!("First generation part complete ({} bytes)", first.len());
        let second = self.generator.generate(&second_prompt.render(subject)).await?;
        tracing::info!("Second generation part complete ({} bytes)", second.len());

        Ok(combine(&first, &second))
    }

    /// Builds and stores the report from already generated text.
    ///
    /// Synchronous: file reads, docx packing and writes all block. Async callers
    /// that share a runtime should run it under `tokio::task::spawn_blocking`.
    pub fn render_raw(&self, subject: &str, raw: &str) -> Result<StoredReport, AppError> {
        if self.debug {
            self.store.save_raw(raw)?;
        }

        let sections = self.splitter.split(raw);
        if sections.is_empty() {
            tracing::warn!("No recognized section headers in generated text; document will have no body");
        }
        for (header, body) in sections.iter() {
            let canonical = self.splitter.vocabulary().canonical(header).unwrap_or(header);
            tracing::debug!("Section '{}' (as '{}'): {} bytes", canonical, header, body.len());
        }

        let revisions = self.load_revisions()?;
        let plan = self.assembler.assemble(subject, &revisions, &sections);
        let bytes = self.renderer.render(&plan)?;

        let section_names: Vec<String> = sections.keys().map(str::to_string).collect();
        let path = self.store.save_document(&bytes)?;
        self.store.save_metadata(subject, &section_names, bytes.len())?;

        tracing::info!(
            "Report for '{}' stored at {} with {} sections",
            subject,
            path.display(),
            section_names.len()
        );
        Ok(StoredReport {
            path,
            sections: section_names,
        })
    }

    fn load_revisions(&self) -> Result<Vec<RevisionRecord>, AppError> {
        match &self.revisions {
            Some(path) => Ok(load_revisions(path)?),
            None => {
                tracing::debug!("No revision source configured; review history will be empty");
                Ok(Vec::new())
            }
        }
    }
}
