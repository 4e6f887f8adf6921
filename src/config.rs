// src/config.rs
use crate::extractors::header::HeaderVocabulary;
use crate::report::assembler::FrontMatter;
use crate::utils::AppError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generates structured item-definition reports from model output
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output directory holding the generated document
    #[arg(short, long, env = "REPORT_OUTPUT_DIR", default_value = "./output", global = true)]
    pub output_dir: PathBuf,

    /// JSON file overriding the built-in header vocabulary
    #[arg(long, global = true)]
    pub vocabulary: Option<PathBuf>,

    /// JSON file overriding the fixed front matter
    #[arg(long, global = true)]
    pub front_matter: Option<PathBuf>,

    /// Logo image placed at the top of the document
    #[arg(long, env = "REPORT_LOGO", global = true)]
    pub logo: Option<PathBuf>,

    /// Leave the logo out entirely
    #[arg(long, global = true, conflicts_with = "logo")]
    pub no_logo: bool,

    /// Revision history source (.xlsx, .xls, .ods or .csv)
    #[arg(long, env = "REPORT_REVISIONS", global = true)]
    pub revisions: Option<PathBuf>,

    /// Debug mode - verbose logging and raw generated text saved next to the document
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub generator: GeneratorSettings,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings for the text-generation service.
#[derive(clap::Args, Debug, Clone)]
pub struct GeneratorSettings {
    /// Base URL of the Ollama server
    #[arg(long, env = "OLLAMA_URL", default_value = "http://localhost:11434", global = true)]
    pub ollama_url: String,

    /// Model used for generation
    #[arg(long, env = "OLLAMA_MODEL", default_value = "wizardlm2", global = true)]
    pub model: String,

    /// Per-request timeout in seconds (unbounded when unset)
    #[arg(long, env = "GENERATION_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a report for a subject and store it in the output directory
    Generate {
        /// The item the report is about
        #[arg(short, long)]
        subject: String,
    },
    /// Build a report from previously generated raw text, without calling the model
    Render {
        /// The item the report is about
        #[arg(short, long)]
        subject: String,

        /// File holding the raw generated text
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Serve the web form for generating and downloading reports
    Serve {
        /// Address to listen on
        #[arg(long, env = "REPORT_BIND", default_value = "127.0.0.1:5000")]
        bind: String,
    },
}

impl Args {
    pub fn load_vocabulary(&self) -> Result<HeaderVocabulary, AppError> {
        match &self.vocabulary {
            Some(path) => Ok(HeaderVocabulary::from_json_file(path)?),
            None => Ok(HeaderVocabulary::default()),
        }
    }

    /// Front matter from file (or defaults), with the logo flags applied on top.
    pub fn load_front_matter(&self) -> Result<FrontMatter, AppError> {
        let mut front_matter = match &self.front_matter {
            Some(path) => FrontMatter::from_json_file(path)?,
            None => FrontMatter::default(),
        };

        if self.no_logo {
            front_matter.logo = None;
        } else if let Some(logo) = &self.logo {
            front_matter.logo = Some(logo.clone());
        }
        Ok(front_matter)
    }
}
