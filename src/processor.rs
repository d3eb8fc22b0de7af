//! Host plugin boundary.
//!
//! A linting host recognises AsciiDoc files by extension, calls
//! [`AsciidocProcessor::pre_process`] to obtain the AST for a file, and hands
//! its diagnostics back through [`AsciidocProcessor::post_process`].
//!
//! The grammar work is delegated to a [`DocumentLoader`]; the processor only
//! ties the loaded tree to its source text and converts it.

use std::path::Path;

use serde::Deserialize;

use crate::ast::Node;
use crate::error::{ProcessorError, Result};
use crate::source::SourceDocument;

/// Extensions recognised when no configuration overrides them.
pub const DEFAULT_EXTENSIONS: [&str; 4] = [".adoc", ".asciidoc", ".asc", ".asciidoctor"];

/// Path reported by [`AsciidocProcessor::post_process`] when the host gives none.
pub const FALLBACK_PATH: &str = "<asciidoc>";

/// Processor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessorConfig {
    /// File extensions (with leading dot) this processor handles.
    pub extensions: Vec<String>,
    /// Path reported for diagnostics that carry no file path.
    pub fallback_path: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            fallback_path: FALLBACK_PATH.to_string(),
        }
    }
}

impl ProcessorConfig {
    /// Read a configuration from JSON; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Produces the external document tree for a source text.
pub trait DocumentLoader {
    /// Parse `text` into the external tree.
    fn load(&self, text: &str) -> Result<SourceDocument>;
}

impl<F> DocumentLoader for F
where
    F: Fn(&str) -> Result<SourceDocument>,
{
    fn load(&self, text: &str) -> Result<SourceDocument> {
        self(text)
    }
}

/// A loader serving a tree that was dumped to JSON ahead of time.
#[derive(Debug, Clone)]
pub struct JsonTreeLoader {
    tree: SourceDocument,
}

impl JsonTreeLoader {
    /// Parse the dumped tree.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            tree: serde_json::from_str(json)?,
        })
    }
}

impl DocumentLoader for JsonTreeLoader {
    fn load(&self, _text: &str) -> Result<SourceDocument> {
        Ok(self.tree.clone())
    }
}

/// Source text and the tree loaded from it.
#[derive(Debug)]
pub struct LoadedSource {
    /// The raw document text.
    pub text: String,
    /// The external tree for `text`.
    pub tree: SourceDocument,
}

mod owned {
    #![allow(missing_docs)]

    use self_cell::self_cell;

    use super::{LoadedSource, Node};

    self_cell! {
        /// A converted document that owns its source text and external tree.
        pub struct ProcessedDocument {
            owner: LoadedSource,

            #[covariant]
            dependent: Node,
        }

        impl {Debug}
    }
}

pub use owned::ProcessedDocument;

impl ProcessedDocument {
    /// Convert `tree` against `text`.
    #[must_use]
    pub fn convert(text: String, tree: SourceDocument) -> Self {
        Self::new(LoadedSource { text, tree }, |loaded| {
            crate::convert(&loaded.text, &loaded.tree)
        })
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &Node<'_> {
        self.borrow_dependent()
    }

    /// The source text the AST points into.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.borrow_owner().text
    }
}

/// Diagnostics handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProcessed<M> {
    /// The host's messages, unchanged.
    pub messages: Vec<M>,
    /// The file path, or the fallback path.
    pub file_path: String,
}

/// The AsciiDoc processor registered with a linting host.
#[derive(Debug, Clone)]
pub struct AsciidocProcessor<L> {
    config: ProcessorConfig,
    loader: L,
}

impl<L: DocumentLoader> AsciidocProcessor<L> {
    /// A processor using `loader` for grammar parsing.
    pub fn new(config: ProcessorConfig, loader: L) -> Self {
        Self { config, loader }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// File extensions this processor handles.
    #[must_use]
    pub fn available_extensions(&self) -> &[String] {
        &self.config.extensions
    }

    /// Whether `path` has one of the handled extensions.
    #[must_use]
    pub fn supports(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.config
            .extensions
            .iter()
            .any(|known| {
                known
                    .strip_prefix('.')
                    .unwrap_or(known)
                    .eq_ignore_ascii_case(ext)
            })
    }

    /// Load and convert `text`.
    pub fn pre_process(
        &self,
        text: String,
        file_path: Option<&Path>,
    ) -> Result<ProcessedDocument> {
        tracing::debug!(path = ?file_path, bytes = text.len(), "converting document");
        let tree = self.loader.load(&text).map_err(|err| match (err, file_path) {
            (ProcessorError::Load { message }, Some(path)) => {
                ProcessorError::load(format!("{}: {message}", path.display()))
            }
            (other, _) => other,
        })?;
        Ok(ProcessedDocument::convert(text, tree))
    }

    /// Pass `messages` through, filling in the fallback path when needed.
    pub fn post_process<M>(&self, messages: Vec<M>, file_path: Option<&str>) -> PostProcessed<M> {
        PostProcessed {
            messages,
            file_path: file_path
                .filter(|path| !path.is_empty())
                .unwrap_or(self.config.fallback_path.as_str())
                .to_string(),
        }
    }
}
