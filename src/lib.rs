#![doc = include_str!("../README.md")]
#![deny(missing_docs, unsafe_code)]

pub mod ast;
mod convert;
pub mod error;
pub mod locate;
pub mod processor;
pub mod source;
pub mod span;

pub use ast::Node;
pub use convert::{Converter, Nodes};
pub use error::ProcessorError;
pub use processor::{AsciidocProcessor, DocumentLoader, JsonTreeLoader, ProcessedDocument};

use source::SourceDocument;

/// Convert an external document tree into the output AST.
///
/// `source` is the raw text `document` was parsed from. Returns the
/// empty-document sentinel when no node could be located.
#[must_use]
pub fn convert<'a>(source: &'a str, document: &'a SourceDocument) -> Node<'a> {
    Converter::new(source).convert(document)
}
