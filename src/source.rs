//! The external document tree handed to the converter.
//!
//! An AsciiDoc processor (Asciidoctor with `sourcemap` enabled, or anything
//! that can dump the same shape) does the actual grammar work and yields a
//! tree of typed blocks. Each block exposes a `context` tag, a best-effort
//! 1-based starting line, and only the fields its kind actually carries.
//!
//! The tree deserializes from JSON with the `context` tag selecting the
//! variant:
//!
//! ```json
//! { "header": { "title": "Guide", "level": 0 },
//!   "blocks": [ { "context": "paragraph", "lineno": 3,
//!                 "source": "Hello", "lines": ["Hello"] } ] }
//! ```
//!
//! Contexts the converter does not know deserialize to
//! [`SourceBlock::Unsupported`] instead of failing.

use serde::Deserialize;

/// A parsed document as reported by the external processor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SourceDocument {
    /// The document header, when the document has a title.
    #[serde(default)]
    pub header: Option<DocumentHeader>,
    /// Top-level blocks in document order.
    #[serde(default)]
    pub blocks: Vec<SourceBlock>,
}

/// The document title line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentHeader {
    /// Title text.
    pub title: String,
    /// Heading level; `0` for a document title.
    #[serde(default)]
    pub level: usize,
}

/// One block of the external tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "context", rename_all = "snake_case")]
pub enum SourceBlock {
    /// `section`: a titled section with nested blocks.
    Section(Section),
    /// `paragraph` or `literal`: text located line by line.
    #[serde(alias = "literal")]
    Paragraph(Paragraph),
    /// `listing`: a code block whose `//` lines are content.
    Listing(Listing),
    /// `ulist` or `olist`.
    #[serde(rename = "ulist", alias = "olist")]
    List(List),
    /// `list_item`: also used for description list terms.
    ListItem(ListItem),
    /// `dlist`: a description list.
    #[serde(rename = "dlist")]
    DescriptionList(DescriptionList),
    /// `quote`.
    Quote(Compound),
    /// `admonition` or `example`: blocks spliced into the parent.
    #[serde(alias = "example")]
    Admonition(Compound),
    /// `table`.
    Table(Table),
    /// Any other context; produces no output.
    #[serde(other)]
    Unsupported,
}

impl SourceBlock {
    /// The best-effort starting line reported by the processor.
    #[must_use]
    pub fn lineno(&self) -> Option<usize> {
        match self {
            Self::Section(b) => b.lineno,
            Self::Paragraph(b) => b.lineno,
            Self::Listing(b) => b.lineno,
            Self::List(b) => b.lineno,
            Self::ListItem(b) => b.lineno,
            Self::DescriptionList(b) => b.lineno,
            Self::Quote(b) | Self::Admonition(b) => b.lineno,
            Self::Table(b) => b.lineno,
            Self::Unsupported => None,
        }
    }

    /// The `context` tag this block was read from.
    #[must_use]
    pub fn context(&self) -> &'static str {
        match self {
            Self::Section(_) => "section",
            Self::Paragraph(_) => "paragraph",
            Self::Listing(_) => "listing",
            Self::List(_) => "ulist",
            Self::ListItem(_) => "list_item",
            Self::DescriptionList(_) => "dlist",
            Self::Quote(_) => "quote",
            Self::Admonition(_) => "admonition",
            Self::Table(_) => "table",
            Self::Unsupported => "unsupported",
        }
    }
}

/// A section: title plus nested blocks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    /// Starting line hint.
    #[serde(default)]
    pub lineno: Option<usize>,
    /// Section title text.
    pub title: String,
    /// Section level (`1` for `==`).
    #[serde(default)]
    pub level: usize,
    /// Nested blocks.
    #[serde(default)]
    pub blocks: Vec<SourceBlock>,
}

/// A paragraph or literal paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Paragraph {
    /// Starting line hint.
    #[serde(default)]
    pub lineno: Option<usize>,
    /// The block text as the processor reports it.
    pub source: String,
    /// The block text split into its physical lines.
    pub lines: Vec<String>,
}

/// A listing block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Listing {
    /// Starting line hint.
    #[serde(default)]
    pub lineno: Option<usize>,
    /// The block content.
    pub source: String,
    /// The block content split into its physical lines.
    pub lines: Vec<String>,
    /// The `language` attribute, if any.
    #[serde(default)]
    pub language: Option<String>,
}

/// An ordered or unordered list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct List {
    /// Starting line hint.
    #[serde(default)]
    pub lineno: Option<usize>,
    /// The list items.
    #[serde(default)]
    pub blocks: Vec<SourceBlock>,
}

/// A list item, description list term, or description.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ListItem {
    /// Starting line hint.
    #[serde(default)]
    pub lineno: Option<usize>,
    /// The item's own text, without marker or checkbox.
    #[serde(default)]
    pub text: Option<String>,
    /// Attached blocks (nested lists, continuations).
    #[serde(default)]
    pub blocks: Vec<SourceBlock>,
}

/// A description list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DescriptionList {
    /// Starting line hint.
    #[serde(default)]
    pub lineno: Option<usize>,
    /// Entries in document order.
    #[serde(default)]
    pub items: Vec<DescriptionEntry>,
}

/// One description list entry: one or more terms and an optional description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DescriptionEntry {
    /// The terms.
    pub terms: Vec<ListItem>,
    /// The description.
    #[serde(default)]
    pub description: Option<ListItem>,
}

/// A block that only wraps other blocks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Compound {
    /// Starting line hint.
    #[serde(default)]
    pub lineno: Option<usize>,
    /// Nested blocks.
    #[serde(default)]
    pub blocks: Vec<SourceBlock>,
}

/// A table; only body rows are converted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Table {
    /// Starting line hint.
    #[serde(default)]
    pub lineno: Option<usize>,
    /// Body rows, each an ordered list of cells.
    #[serde(default)]
    pub rows: Vec<Vec<TableCell>>,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TableCell {
    /// Starting line hint.
    #[serde(default)]
    pub lineno: Option<usize>,
    /// Cell text.
    #[serde(default)]
    pub text: String,
    /// Cell style; `"asciidoc"` marks nested markup.
    #[serde(default)]
    pub style: Option<String>,
    /// The embedded document of a nested-markup cell.
    #[serde(default)]
    pub inner_document: Option<SourceDocument>,
}

impl TableCell {
    /// Whether the cell content is itself AsciiDoc.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.style.as_deref() == Some("asciidoc")
    }
}
