//! Output AST consumed by text-linting hosts.
//!
//! Every [`Node`] carries an exact span (`loc` and `range`) into the original
//! source plus the verbatim `raw` slice it was matched against. The JSON
//! shape produced by [`serde`] is the one linting engines expect: a `type`
//! tag, `children`, `loc`, `range`, `raw`, and kind-specific fields.

use serde::Serialize;

/// A source position: 1-based line, 0-based column (in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 0-based character column.
    pub column: usize,
}

/// A half-open source location; `end` points at the character after the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    /// First character of the node.
    pub start: Position,
    /// Character after the last character of the node.
    pub end: Position,
}

/// Absolute `[start, end]` character offsets equivalent to a [`Location`].
pub type Range = [usize; 2];

/// The kind of an output node and its kind-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind<'a> {
    /// The root node.
    Document,
    /// A document title or section title.
    Header {
        /// 1-based heading level.
        depth: usize,
    },
    /// A paragraph (also produced for list item text).
    Paragraph,
    /// An ordered, unordered or description list.
    List,
    /// One list item, term or description.
    ListItem,
    /// A quote block.
    BlockQuote,
    /// A listing (code) block.
    CodeBlock {
        /// Language tag from the block attributes.
        lang: Option<&'a str>,
        /// The block content as reported by the document processor.
        value: &'a str,
    },
    /// A table.
    Table,
    /// A table body row.
    TableRow,
    /// A table cell.
    TableCell,
    /// A text leaf.
    Str {
        /// Semantic text; may omit markup present in `raw`.
        value: &'a str,
    },
}

impl NodeKind<'_> {
    /// The `type` tag as it appears in serialized output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Header { .. } => "Header",
            Self::Paragraph => "Paragraph",
            Self::List => "List",
            Self::ListItem => "ListItem",
            Self::BlockQuote => "BlockQuote",
            Self::CodeBlock { .. } => "CodeBlock",
            Self::Table => "Table",
            Self::TableRow => "TableRow",
            Self::TableCell => "TableCell",
            Self::Str { .. } => "Str",
        }
    }
}

/// An output AST node.
///
/// `raw` is `None` for synthetic containers (lists, list items, quotes,
/// tables, rows, nested-markup cells) which have no single contiguous source
/// form of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node<'a> {
    /// Kind tag and kind-specific fields.
    #[serde(flatten)]
    pub kind: NodeKind<'a>,
    /// Child nodes in source order; empty for leaves.
    pub children: Vec<Node<'a>>,
    /// Line/column span.
    pub loc: Location,
    /// Absolute character offsets of the span.
    pub range: Range,
    /// Verbatim source slice of the span.
    pub raw: Option<&'a str>,
}

impl<'a> Node<'a> {
    /// The sentinel returned when a document has no convertible content.
    #[must_use]
    pub fn empty_document() -> Self {
        let origin = Position { line: 1, column: 0 };
        Self {
            kind: NodeKind::Document,
            children: Vec::new(),
            loc: Location {
                start: origin,
                end: origin,
            },
            range: [0, 0],
            raw: Some(""),
        }
    }

    /// Whether this node is the empty-document sentinel shape.
    #[must_use]
    pub fn is_empty_document(&self) -> bool {
        self.kind == NodeKind::Document && self.children.is_empty()
    }

    /// Depth-first, pre-order iterator over this node and its descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &Node<'a>> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}
