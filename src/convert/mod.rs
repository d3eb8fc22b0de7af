//! Conversion of the external document tree into the output AST.
//!
//! Each external block maps to zero, one, or several output nodes. Leaf-bearing
//! blocks are located with [`find_location`]; containers take the union of
//! their children's spans. A block whose text cannot be re-found is dropped
//! together with its subtree, and a container left without children is
//! dropped as well.
//!
//! # Windows
//!
//! Ordinary block sequences narrow each sibling's search window to
//! `[own line, next sibling's line]`. Lists, quotes, admonitions and tables
//! keep the parent's upper bound for their contents, since the line hints of
//! those constructs are not reliable enough to close a window on. Each of
//! their blocks still starts its search at its own line.

mod assemble;
mod table;

use smallvec::{SmallVec, smallvec};

use crate::ast::{Node, NodeKind};
use crate::locate::{Window, find_location};
use crate::source::{
    DescriptionList, ListItem, Listing, Paragraph, Section, SourceBlock, SourceDocument,
};
use crate::span::SourceIndex;

/// The result of converting one external block.
pub type Nodes<'a> = SmallVec<[Node<'a>; 1]>;

/// How sibling windows are derived from the parent window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Narrowing {
    /// Bound each sibling by its own line hint and the next sibling's.
    Siblings,
    /// Start each sibling at its own line hint; keep the parent's upper bound.
    Inherit,
}

/// Move `window` down to `line`, never above the parent's first line.
///
/// Moving to a new line also resets the start column.
fn pinned(window: Window, line: Option<usize>) -> Window {
    match line {
        Some(line) if line > window.min => window.starting_at(line).from_column(0),
        _ => window,
    }
}

/// Converts one document; owns that document's [`SourceIndex`].
#[derive(Debug, Clone)]
pub struct Converter<'a> {
    index: SourceIndex<'a>,
}

impl<'a> Converter<'a> {
    /// Index `source` for a single conversion.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            index: SourceIndex::new(source),
        }
    }

    /// The line index of the source being converted.
    #[must_use]
    pub fn index(&self) -> &SourceIndex<'a> {
        &self.index
    }

    /// Convert `document`, returning the root node or the empty-document
    /// sentinel when nothing could be located.
    #[must_use]
    pub fn convert(&self, document: &'a SourceDocument) -> Node<'a> {
        let window = Window::new(1, self.index.line_count());
        self.convert_document(document, window)
            .unwrap_or_else(Node::empty_document)
    }

    fn convert_document(&self, document: &'a SourceDocument, window: Window) -> Option<Node<'a>> {
        let mut children = Vec::with_capacity(document.blocks.len() + 1);
        if let Some(header) = &document.header {
            children.extend(self.header(&header.title, header.level, window));
        }
        children.extend(self.convert_blocks(&document.blocks, window, Narrowing::Siblings));
        assemble::spanning(NodeKind::Document, children, &self.index)
    }

    /// Convert a sibling sequence, concatenating every block's output.
    fn convert_blocks(
        &self,
        blocks: &'a [SourceBlock],
        window: Window,
        narrowing: Narrowing,
    ) -> Vec<Node<'a>> {
        let mut nodes = Vec::with_capacity(blocks.len());
        for (i, block) in blocks.iter().enumerate() {
            let window = match narrowing {
                Narrowing::Inherit => pinned(window, block.lineno()),
                Narrowing::Siblings => {
                    let mut narrowed = window;
                    if let Some(line) = block.lineno()
                        && line != narrowed.min
                    {
                        narrowed = narrowed.starting_at(line).from_column(0);
                    }
                    if let Some(next) = blocks.get(i + 1).and_then(SourceBlock::lineno) {
                        narrowed = narrowed.ending_at(next);
                    }
                    narrowed
                }
            };
            nodes.extend(self.convert_block(block, window));
        }
        nodes
    }

    fn convert_block(&self, block: &'a SourceBlock, window: Window) -> Nodes<'a> {
        match block {
            SourceBlock::Section(section) => self.convert_section(section, window),
            SourceBlock::Paragraph(paragraph) => {
                self.convert_paragraph(paragraph, window).into_iter().collect()
            }
            SourceBlock::Listing(listing) => {
                self.convert_listing(listing, window).into_iter().collect()
            }
            SourceBlock::List(list) => {
                let items = self.convert_blocks(&list.blocks, window, Narrowing::Inherit);
                assemble::synthetic(NodeKind::List, items, &self.index)
                    .into_iter()
                    .collect()
            }
            SourceBlock::ListItem(item) => {
                self.convert_list_item(item, window).into_iter().collect()
            }
            SourceBlock::DescriptionList(list) => {
                self.convert_description_list(list, window).into_iter().collect()
            }
            SourceBlock::Quote(quote) => {
                let children = self.convert_blocks(&quote.blocks, window, Narrowing::Inherit);
                assemble::synthetic(NodeKind::BlockQuote, children, &self.index)
                    .into_iter()
                    .collect()
            }
            SourceBlock::Admonition(compound) => SmallVec::from_vec(self.convert_blocks(
                &compound.blocks,
                window,
                Narrowing::Inherit,
            )),
            SourceBlock::Table(table) => self.convert_table(table, window).into_iter().collect(),
            SourceBlock::Unsupported => {
                tracing::trace!("skipping unsupported block");
                Nodes::new()
            }
        }
    }

    /// A `Header` wrapping one `Str` of the title.
    fn header(&self, title: &'a str, level: usize, window: Window) -> Option<Node<'a>> {
        let kind = NodeKind::Header {
            depth: level.saturating_add(1),
        };
        self.locate_text(kind, title, &[title], window)
    }

    /// Locate `lines` and wrap `value` as the single `Str` child of `kind`.
    fn locate_text(
        &self,
        kind: NodeKind<'a>,
        value: &'a str,
        lines: &[&str],
        window: Window,
    ) -> Option<Node<'a>> {
        match find_location(&self.index, lines, window) {
            Some(loc) => Some(assemble::text(kind, value, loc, &self.index)),
            None => {
                dropped(&kind, window);
                None
            }
        }
    }

    fn convert_section(&self, section: &'a Section, window: Window) -> Nodes<'a> {
        let Some(header) = self.header(&section.title, section.level, window) else {
            return Nodes::new();
        };
        let mut nodes: Nodes<'a> = smallvec![header];
        nodes.extend(self.convert_blocks(&section.blocks, window, Narrowing::Siblings));
        nodes
    }

    fn convert_paragraph(&self, paragraph: &'a Paragraph, window: Window) -> Option<Node<'a>> {
        let lines: Vec<&str> = paragraph.lines.iter().map(String::as_str).collect();
        self.locate_text(NodeKind::Paragraph, &paragraph.source, &lines, window)
    }

    fn convert_listing(&self, listing: &'a Listing, window: Window) -> Option<Node<'a>> {
        let kind = NodeKind::CodeBlock {
            lang: listing.language.as_deref(),
            value: &listing.source,
        };
        let lines: Vec<&str> = listing.lines.iter().map(String::as_str).collect();
        let window = window.verbatim();
        let Some(loc) = find_location(&self.index, &lines, window) else {
            dropped(&kind, window);
            return None;
        };
        Some(Node {
            kind,
            children: Vec::new(),
            range: self.index.location_to_range(&loc),
            raw: self.index.slice(&loc),
            loc,
        })
    }

    /// An item's own text becomes an inline paragraph ahead of its blocks.
    fn convert_list_item(&self, item: &'a ListItem, window: Window) -> Option<Node<'a>> {
        let mut children = Vec::with_capacity(item.blocks.len() + 1);
        if let Some(text) = item.text.as_deref().filter(|text| !text.is_empty()) {
            let lines: Vec<&str> = text.split('\n').collect();
            children.extend(self.locate_text(NodeKind::Paragraph, text, &lines, window));
        }
        children.extend(self.convert_blocks(&item.blocks, window, Narrowing::Inherit));
        assemble::sorted(NodeKind::ListItem, children, &self.index)
    }

    /// Terms and descriptions are flattened into one list of items.
    fn convert_description_list(
        &self,
        list: &'a DescriptionList,
        window: Window,
    ) -> Option<Node<'a>> {
        let children = list
            .items
            .iter()
            .flat_map(|entry| entry.terms.iter().chain(entry.description.as_ref()))
            .filter_map(|item| self.convert_list_item(item, pinned(window, item.lineno)))
            .collect();
        assemble::synthetic(NodeKind::List, children, &self.index)
    }
}

fn dropped(kind: &NodeKind<'_>, window: Window) {
    tracing::debug!(
        kind = kind.name(),
        min = window.min,
        max = window.max,
        "dropping node: location not recovered"
    );
}
