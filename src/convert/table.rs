//! Tables: one `TableRow` per body row, one `TableCell` per cell.
//!
//! Cells on the same physical line are searched left to right, each starting
//! at the end column of its left neighbour so that short cell text cannot
//! match inside the previous cell.

use super::{Converter, Narrowing, assemble};
use crate::ast::{Node, NodeKind};
use crate::locate::Window;
use crate::source::{Table, TableCell};

impl<'a> Converter<'a> {
    pub(super) fn convert_table(&self, table: &'a Table, window: Window) -> Option<Node<'a>> {
        let rows = table
            .rows
            .iter()
            .filter_map(|row| {
                // Pin the row to its first cell's line so that a row is never
                // found as a substring of an earlier row.
                let window = match row.first().and_then(|cell| cell.lineno) {
                    Some(line) => window.starting_at(line),
                    None => window,
                };
                self.convert_row(row, window)
            })
            .collect();
        assemble::synthetic(NodeKind::Table, rows, self.index())
    }

    fn convert_row(&self, row: &'a [TableCell], window: Window) -> Option<Node<'a>> {
        let mut cells: Vec<Node<'a>> = Vec::with_capacity(row.len());
        for cell in row {
            let mut cell_window = window.from_column(0);
            if let Some(line) = cell.lineno {
                cell_window = cell_window.starting_at(line);
            }
            if let Some(left) = cells.last()
                && left.loc.end.line == cell_window.min
            {
                cell_window = cell_window.from_column(left.loc.end.column);
            }
            cells.extend(self.convert_cell(cell, cell_window));
        }
        assemble::synthetic(NodeKind::TableRow, cells, self.index())
    }

    fn convert_cell(&self, cell: &'a TableCell, window: Window) -> Option<Node<'a>> {
        if cell.is_nested() {
            let children = cell
                .inner_document
                .as_ref()
                .map(|inner| self.convert_blocks(&inner.blocks, window, Narrowing::Siblings))
                .unwrap_or_default();
            return assemble::synthetic(NodeKind::TableCell, children, self.index());
        }
        let lines: Vec<&str> = cell.text.split('\n').collect();
        self.locate_text(NodeKind::TableCell, &cell.text, &lines, window)
    }
}
