//! Container assembly: a parent's span is the union of its children's.

use crate::ast::{Location, Node, NodeKind};
use crate::span::SourceIndex;

/// Span from the first child's start to the last child's end.
fn union(children: &[Node<'_>]) -> Option<Location> {
    let (first, last) = (children.first()?, children.last()?);
    Some(Location {
        start: first.loc.start,
        end: last.loc.end,
    })
}

/// Wrap `children` in a node with no source form of its own (`raw = None`).
///
/// Returns `None` for an empty child list; the container is not created.
pub(super) fn synthetic<'a>(
    kind: NodeKind<'a>,
    children: Vec<Node<'a>>,
    index: &SourceIndex<'a>,
) -> Option<Node<'a>> {
    let Some(loc) = union(&children) else {
        tracing::debug!(kind = kind.name(), "dropping container: no children located");
        return None;
    };
    Some(Node {
        kind,
        range: index.location_to_range(&loc),
        loc,
        children,
        raw: None,
    })
}

/// Like [`synthetic`], but first orders children by their start offset.
///
/// List items may receive their nested blocks ahead of their own text.
pub(super) fn sorted<'a>(
    kind: NodeKind<'a>,
    mut children: Vec<Node<'a>>,
    index: &SourceIndex<'a>,
) -> Option<Node<'a>> {
    children.sort_by_key(|child| child.range[0]);
    synthetic(kind, children, index)
}

/// Wrap `children` in a node whose `raw` is the source slice of the union.
pub(super) fn spanning<'a>(
    kind: NodeKind<'a>,
    children: Vec<Node<'a>>,
    index: &SourceIndex<'a>,
) -> Option<Node<'a>> {
    let loc = union(&children)?;
    Some(Node {
        kind,
        range: index.location_to_range(&loc),
        raw: index.slice(&loc),
        loc,
        children,
    })
}

/// A located leaf-bearing node: `kind` wrapping one `Str` of `value`.
pub(super) fn text<'a>(
    kind: NodeKind<'a>,
    value: &'a str,
    loc: Location,
    index: &SourceIndex<'a>,
) -> Node<'a> {
    let range = index.location_to_range(&loc);
    let raw = index.slice(&loc);
    let leaf = Node {
        kind: NodeKind::Str { value },
        children: Vec::new(),
        loc,
        range,
        raw,
    };
    Node {
        kind,
        children: vec![leaf],
        loc,
        range,
        raw,
    }
}
