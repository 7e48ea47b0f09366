//! Types for the suffix tree arena
//!
//! Vertices live in a flat arena (`Vec<Vertex>`) and reference each other
//! through `VertexId` indices instead of pointers, so the cyclic link
//! structure (parent links, suffix links, the leaf chain) needs no shared
//! ownership.

use serde::{Deserialize, Serialize};

/// A single element of the indexed sequence.
pub type Symbol = u32;

/// Index of a vertex in the tree arena.
pub type VertexId = u32;

/// Absent-vertex sentinel for optional links.
pub(crate) const NO_VERTEX: VertexId = VertexId::MAX;

/// The root always occupies the first arena slot.
pub(crate) const ROOT: VertexId = 0;

/// Edge-length sentinel marking an open leaf edge. An open edge has no
/// fixed end; it implicitly extends to the end of the currently built
/// sequence, which is what lets construction avoid rewriting every leaf
/// on every extension.
pub(crate) const OPEN: u32 = u32::MAX;

/// Symbols as they appear on edges: the whole `Symbol` range widened by
/// one out-of-band value, the virtual end mark appended after the last
/// real symbol. The end mark never equals a caller-supplied symbol, so
/// every suffix ends at its own explicit leaf without reserving any real
/// symbol value.
pub(crate) type EdgeSymbol = u64;

/// Virtual end-of-sequence mark.
pub(crate) const END_MARK: EdgeSymbol = EdgeSymbol::MAX;

/// Longest sequence the engine accepts. Bounded so that the vertex count
/// (at most twice the sequence length plus the root) and every edge
/// offset stay addressable by `u32` with `OPEN`/`NO_VERTEX` reserved.
pub const MAX_SEQUENCE_LEN: usize = (u32::MAX / 2) as usize;

/// Edge symbol at `index`, where `index == symbols.len()` is the virtual
/// end mark.
#[inline]
pub(crate) fn edge_symbol_at(symbols: &[Symbol], index: usize) -> EdgeSymbol {
    if index == symbols.len() {
        END_MARK
    } else {
        EdgeSymbol::from(symbols[index])
    }
}

/// A vertex of the tree. Every vertex except the root doubles as the edge
/// descending into it from its parent: the edge is labeled by the run of
/// `length` symbols starting at `symbol_index` in the indexed sequence
/// (`OPEN` for leaves).
#[derive(Debug, Clone)]
pub(crate) struct Vertex {
    /// Offset into the sequence where this edge's label begins.
    pub symbol_index: u32,
    /// Number of symbols on this edge; `OPEN` for a leaf.
    pub length: u32,
    /// Cached first label symbol, part of the edge-index key.
    pub first_symbol: EdgeSymbol,
    /// Vertex this edge descends from; `NO_VERTEX` only for the root.
    pub parent: VertexId,
    /// Vertex reached by dropping the first symbol of the root path to
    /// this vertex. Set lazily during construction, internal vertices
    /// only; never materialized for the root.
    pub suffix_link: VertexId,
    /// Leaf: previous leaf in the chain. Internal: first leaf beneath.
    pub link_head: VertexId,
    /// Leaf: next leaf in the chain. Internal: last leaf beneath.
    pub link_tail: VertexId,
    /// Start index of one suffix passing through this vertex; exact for
    /// leaves, a representative descendant for internal vertices.
    pub suffix_start: u32,
}

impl Vertex {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.length == OPEN
    }

    /// Effective edge length given the current end of the built sequence.
    #[inline]
    pub fn span(&self, end: usize) -> u32 {
        if self.length == OPEN {
            end as u32 - self.symbol_index
        } else {
            self.length
        }
    }
}

/// Size summary of a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TreeStats {
    /// Length of the indexed sequence.
    pub sequence_len: usize,
    /// Total vertices in the arena, root included.
    pub vertex_count: usize,
    /// Leaves; equals `sequence_len` for any non-empty sequence.
    pub leaf_count: usize,
    /// Internal branching vertices, root excluded.
    pub internal_count: usize,
}
