//! Built suffix tree and its primitive queries
//!
//! A `SuffixTree` indexes every substring of a borrowed symbol sequence.
//! It owns the vertex arena and the edge index but never copies the
//! sequence itself; edge labels reference it by offset, so the sequence
//! must outlive the tree. Once built the tree is immutable, and all
//! query operations take `&self`.

use anyhow::Result;

use super::builder::TreeBuilder;
use super::edges::EdgeIndex;
use super::position::{step, Position};
use super::types::{EdgeSymbol, Symbol, TreeStats, Vertex, VertexId, NO_VERTEX};

/// Suffix tree over a borrowed sequence of symbols.
pub struct SuffixTree<'a> {
    symbols: &'a [Symbol],
    vertices: Vec<Vertex>,
    edges: EdgeIndex,
    leaf_count: usize,
}

impl<'a> SuffixTree<'a> {
    /// Build the suffix tree of `symbols` in O(n) amortized time.
    ///
    /// An empty sequence builds a root-only tree. Fails only when the
    /// sequence is longer than [`MAX_SEQUENCE_LEN`]; nothing is partially
    /// built on failure.
    ///
    /// [`MAX_SEQUENCE_LEN`]: super::types::MAX_SEQUENCE_LEN
    pub fn build(symbols: &'a [Symbol]) -> Result<Self> {
        Ok(TreeBuilder::new(symbols)?.build())
    }

    pub(crate) fn from_parts(
        symbols: &'a [Symbol],
        vertices: Vec<Vertex>,
        edges: EdgeIndex,
        leaf_count: usize,
    ) -> Self {
        Self {
            symbols,
            vertices,
            edges,
            leaf_count,
        }
    }

    /// Cursor at the root, the starting point of every descent.
    #[inline]
    pub fn root_position(&self) -> Position {
        Position::root()
    }

    /// Extend `position` by one symbol. `None` means no edge continues
    /// with `symbol` from there; that is an expected outcome, not an
    /// error.
    #[inline]
    pub fn descend(&self, position: Position, symbol: Symbol) -> Option<Position> {
        step(
            &self.vertices,
            &self.edges,
            self.symbols,
            self.end(),
            position,
            EdgeSymbol::from(symbol),
        )
    }

    /// Whether `position` sits exactly at its vertex rather than partway
    /// down the edge leading into it.
    #[inline]
    pub fn is_at_vertex(&self, position: Position) -> bool {
        position.symbols_down() == self.vertices[position.vertex() as usize].span(self.end())
    }

    /// Whether `vertex` is a leaf, representing exactly one suffix.
    #[inline]
    pub fn is_leaf(&self, vertex: VertexId) -> bool {
        self.vertices[vertex as usize].is_leaf()
    }

    /// Start index of one suffix passing through `vertex`: exact for a
    /// leaf, a representative descendant otherwise.
    #[inline]
    pub fn suffix_start(&self, vertex: VertexId) -> usize {
        self.vertices[vertex as usize].suffix_start as usize
    }

    /// Invoke `on_suffix` with the start index of every suffix whose path
    /// passes through `vertex`, once each.
    ///
    /// Walks the leaf chain between the vertex's cached first and last
    /// leaves; cost is proportional to the number of suffixes emitted,
    /// not to the size of the subtree.
    pub fn for_each_suffix(&self, vertex: VertexId, mut on_suffix: impl FnMut(usize)) {
        let v = &self.vertices[vertex as usize];
        if v.is_leaf() {
            on_suffix(v.suffix_start as usize);
            return;
        }

        let mut current = v.link_head;
        if current == NO_VERTEX {
            return;
        }
        let tail = v.link_tail;
        loop {
            let leaf = &self.vertices[current as usize];
            on_suffix(leaf.suffix_start as usize);
            if current == tail {
                return;
            }
            current = leaf.link_tail;
            assert_ne!(current, NO_VERTEX, "leaf chain ended before the cached last leaf");
        }
    }

    /// Collected form of [`for_each_suffix`](Self::for_each_suffix), in
    /// chain order.
    pub fn suffix_starts(&self, vertex: VertexId) -> Vec<usize> {
        let mut starts = Vec::new();
        self.for_each_suffix(vertex, |start| starts.push(start));
        starts
    }

    /// Size summary of the tree.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            sequence_len: self.symbols.len(),
            vertex_count: self.vertices.len(),
            leaf_count: self.leaf_count,
            internal_count: self.vertices.len() - self.leaf_count - 1,
        }
    }

    /// Length of the indexed sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The indexed sequence itself.
    #[inline]
    pub fn symbols(&self) -> &'a [Symbol] {
        self.symbols
    }

    #[cfg(test)]
    pub(crate) fn vertex(&self, vertex: VertexId) -> &Vertex {
        &self.vertices[vertex as usize]
    }

    /// One past the last edge-symbol position: the virtual end mark slot
    /// for a non-empty sequence.
    #[inline]
    fn end(&self) -> usize {
        if self.symbols.is_empty() {
            0
        } else {
            self.symbols.len() + 1
        }
    }
}
