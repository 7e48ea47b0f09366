//! Suffix tree construction
//!
//! Ukkonen's online algorithm, run to completion over a sequence that is
//! fully known up front. One phase per prefix length keeps the tree a
//! suffix tree of the prefix seen so far: leaf edges are open-ended and
//! grow for free, and each phase only does explicit work for the suffixes
//! that are not yet backed by a leaf. Suffix links let a phase relocate
//! between consecutive suffixes without re-walking from the root, which
//! bounds total construction work to O(n) amortized.
//!
//! A final phase runs on a virtual end mark that matches no real symbol,
//! so every suffix of the input ends at its own explicit leaf. The empty
//! suffix is not materialized.

use anyhow::{bail, Result};
use tracing::debug;

use super::edges::EdgeIndex;
use super::position::{step, Position};
use super::suffix_tree::SuffixTree;
use super::types::{
    edge_symbol_at, EdgeSymbol, Symbol, Vertex, VertexId, MAX_SEQUENCE_LEN, NO_VERTEX, OPEN, ROOT,
};

/// Single-use construction state. Consumed by [`TreeBuilder::build`];
/// the finished tree is immutable.
pub(crate) struct TreeBuilder<'a> {
    symbols: &'a [Symbol],
    vertices: Vec<Vertex>,
    edges: EdgeIndex,
    /// One past the highest edge-symbol position currently covered by
    /// open leaf edges.
    frontier: usize,
    leaf_count: usize,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(symbols: &'a [Symbol]) -> Result<Self> {
        if symbols.len() > MAX_SEQUENCE_LEN {
            bail!(
                "sequence of {} symbols exceeds the supported maximum of {}",
                symbols.len(),
                MAX_SEQUENCE_LEN
            );
        }

        let mut vertices = Vec::with_capacity(symbols.len() * 2 + 1);
        vertices.push(Vertex {
            symbol_index: 0,
            length: 0,
            first_symbol: 0,
            parent: NO_VERTEX,
            suffix_link: NO_VERTEX,
            link_head: NO_VERTEX,
            link_tail: NO_VERTEX,
            suffix_start: 0,
        });

        Ok(Self {
            symbols,
            vertices,
            edges: EdgeIndex::with_capacity_for(symbols.len()),
            frontier: 0,
            leaf_count: 0,
        })
    }

    pub fn build(mut self) -> SuffixTree<'a> {
        if !self.symbols.is_empty() {
            self.grow();
        }
        debug!(
            sequence_len = self.symbols.len(),
            vertices = self.vertices.len(),
            leaves = self.leaf_count,
            "suffix tree built"
        );
        SuffixTree::from_parts(self.symbols, self.vertices, self.edges, self.leaf_count)
    }

    fn grow(&mut self) {
        self.frontier = 1;
        let first = self.new_leaf(0, 0, ROOT);
        self.splice_leaf(first, ROOT);

        let mut position = Position::root();
        let mut next_suffix: u32 = 1;
        // Phase i extends the tree by the symbol at i; the phase at
        // `symbols.len()` runs on the virtual end mark.
        for i in 1..=self.symbols.len() {
            self.frontier = i + 1;
            position = self.extend(position, &mut next_suffix, i);
        }
    }

    /// One phase. `position` locates the longest suffix not yet backed by
    /// a leaf, `symbols[next_suffix..i]`; on return it locates the same
    /// suffix extended through the phase symbol.
    fn extend(&mut self, mut position: Position, next_suffix: &mut u32, i: usize) -> Position {
        let symbol = edge_symbol_at(self.symbols, i);
        let last = i.min(self.symbols.len() - 1) as u32;
        let mut pending: Option<VertexId> = None;

        while *next_suffix <= last {
            if let Some(next) = self.descend(position, symbol) {
                // Already present: every shorter suffix is implicitly
                // extended too, so the phase ends here.
                if let Some(vertex) = pending {
                    assert!(
                        self.at_vertex(position),
                        "suffix link target is not an explicit vertex"
                    );
                    self.vertices[vertex as usize].suffix_link = position.vertex();
                }
                return next;
            }

            let branch = if self.at_vertex(position) {
                position.vertex()
            } else {
                self.split(position)
            };
            let leaf = self.new_leaf(i as u32, *next_suffix, branch);
            self.splice_leaf(leaf, branch);

            if let Some(vertex) = pending {
                self.vertices[vertex as usize].suffix_link = branch;
            }
            pending = (branch != ROOT && self.vertices[branch as usize].suffix_link == NO_VERTEX)
                .then_some(branch);

            *next_suffix += 1;
            if *next_suffix > last {
                break;
            }
            position = self.relocate(branch);
        }

        // A vertex still pending here sits one symbol below the root.
        if let Some(vertex) = pending {
            self.vertices[vertex as usize].suffix_link = ROOT;
        }
        Position::root()
    }

    #[inline]
    fn descend(&self, position: Position, symbol: EdgeSymbol) -> Option<Position> {
        step(
            &self.vertices,
            &self.edges,
            self.symbols,
            self.frontier,
            position,
            symbol,
        )
    }

    #[inline]
    fn at_vertex(&self, position: Position) -> bool {
        position.symbols_down() == self.vertices[position.vertex() as usize].span(self.frontier)
    }

    #[inline]
    fn vertex_position(&self, vertex: VertexId) -> Position {
        Position::new(vertex, self.vertices[vertex as usize].span(self.frontier))
    }

    /// Position of the current suffix with its first symbol removed.
    /// `from` is the branch vertex the previous extension ended at.
    fn relocate(&self, from: VertexId) -> Position {
        let vertex = &self.vertices[from as usize];
        if vertex.suffix_link != NO_VERTEX {
            return self.vertex_position(vertex.suffix_link);
        }

        debug_assert!(!vertex.is_leaf());
        let parent = vertex.parent;
        if parent == ROOT {
            self.skip_descend(ROOT, vertex.symbol_index as usize + 1, vertex.length - 1)
        } else {
            let link = self.vertices[parent as usize].suffix_link;
            assert!(link != NO_VERTEX, "internal vertex is missing its suffix link");
            self.skip_descend(link, vertex.symbol_index as usize, vertex.length)
        }
    }

    /// Walk a path known to be present, hopping whole edges at a time:
    /// `count` symbols starting at sequence position `start`, from
    /// `vertex` downward. O(edges hopped), not O(symbols consumed).
    fn skip_descend(&self, mut vertex: VertexId, mut start: usize, mut count: u32) -> Position {
        while count > 0 {
            let symbol = edge_symbol_at(self.symbols, start);
            let child = self
                .edges
                .get(vertex, symbol)
                .unwrap_or_else(|| panic!("missing edge on a known-present path at index {start}"));
            let span = self.vertices[child as usize].span(self.frontier);
            if count < span {
                return Position::new(child, count);
            }
            start += span as usize;
            count -= span;
            vertex = child;
        }
        self.vertex_position(vertex)
    }

    /// Split the edge into `position.vertex()` at `position`, inserting a
    /// fresh branch vertex above it. The existing vertex keeps its arena
    /// slot and becomes the lower edge; the branch takes over its key in
    /// the edge index. Returns the branch.
    fn split(&mut self, position: Position) -> VertexId {
        let child = position.vertex();
        let down = position.symbols_down();

        let (parent, symbol_index, first_symbol, suffix_start, head, tail) = {
            let vertex = &self.vertices[child as usize];
            debug_assert!(down >= 1 && down < vertex.span(self.frontier));
            let (head, tail) = if vertex.is_leaf() {
                (child, child)
            } else {
                (vertex.link_head, vertex.link_tail)
            };
            (
                vertex.parent,
                vertex.symbol_index,
                vertex.first_symbol,
                vertex.suffix_start,
                head,
                tail,
            )
        };

        let branch = self.vertices.len() as VertexId;
        self.vertices.push(Vertex {
            symbol_index,
            length: down,
            first_symbol,
            parent,
            suffix_link: NO_VERTEX,
            link_head: head,
            link_tail: tail,
            suffix_start,
        });
        self.edges.remove(parent, first_symbol);
        self.edges.insert(parent, first_symbol, branch);

        let lower_first = edge_symbol_at(self.symbols, (symbol_index + down) as usize);
        let vertex = &mut self.vertices[child as usize];
        vertex.symbol_index += down;
        if vertex.length != OPEN {
            vertex.length -= down;
        }
        vertex.first_symbol = lower_first;
        vertex.parent = branch;
        self.edges.insert(branch, lower_first, child);

        branch
    }

    fn new_leaf(&mut self, symbol_index: u32, suffix_start: u32, parent: VertexId) -> VertexId {
        let first_symbol = edge_symbol_at(self.symbols, symbol_index as usize);
        let leaf = self.vertices.len() as VertexId;
        self.vertices.push(Vertex {
            symbol_index,
            length: OPEN,
            first_symbol,
            parent,
            suffix_link: NO_VERTEX,
            link_head: NO_VERTEX,
            link_tail: NO_VERTEX,
            suffix_start,
        });
        self.edges.insert(parent, first_symbol, leaf);
        self.leaf_count += 1;
        leaf
    }

    /// Splice a new leaf into the leaf chain directly after the chain
    /// segment of the subtree it joins, keeping the leaves beneath every
    /// vertex contiguous. Ancestors whose segment ended at the old tail
    /// have their cached last leaf advanced.
    fn splice_leaf(&mut self, leaf: VertexId, branch: VertexId) {
        let anchor = self.vertices[branch as usize].link_tail;
        if anchor == NO_VERTEX {
            // Very first leaf; the chain is empty and the branch is the root.
            debug_assert_eq!(branch, ROOT);
            let root = &mut self.vertices[ROOT as usize];
            root.link_head = leaf;
            root.link_tail = leaf;
            return;
        }

        let after = self.vertices[anchor as usize].link_tail;
        {
            let vertex = &mut self.vertices[leaf as usize];
            vertex.link_head = anchor;
            vertex.link_tail = after;
        }
        self.vertices[anchor as usize].link_tail = leaf;
        if after != NO_VERTEX {
            self.vertices[after as usize].link_head = leaf;
        }

        let mut ancestor = branch;
        while ancestor != NO_VERTEX && self.vertices[ancestor as usize].link_tail == anchor {
            self.vertices[ancestor as usize].link_tail = leaf;
            ancestor = self.vertices[ancestor as usize].parent;
        }
    }
}
