//! Edge index
//!
//! Maps `(parent vertex, first label symbol)` to the child vertex whose
//! edge starts with that symbol. A parent never has two child edges
//! starting with the same symbol, so the pair is a unique key and every
//! child lookup during construction and descent is a single probe.

use ahash::RandomState;
use std::collections::HashMap;

use super::types::{EdgeSymbol, VertexId};

/// Child-edge lookup table.
///
/// Sized once from the known input length (vertex count is bounded by
/// twice the sequence length), so construction never rehashes.
pub(crate) struct EdgeIndex {
    map: HashMap<(VertexId, EdgeSymbol), VertexId, RandomState>,
}

impl EdgeIndex {
    /// Create an index pre-sized for a sequence of `sequence_len` symbols.
    pub fn with_capacity_for(sequence_len: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(sequence_len * 2, RandomState::new()),
        }
    }

    /// Register `child` as the edge of `parent` starting with `symbol`.
    pub fn insert(&mut self, parent: VertexId, symbol: EdgeSymbol, child: VertexId) {
        let previous = self.map.insert((parent, symbol), child);
        debug_assert!(previous.is_none(), "duplicate edge for symbol {symbol}");
    }

    /// Child of `parent` whose edge starts with `symbol`, if any.
    #[inline]
    pub fn get(&self, parent: VertexId, symbol: EdgeSymbol) -> Option<VertexId> {
        self.map.get(&(parent, symbol)).copied()
    }

    /// Remove the edge of `parent` starting with `symbol` and return the
    /// child it pointed to.
    ///
    /// Panics if no such edge exists: the builder only removes edges it
    /// previously inserted, so a miss is a construction bug.
    pub fn remove(&mut self, parent: VertexId, symbol: EdgeSymbol) -> VertexId {
        self.map
            .remove(&(parent, symbol))
            .unwrap_or_else(|| panic!("no edge to remove at vertex {parent} for symbol {symbol}"))
    }
}
