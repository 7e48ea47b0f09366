//! Run matching and occurrence queries
//!
//! A `Matcher` borrows a built [`SuffixTree`] and answers questions about
//! an arbitrary query sequence: its greedy decomposition into maximal
//! runs that occur somewhere in the indexed sequence, and where a given
//! pattern occurs.

use serde::{Deserialize, Serialize};

use crate::tree::{Position, SuffixTree, Symbol};

/// One maximal matching run found by [`Matcher::runs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRun {
    /// Where the run starts in the query sequence.
    pub query_start: usize,
    /// Start of one occurrence of the run in the indexed sequence.
    pub source_start: usize,
    /// Run length in symbols.
    pub len: usize,
}

/// Query engine over a built suffix tree.
pub struct Matcher<'t, 'a> {
    tree: &'t SuffixTree<'a>,
}

impl<'t, 'a> Matcher<'t, 'a> {
    pub fn new(tree: &'t SuffixTree<'a>) -> Self {
        Self { tree }
    }

    /// Decompose `query` into maximal non-overlapping runs that occur in
    /// the indexed sequence, left to right and greedy.
    ///
    /// `on_run` receives `(query_start, position, run_len)` for every
    /// ended run, where `position` is the tree location the run's last
    /// symbol descended to. After a run ends on a mismatch, the
    /// mismatching symbol itself is re-examined from the root; a symbol
    /// that matches nothing at all is skipped. A run still open at the
    /// end of the query is emitted last. Never fails; the callback may
    /// run zero times.
    pub fn match_runs(&self, query: &[Symbol], mut on_run: impl FnMut(usize, Position, usize)) {
        let mut position = self.tree.root_position();
        let mut run_start = 0;
        let mut run_len = 0;
        let mut index = 0;
        while index < query.len() {
            if let Some(next) = self.tree.descend(position, query[index]) {
                if run_len == 0 {
                    run_start = index;
                }
                run_len += 1;
                position = next;
                index += 1;
            } else if run_len > 0 {
                on_run(run_start, position, run_len);
                run_len = 0;
                position = self.tree.root_position();
            } else {
                index += 1;
            }
        }
        if run_len > 0 {
            on_run(run_start, position, run_len);
        }
    }

    /// Collected form of [`match_runs`](Self::match_runs), with a
    /// representative occurrence resolved for each run.
    pub fn runs(&self, query: &[Symbol]) -> Vec<MatchRun> {
        let mut runs = Vec::new();
        self.match_runs(query, |query_start, position, len| {
            runs.push(MatchRun {
                query_start,
                source_start: self.tree.suffix_start(position.vertex()),
                len,
            });
        });
        runs
    }

    /// Position reached by descending the whole of `pattern` from the
    /// root, or `None` if some prefix of it does not occur. The empty
    /// pattern trivially resolves to the root.
    pub fn find(&self, pattern: &[Symbol]) -> Option<Position> {
        let mut position = self.tree.root_position();
        for &symbol in pattern {
            position = self.tree.descend(position, symbol)?;
        }
        Some(position)
    }

    /// Whether `pattern` occurs anywhere in the indexed sequence.
    pub fn contains(&self, pattern: &[Symbol]) -> bool {
        self.find(pattern).is_some()
    }

    /// Every start index at which the non-empty `pattern` occurs in the
    /// indexed sequence, ascending. The empty pattern yields no
    /// occurrences.
    pub fn occurrences(&self, pattern: &[Symbol]) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }
        let Some(position) = self.find(pattern) else {
            return Vec::new();
        };
        let mut starts = self.tree.suffix_starts(position.vertex());
        starts.sort_unstable();
        starts
    }
}
