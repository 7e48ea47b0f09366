//! # sufx - Suffix Tree Engine
//!
//! sufx indexes every substring of a sequence of integer-coded symbols in
//! a compact suffix tree, built in linear time with Ukkonen's algorithm.
//! Once built, the tree answers substring and maximal-run queries without
//! ever rescanning the indexed sequence.
//!
//! ## Architecture
//!
//! The crate is organized into two main modules:
//!
//! - [`tree`] - Tree construction and primitive queries (descent, suffix
//!   enumeration, stats)
//! - [`query`] - Run matching and occurrence queries over a built tree
//!
//! ## Quick Start
//!
//! ```ignore
//! use sufx::query::Matcher;
//! use sufx::tree::SuffixTree;
//!
//! // Index a sequence; the tree borrows it, so it must outlive the tree.
//! let symbols = vec![1, 2, 3, 1, 2, 4];
//! let tree = SuffixTree::build(&symbols).unwrap();
//!
//! // Decompose a query into maximal runs found in the indexed sequence.
//! let matcher = Matcher::new(&tree);
//! for run in matcher.runs(&[1, 2, 4, 9, 9, 1, 2]) {
//!     println!("{} symbols at query {}", run.len, run.query_start);
//! }
//! ```
//!
//! ## Design
//!
//! Vertices live in a flat arena addressed by integer ids; parent links,
//! suffix links, and the leaf chain are all indices, so the cyclic
//! reference structure needs no shared ownership. Leaf edges are
//! open-ended during construction and every suffix ends at its own
//! explicit leaf in the finished tree. Construction is single-threaded
//! and synchronous; the finished tree is immutable and may be queried
//! from multiple threads through shared references.

pub mod query;
pub mod tree;
