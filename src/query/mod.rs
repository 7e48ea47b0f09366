//! Query operations over a built suffix tree
//!
//! The tree itself exposes only primitives (descent, suffix
//! enumeration); everything that interprets a caller's query sequence
//! lives here.

pub mod matcher;

pub use matcher::{MatchRun, Matcher};
