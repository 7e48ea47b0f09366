//! End-to-end properties of the suffix tree engine.
//!
//! Exercises the public surface the way a consumer would: build from a
//! sequence, then descend, enumerate suffixes, and decompose queries into
//! matching runs. The randomized cases compare every answer against a
//! brute-force scan of the sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_log::test;

use sufx::query::Matcher;
use sufx::tree::{Position, SuffixTree, Symbol};

/// Brute-force occurrence scan used as the oracle.
fn scan_occurrences(symbols: &[Symbol], pattern: &[Symbol]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > symbols.len() {
        return Vec::new();
    }
    symbols
        .windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| *window == pattern)
        .map(|(start, _)| start)
        .collect()
}

fn descend_all(tree: &SuffixTree, symbols: &[Symbol]) -> Option<Position> {
    let mut position = tree.root_position();
    for &symbol in symbols {
        position = tree.descend(position, symbol)?;
    }
    Some(position)
}

fn sorted_suffixes(tree: &SuffixTree) -> Vec<usize> {
    let mut starts = tree.suffix_starts(tree.root_position().vertex());
    starts.sort_unstable();
    starts
}

#[test]
fn test_suffix_enumeration_is_a_permutation() {
    for symbols in [
        vec![1],
        vec![1, 2, 3, 1, 2, 4],
        vec![5, 5, 5, 5],
        vec![1, 2, 1, 2, 1, 2],
        vec![9, 8, 7, 6, 5],
    ] {
        let tree = SuffixTree::build(&symbols).unwrap();
        let expected: Vec<usize> = (0..symbols.len()).collect();
        assert_eq!(sorted_suffixes(&tree), expected, "sequence {symbols:?}");
        assert_eq!(tree.stats().leaf_count, symbols.len());
    }
}

#[test]
fn test_every_suffix_is_reachable() {
    let symbols = [3, 1, 3, 1, 3, 3, 1];
    let tree = SuffixTree::build(&symbols).unwrap();
    for start in 0..symbols.len() {
        let position = descend_all(&tree, &symbols[start..])
            .unwrap_or_else(|| panic!("suffix {start} not present"));
        assert!(
            tree.suffix_starts(position.vertex()).contains(&start),
            "suffix {start} not beneath its own path"
        );
    }
}

#[test]
fn test_suffixes_end_at_leaves_when_last_symbol_is_unique() {
    let symbols = [2, 1, 2, 1, 2, 7];
    let tree = SuffixTree::build(&symbols).unwrap();
    for start in 0..symbols.len() {
        let position = descend_all(&tree, &symbols[start..]).unwrap();
        assert!(tree.is_leaf(position.vertex()));
        assert_eq!(tree.suffix_start(position.vertex()), start);
    }
}

#[test]
fn test_every_substring_descends() {
    let symbols = [4, 1, 4, 4, 2, 1, 4];
    let tree = SuffixTree::build(&symbols).unwrap();
    for start in 0..symbols.len() {
        for end in start + 1..=symbols.len() {
            assert!(
                descend_all(&tree, &symbols[start..end]).is_some(),
                "substring {start}..{end} not found"
            );
        }
    }
}

#[test]
fn test_whole_sequence_matches_as_one_run() {
    let symbols = [1, 2, 3, 1, 2, 4];
    let tree = SuffixTree::build(&symbols).unwrap();
    let runs = Matcher::new(&tree).runs(&symbols);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].query_start, 0);
    assert_eq!(runs[0].len, symbols.len());
    assert_eq!(runs[0].source_start, 0);
}

#[test]
fn test_disjoint_alphabet_emits_nothing() {
    let symbols = [1, 2, 3, 1, 2, 4];
    let tree = SuffixTree::build(&symbols).unwrap();
    let mut calls = 0;
    Matcher::new(&tree).match_runs(&[10, 11, 12, 13], |_, _, _| calls += 1);
    assert_eq!(calls, 0);
}

#[test]
fn test_match_runs_mixed_scenario() {
    // [1,2,4] occurs, the 9s occur nowhere, [1,2] occurs.
    let symbols = [1, 2, 3, 1, 2, 4];
    let tree = SuffixTree::build(&symbols).unwrap();

    let branch = descend_all(&tree, &[1, 2]).unwrap();
    assert!(tree.is_at_vertex(branch));
    assert!(!tree.is_leaf(branch.vertex()));

    let below_123 = descend_all(&tree, &[1, 2, 3]).unwrap();
    assert_eq!(tree.suffix_starts(below_123.vertex()), vec![0]);

    let runs: Vec<(usize, usize)> = Matcher::new(&tree)
        .runs(&[1, 2, 4, 9, 9, 1, 2])
        .iter()
        .map(|run| (run.query_start, run.len))
        .collect();
    assert_eq!(runs, vec![(0, 3), (5, 2)]);
}

#[test]
fn test_empty_sequence() {
    let tree = SuffixTree::build(&[]).unwrap();
    assert_eq!(sorted_suffixes(&tree), Vec::<usize>::new());
    assert_eq!(tree.descend(tree.root_position(), 1), None);
    assert_eq!(Matcher::new(&tree).runs(&[1, 2]), vec![]);
}

#[test]
fn test_rebuilds_are_deterministic() {
    let symbols = [1, 2, 1, 3, 1, 2, 1];
    let query = [1, 3, 9, 1, 2, 2, 1];

    let first = SuffixTree::build(&symbols).unwrap();
    let second = SuffixTree::build(&symbols).unwrap();

    assert_eq!(first.stats(), second.stats());
    assert_eq!(
        first.suffix_starts(first.root_position().vertex()),
        second.suffix_starts(second.root_position().vertex())
    );
    assert_eq!(
        Matcher::new(&first).runs(&query),
        Matcher::new(&second).runs(&query)
    );
}

#[test]
fn test_random_sequences_against_oracle() {
    let mut rng = StdRng::seed_from_u64(0x5f3759df);
    for round in 0..50 {
        let len = rng.gen_range(1..200);
        let alphabet = rng.gen_range(2..6);
        let symbols: Vec<Symbol> = (0..len).map(|_| rng.gen_range(0..alphabet)).collect();
        let tree = SuffixTree::build(&symbols).unwrap();
        let matcher = Matcher::new(&tree);

        // Every suffix is enumerated exactly once.
        let expected: Vec<usize> = (0..symbols.len()).collect();
        assert_eq!(sorted_suffixes(&tree), expected, "round {round}");

        // Occurrence queries agree with a linear scan, for patterns both
        // sampled from the sequence and drawn fresh.
        for _ in 0..40 {
            let pattern_len = rng.gen_range(1..8.min(len + 1));
            let pattern: Vec<Symbol> = if rng.gen_bool(0.5) && pattern_len <= len {
                let start = rng.gen_range(0..=len - pattern_len);
                symbols[start..start + pattern_len].to_vec()
            } else {
                (0..pattern_len).map(|_| rng.gen_range(0..alphabet)).collect()
            };

            let expected = scan_occurrences(&symbols, &pattern);
            assert_eq!(
                matcher.occurrences(&pattern),
                expected,
                "round {round}, pattern {pattern:?}"
            );
            assert_eq!(matcher.contains(&pattern), !expected.is_empty());
        }
    }
}

#[test]
fn test_random_runs_are_exact_and_maximal() {
    let mut rng = StdRng::seed_from_u64(0xb5297a4d);
    for round in 0..30 {
        let len = rng.gen_range(4..120);
        let symbols: Vec<Symbol> = (0..len).map(|_| rng.gen_range(0..4)).collect();
        let query: Vec<Symbol> = (0..rng.gen_range(1..80)).map(|_| rng.gen_range(0..5)).collect();

        let tree = SuffixTree::build(&symbols).unwrap();
        let runs = Matcher::new(&tree).runs(&query);

        let mut previous_end = 0;
        for run in &runs {
            // Runs are ordered and non-overlapping.
            assert!(run.query_start >= previous_end, "round {round}");
            previous_end = run.query_start + run.len;

            // The run re-spells a slice of the query that occurs in the
            // indexed sequence at the reported position.
            let slice = &query[run.query_start..run.query_start + run.len];
            assert_eq!(
                &symbols[run.source_start..run.source_start + run.len],
                slice,
                "round {round}"
            );

            // Greedy maximality: one more query symbol breaks the match.
            if previous_end < query.len() {
                let extended = &query[run.query_start..previous_end + 1];
                assert!(
                    scan_occurrences(&symbols, extended).is_empty(),
                    "round {round}: run not maximal"
                );
            }
        }
    }
}
