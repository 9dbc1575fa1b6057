//! FIRST-set computation.
//!
//! For a non-terminal N, FIRST(N) is the set of terminals that may begin a
//! derivation of N. The grammar has no ε-productions, so FIRST of a
//! sentential form is FIRST of its leading symbol and nothing propagates
//! through nullable prefixes.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::{BTreeMap, BTreeSet};

/// Type alias for FIRST sets mapping.
pub type FirstSets = BTreeMap<Symbol, BTreeSet<Symbol>>;

/// Computes the FIRST sets for all symbols in the grammar.
///
/// # Algorithm
/// 1. For terminals: FIRST(a) = {a}
/// 2. For each production A -> X...: FIRST(A) ⊇ FIRST(X)
/// 3. Repeat until no set grows (fixed-point iteration)
pub fn compute_first_sets(grammar: &Grammar) -> FirstSets {
    let mut first_sets: FirstSets = BTreeMap::new();

    for &terminal in grammar.terminals() {
        first_sets.insert(terminal, BTreeSet::from([terminal]));
    }
    for &nonterminal in grammar.nonterminals() {
        first_sets.insert(nonterminal, BTreeSet::new());
    }

    let mut changed = true;
    while changed {
        changed = false;

        for production in grammar.productions() {
            let head = production.rhs[0];
            let head_first = first_sets.get(&head).cloned().unwrap_or_default();

            let lhs_first = first_sets.entry(production.lhs).or_default();
            let before = lhs_first.len();
            lhs_first.extend(head_first);
            if lhs_first.len() != before {
                changed = true;
            }
        }
    }

    first_sets
}

/// Returns FIRST of a single symbol.
pub fn first_of(first_sets: &FirstSets, symbol: Symbol) -> BTreeSet<Symbol> {
    first_sets.get(&symbol).cloned().unwrap_or_default()
}
