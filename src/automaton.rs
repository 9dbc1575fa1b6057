//! Canonical LR(1) automaton construction.
//!
//! States are sets of LR(1) items closed under [`closure`]; the GOTO
//! relation between them is computed by [`goto`]. Construction is a
//! worklist over reachable states, deduplicating by item-set equality.
//! Lookaheads are never merged across otherwise-equal kernels: two states
//! differing only in lookahead sets are distinct.

use crate::first::{first_of, FirstSets};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// An LR(1) item: a production with a dot position and a lookahead set.
///
/// For example [A -> α•β, L] is (production id, |α|, L). The lookahead is a
/// true set with structural equality; two items are equal iff they agree on
/// production, cursor, and lookahead set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub production: usize,
    pub cursor: usize,
    pub lookahead: BTreeSet<Symbol>,
}

impl Item {
    pub fn new(production: usize, cursor: usize, lookahead: BTreeSet<Symbol>) -> Self {
        Self {
            production,
            cursor,
            lookahead,
        }
    }

    /// Returns the symbol after the dot, if any.
    pub fn symbol_after_dot(&self, grammar: &Grammar) -> Option<Symbol> {
        grammar.production(self.production).rhs.get(self.cursor).copied()
    }

    /// Checks if the dot is at the end (reduce item).
    pub fn is_reduce_item(&self, grammar: &Grammar) -> bool {
        self.cursor >= grammar.production(self.production).rhs.len()
    }
}

/// A set of LR(1) items; state identity is equality of these sets.
pub type ItemSet = BTreeSet<Item>;

/// A state in the LR(1) automaton.
#[derive(Debug, Clone)]
pub struct State {
    pub id: usize,
    /// Item set, closed under [`closure`].
    pub items: ItemSet,
    /// GOTO transitions out of this state, at most one per symbol.
    pub transitions: HashMap<Symbol, usize>,
}

/// The canonical collection of LR(1) states for a grammar.
#[derive(Debug)]
pub struct Automaton {
    pub states: Vec<State>,
}

/// Computes the LR(1) closure of a set of items, in place.
///
/// For each item [A -> α•Bβ, L] with non-terminal B and each production
/// B -> γ, the item [B -> •γ, L'] is added, where L' is FIRST(β) when β is
/// non-empty and the inherited L otherwise. Every added item is itself
/// expanded until the set reaches its fixed point; termination follows from
/// the finite item universe.
pub fn closure(grammar: &Grammar, first_sets: &FirstSets, items: &mut ItemSet) {
    let mut pending: Vec<Item> = items.iter().cloned().collect();

    while let Some(item) = pending.pop() {
        let symbol = match item.symbol_after_dot(grammar) {
            Some(symbol) if symbol.is_nonterminal() => symbol,
            _ => continue,
        };

        let rhs = &grammar.production(item.production).rhs;
        let lookahead = match rhs.get(item.cursor + 1) {
            Some(&beta_head) => first_of(first_sets, beta_head),
            None => item.lookahead.clone(),
        };

        for &id in grammar.productions_of(symbol) {
            let derived = Item::new(id, 0, lookahead.clone());
            if items.insert(derived.clone()) {
                pending.push(derived);
            }
        }
    }
}

/// Computes GOTO(items, x): every item whose dot precedes `x` advanced by
/// one, closed under [`closure`].
pub fn goto(grammar: &Grammar, first_sets: &FirstSets, items: &ItemSet, x: Symbol) -> ItemSet {
    let mut moved: ItemSet = items
        .iter()
        .filter(|item| item.symbol_after_dot(grammar) == Some(x))
        .map(|item| Item::new(item.production, item.cursor + 1, item.lookahead.clone()))
        .collect();

    closure(grammar, first_sets, &mut moved);
    moved
}

impl Automaton {
    /// Builds the canonical collection of LR(1) states.
    ///
    /// # Algorithm
    /// 1. State 0 is the closure of [Start -> •S, {$}]
    /// 2. For each state and each symbol after a dot, compute GOTO
    /// 3. Reuse the target if a registered state has an equal item set,
    ///    otherwise register it and enqueue it
    /// 4. Stop when no state has unexplored outgoing edges
    pub fn build(grammar: &Grammar, first_sets: &FirstSets) -> Self {
        let start_item = Item::new(0, 0, BTreeSet::from([Symbol::Eof]));
        let mut initial: ItemSet = BTreeSet::from([start_item]);
        closure(grammar, first_sets, &mut initial);

        let mut states = vec![State {
            id: 0,
            items: initial.clone(),
            transitions: HashMap::new(),
        }];
        let mut registry: HashMap<ItemSet, usize> = HashMap::from([(initial, 0)]);
        let mut worklist: VecDeque<usize> = VecDeque::from([0]);

        while let Some(state_id) = worklist.pop_front() {
            let items = states[state_id].items.clone();

            // Symbols appearing immediately after a dot, in symbol order.
            let symbols: BTreeSet<Symbol> = items
                .iter()
                .filter_map(|item| item.symbol_after_dot(grammar))
                .collect();

            for symbol in symbols {
                let target_items = goto(grammar, first_sets, &items, symbol);

                let target = match registry.get(&target_items) {
                    Some(&existing) => existing,
                    None => {
                        let id = states.len();
                        registry.insert(target_items.clone(), id);
                        states.push(State {
                            id,
                            items: target_items,
                            transitions: HashMap::new(),
                        });
                        worklist.push_back(id);
                        id
                    }
                };

                states[state_id].transitions.insert(symbol, target);
            }
        }

        Self { states }
    }

    /// Number of registered states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}
