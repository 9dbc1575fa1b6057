//! Parse-table synthesis.
//!
//! Lowers the LR(1) automaton into a dense action/goto matrix indexed by
//! `(state id, symbol index)`.

use crate::automaton::Automaton;
use crate::grammar::Grammar;
use crate::symbol::{Symbol, SYMBOL_COUNT};

/// A parse-table cell action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Consume the terminal and transition to the state.
    Shift(usize),
    /// Pop |rhs| frames and reduce by the production.
    Reduce(usize),
    /// Destination state for a non-terminal after a reduction.
    Goto(usize),
    /// Input matches the augmented start production.
    Accept,
}

/// Dense CLR(1) parse table; empty cells are parse errors.
#[derive(Debug)]
pub struct ParseTable {
    cells: Vec<[Option<Action>; SYMBOL_COUNT]>,
}

impl ParseTable {
    /// Synthesizes the table from an automaton.
    ///
    /// Per state, reductions for completed items are installed first, under
    /// every terminal of the item's lookahead set (under `$` when the set is
    /// empty). Shift and goto entries from the transitions are written
    /// afterwards and win the cell outright, so a state holding both a
    /// reduction and a shift on `else` shifts: the dangling `else` binds to
    /// the nearest `if`. No other conflict exists in a CLR(1)-clean grammar
    /// and none is reported.
    pub fn build(grammar: &Grammar, automaton: &Automaton) -> Self {
        let mut cells = vec![[None; SYMBOL_COUNT]; automaton.state_count()];

        for state in &automaton.states {
            let row = &mut cells[state.id];

            for item in &state.items {
                if !item.is_reduce_item(grammar) {
                    continue;
                }
                if item.production == 0 {
                    row[Symbol::Eof.index()] = Some(Action::Accept);
                } else if item.lookahead.is_empty() {
                    row[Symbol::Eof.index()] = Some(Action::Reduce(item.production));
                } else {
                    for &lookahead in &item.lookahead {
                        row[lookahead.index()] = Some(Action::Reduce(item.production));
                    }
                }
            }

            for (&symbol, &target) in &state.transitions {
                row[symbol.index()] = Some(if symbol.is_terminal() {
                    Action::Shift(target)
                } else {
                    Action::Goto(target)
                });
            }
        }

        Self { cells }
    }

    /// Returns the action for a state and symbol, if any.
    #[inline]
    pub fn action(&self, state: usize, symbol: Symbol) -> Option<Action> {
        self.cells[state][symbol.index()]
    }

    /// Number of table rows (states).
    pub fn state_count(&self) -> usize {
        self.cells.len()
    }
}
