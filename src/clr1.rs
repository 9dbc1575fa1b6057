//! CLR(1) shift-reduce parser.
//!
//! [`CLR1Parser::build`] runs the whole construction pipeline once
//! (FIRST sets, canonical LR(1) automaton, parse table); [`CLR1Parser::parse`]
//! drives the table against a token stream and materializes the parse tree.

use crate::automaton::Automaton;
use crate::error::{ParseError, Result};
use crate::first::compute_first_sets;
use crate::grammar::Grammar;
use crate::table::{Action, ParseTable};
use crate::token::{Token, TokenKind};
use crate::tree::ParseNode;
use std::sync::OnceLock;

/// CLR(1) parser: a grammar plus its synthesized parse table.
///
/// Construction runs once per grammar; parsing runs per input over `&self`
/// and is safe to share across threads.
#[derive(Debug)]
pub struct CLR1Parser {
    grammar: Grammar,
    table: ParseTable,
}

impl CLR1Parser {
    /// Builds a parser for the K&R C grammar.
    pub fn new() -> Self {
        Self::build(Grammar::c())
    }

    /// Builds a parser for an arbitrary grammar over the symbol alphabet.
    pub fn build(grammar: Grammar) -> Self {
        let first_sets = compute_first_sets(&grammar);
        let automaton = Automaton::build(&grammar, &first_sets);
        let table = ParseTable::build(&grammar, &automaton);
        Self { grammar, table }
    }

    /// The process-wide C parser, built lazily on first use and retained
    /// for the process lifetime.
    pub fn shared() -> &'static CLR1Parser {
        static INSTANCE: OnceLock<CLR1Parser> = OnceLock::new();
        INSTANCE.get_or_init(CLR1Parser::new)
    }

    /// Returns the grammar this parser was built from.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Returns the synthesized parse table.
    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    /// Parses a token stream, terminated by an end-of-input token, into a
    /// parse tree rooted at the grammar's start symbol.
    ///
    /// # Algorithm
    /// The stack interleaves states and tree nodes, state 0 at the bottom.
    /// Per token: a shift pushes a leaf and the target state and advances; a
    /// reduction by A -> X1...Xn pops n frames, wraps their nodes into an A
    /// node, and follows the uncovered state's goto on A without advancing;
    /// an empty cell halts with the offending token and state.
    pub fn parse<'t>(&self, tokens: &'t [Token]) -> Result<ParseNode<'t>> {
        let mut states: Vec<usize> = vec![0];
        let mut nodes: Vec<ParseNode<'t>> = Vec::new();
        let mut position = 0;

        loop {
            let state = *states.last().unwrap();
            let token = match tokens.get(position) {
                Some(token) => token,
                None => return Err(ParseError::UnexpectedEof { state }),
            };
            let symbol = token.kind.terminal();

            match self.table.action(state, symbol) {
                Some(Action::Shift(target)) => {
                    nodes.push(ParseNode::leaf(symbol, token));
                    states.push(target);
                    position += 1;
                }
                Some(Action::Reduce(id)) => {
                    let production = self.grammar.production(id);
                    let len = production.rhs.len();
                    if nodes.len() < len {
                        return Err(Self::syntax_error(token, state));
                    }

                    let children = nodes.split_off(nodes.len() - len);
                    states.truncate(states.len() - len);
                    let uncovered = *states.last().unwrap();

                    match self.table.action(uncovered, production.lhs) {
                        Some(Action::Goto(target)) => {
                            nodes.push(ParseNode::interior(production.lhs, children));
                            states.push(target);
                        }
                        _ => return Err(Self::syntax_error(token, uncovered)),
                    }
                }
                Some(Action::Accept) => {
                    return nodes
                        .pop()
                        .ok_or(ParseError::UnexpectedEof { state });
                }
                Some(Action::Goto(_)) | None => {
                    return Err(Self::syntax_error(token, state));
                }
            }
        }
    }

    fn syntax_error(token: &Token, state: usize) -> ParseError {
        if token.kind == TokenKind::Eof {
            ParseError::UnexpectedEof { state }
        } else {
            ParseError::UnexpectedToken {
                kind: token.kind,
                lexeme: token.lexeme.clone(),
                line: token.line,
                column: token.column,
                state,
            }
        }
    }
}

impl Default for CLR1Parser {
    fn default() -> Self {
        Self::new()
    }
}
