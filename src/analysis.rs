//! Structural analyses over a frozen grammar.

use std::collections::BTreeSet;

use crate::grammar::Grammar;
use crate::symbol::{Nonterminal, Symbol};

impl Grammar {
    /// The set of nonterminals that can derive the empty sequence.
    ///
    /// Monotone fixpoint: seeded with every nonterminal owning a directly
    /// empty alternative, then a nonterminal becomes deletable as soon as one
    /// of its alternatives consists of already-deletable nonterminals only.
    /// A single terminal disqualifies an alternative. The set grows
    /// monotonically and is bounded by the nonterminal vocabulary, so the
    /// iteration terminates.
    pub fn deletable_nonterminals(&self) -> BTreeSet<Nonterminal> {
        let mut deletable = BTreeSet::new();

        // 1. nonterminals with an empty alternative
        for (nt, alternatives) in self.rules() {
            if alternatives.has_epsilon() {
                deletable.insert(nt.clone());
            }
        }

        // 2. nonterminals with at least one all-deletable alternative
        loop {
            let before = deletable.len();
            for (nt, alternatives) in self.rules() {
                if deletable.contains(nt) {
                    continue;
                }
                let derives_empty = alternatives.iter().any(|seq| {
                    seq.iter().all(|symbol| match symbol {
                        Symbol::Terminal(_) => false,
                        Symbol::Nonterminal(n) => deletable.contains(n),
                    })
                });
                if derives_empty {
                    deletable.insert(nt.clone());
                }
            }
            if deletable.len() == before {
                break;
            }
        }

        deletable
    }

    /// True iff no nonterminal other than the root has an empty alternative
    pub fn is_epsilon_free(&self) -> bool {
        self.rules()
            .iter()
            .all(|(nt, alternatives)| nt == self.root() || !alternatives.has_epsilon())
    }

    /// True iff the root's alternative set contains the empty sequence
    pub fn root_has_epsilon_alternative(&self) -> bool {
        self.alternatives(self.root())
            .is_some_and(|alternatives| alternatives.has_epsilon())
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::Grammar;
    use crate::symbol::SymbolTable;

    fn names(set: &std::collections::BTreeSet<crate::symbol::Nonterminal>) -> Vec<&str> {
        set.iter().map(|nt| nt.name()).collect()
    }

    #[test]
    fn test_deletable_fixpoint() {
        let mut symbols = SymbolTable::new();
        let grammar = Grammar::parse("G(S):\nS -> EPS | A\nA -> a | A a\n", &mut symbols).unwrap();

        // A is never deletable: each of its alternatives contains a terminal
        assert_eq!(names(&grammar.deletable_nonterminals()), ["S"]);
    }

    #[test]
    fn test_deletable_propagates_through_rules() {
        let mut symbols = SymbolTable::new();
        let grammar = Grammar::parse(
            "G(S):\nS -> A B C\nA -> B B | eps\nB -> C C | a\nC -> A A | b\n",
            &mut symbols,
        )
        .unwrap();

        // A seeds the set, then C (A A), then B (C C), then S (A B C)
        assert_eq!(names(&grammar.deletable_nonterminals()), ["A", "B", "C", "S"]);
    }

    #[test]
    fn test_terminal_blocks_deletability() {
        let mut symbols = SymbolTable::new();
        let grammar = Grammar::parse("G(S):\nS -> A a A\nA -> eps\n", &mut symbols).unwrap();

        assert_eq!(names(&grammar.deletable_nonterminals()), ["A"]);
    }

    #[test]
    fn test_epsilon_freedom_queries() {
        let mut symbols = SymbolTable::new();

        let grammar = Grammar::parse("G(S):\nS -> a | EPS\n", &mut symbols).unwrap();
        assert!(grammar.is_epsilon_free());
        assert!(grammar.root_has_epsilon_alternative());

        let grammar = Grammar::parse("G(S):\nS -> A\nA -> a | eps\n", &mut symbols).unwrap();
        assert!(!grammar.is_epsilon_free());
        assert!(!grammar.root_has_epsilon_alternative());
    }
}
