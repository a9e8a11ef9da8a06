//! Grammar rewriting: epsilon elimination.

use std::collections::BTreeSet;

use crate::grammar::{Grammar, GrammarBuilder};
use crate::sequence::Sequence;
use crate::symbol::{Nonterminal, Symbol, SymbolTable};
use crate::utils::Result;

/// Rewrites `grammar` into an equivalent grammar in which no nonterminal
/// other than the (possibly synthesized) root derives the empty sequence.
///
/// Alternatives without deletable occurrences are copied verbatim; an
/// alternative with `d` occurrences of deletable nonterminals expands into up
/// to `2^d` keep/drop combinations, with fully-empty results discarded. When
/// the original root is itself deletable, a fresh root `R'` with
/// `R' -> R | EPS` is synthesized so the empty sentence stays derivable, and
/// only there.
///
/// The resulting grammar generates exactly the non-empty sentences of the
/// original (plus the empty sentence via the synthesized root where the
/// original derived it). `symbols` must be the table the grammar's symbols
/// were interned in; it is used to intern the synthesized root.
pub fn eliminate_epsilon(grammar: &Grammar, symbols: &mut SymbolTable) -> Result<Grammar> {
    let deletable = grammar.deletable_nonterminals();
    let mut builder = GrammarBuilder::new(grammar.root().clone());

    for (nt, alternatives) in grammar.rules() {
        for seq in alternatives {
            if seq.is_epsilon() {
                continue;
            }
            if contains_deletable(seq, &deletable) {
                for combination in epsilon_free_combinations(seq, &deletable) {
                    builder.add_rule(nt, combination);
                }
            } else {
                builder.add_rule(nt, seq.clone());
            }
        }
    }

    if deletable.contains(grammar.root()) {
        let fresh = fresh_root(grammar.root(), symbols)?;
        builder.add_rule(&fresh, Sequence::from(vec![Symbol::Nonterminal(grammar.root().clone())]));
        builder.add_rule(&fresh, Sequence::empty());
        builder.set_root(fresh);
    }

    builder.build()
}

fn contains_deletable(seq: &Sequence, deletable: &BTreeSet<Nonterminal>) -> bool {
    seq.iter()
        .any(|symbol| matches!(symbol, Symbol::Nonterminal(nt) if deletable.contains(nt)))
}

/// Every keep/drop combination over the deletable occurrences of `seq`,
/// fully-empty results removed.
fn epsilon_free_combinations(seq: &Sequence, deletable: &BTreeSet<Nonterminal>) -> Vec<Sequence> {
    let mut combinations = vec![Sequence::empty()];
    for symbol in seq {
        let is_deletable =
            matches!(symbol, Symbol::Nonterminal(nt) if deletable.contains(nt));
        if is_deletable {
            // fork every prefix built so far: once without and once with it
            let current = combinations.len();
            for i in 0..current {
                let mut kept = combinations[i].clone();
                kept.push(symbol.clone());
                combinations.push(kept);
            }
        } else {
            for prefix in &mut combinations {
                prefix.push(symbol.clone());
            }
        }
    }
    combinations.retain(|seq| !seq.is_epsilon());
    combinations
}

/// The original root's name with primes appended until the name is unused
fn fresh_root(root: &Nonterminal, symbols: &mut SymbolTable) -> Result<Nonterminal> {
    let mut name = format!("{}'", root.name());
    while symbols.lookup(&name).is_some() {
        name.push('\'');
    }
    symbols.nonterminal(&name)
}
