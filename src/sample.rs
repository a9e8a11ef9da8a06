//! Random derivation of single sentences.

use rand::Rng;

use crate::grammar::Grammar;
use crate::sequence::Sequence;
use crate::symbol::{Nonterminal, Symbol};

/// Derive one random sentence from the grammar's root, choosing uniformly
/// among the alternatives of each expanded nonterminal.
///
/// `max_depth` bounds the nesting of nonterminal expansions so recursive
/// grammars cannot loop forever; returns `None` when the budget runs out
/// before every nonterminal is resolved.
pub fn sample_sentence(grammar: &Grammar, max_depth: usize, rng: &mut impl Rng) -> Option<Sequence> {
    let mut sentence = Sequence::empty();
    expand(grammar, grammar.root(), max_depth, rng, &mut sentence)?;
    Some(sentence)
}

fn expand(
    grammar: &Grammar,
    nt: &Nonterminal,
    depth: usize,
    rng: &mut impl Rng,
    out: &mut Sequence,
) -> Option<()> {
    if depth == 0 {
        return None;
    }
    let alternatives = grammar.alternatives(nt)?;
    if alternatives.is_empty() {
        return None;
    }
    let picked = alternatives.iter().nth(rng.gen_range(0..alternatives.len()))?;
    for symbol in picked {
        match symbol {
            Symbol::Terminal(t) => out.push(Symbol::Terminal(t.clone())),
            Symbol::Nonterminal(n) => expand(grammar, n, depth - 1, rng, out)?,
        }
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use crate::symbol::SymbolTable;

    #[test]
    fn test_sampled_sentence_is_in_language() {
        let mut symbols = SymbolTable::new();
        let grammar = Grammar::parse("G(S):\nS -> a A | b A\nA -> a | b\n", &mut symbols).unwrap();

        let language = Language::of(&grammar, 2);
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let sentence = sample_sentence(&grammar, 8, &mut rng).unwrap();
            assert!(language.has_sentence(&sentence));
        }
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut symbols = SymbolTable::new();
        // every derivation recurses forever
        let grammar = Grammar::parse("G(S):\nS -> a S\n", &mut symbols).unwrap();

        let mut rng = rand::thread_rng();
        assert_eq!(sample_sentence(&grammar, 16, &mut rng), None);
        assert_eq!(sample_sentence(&grammar, 0, &mut rng), None);
    }
}
