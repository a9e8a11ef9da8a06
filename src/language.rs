use std::collections::{btree_set, BTreeSet, VecDeque};
use std::fmt;

use crate::grammar::Grammar;
use crate::sequence::Sequence;
use crate::symbol::Symbol;

/// The sentences of a grammar up to a fixed length bound.
///
/// A language is a deduplicated, ordered set of terminal-only sequences. It
/// is a pure derived value: it keeps copies of the sentences and no reference
/// to the grammar it was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    sentences: BTreeSet<Sequence>,
    max_len: usize,
}

impl Language {
    /// Enumerate every distinct terminal sequence of length `max_len` or
    /// less that `grammar` derives from its root.
    ///
    /// Breadth-first worklist over partially expanded states, each a pair of
    /// an accumulated terminal prefix and the symbols still to expand. A
    /// state whose remaining symbols are all terminals is a complete
    /// candidate; a state whose prefix alone has reached the bound is
    /// dropped, since expansion never shrinks it. Otherwise the first
    /// unexpanded symbol is shifted into the prefix (terminal) or branched
    /// once per alternative (nonterminal), splicing the alternative in place.
    /// The bound makes the search terminate even for cyclic grammars.
    ///
    /// Note that with `max_len == 0` the initial state is pruned before any
    /// expansion, so the language is empty even when the root derives the
    /// empty sentence.
    ///
    /// Runtime is exponential in the worst case; bounds beyond the low
    /// double digits are rarely tractable.
    pub fn of(grammar: &Grammar, max_len: usize) -> Language {
        let mut sentences = BTreeSet::new();
        let mut queue: VecDeque<(Sequence, Vec<Symbol>)> = VecDeque::new();
        queue.push_back((
            Sequence::empty(),
            vec![Symbol::Nonterminal(grammar.root().clone())],
        ));

        while let Some((prefix, pending)) = queue.pop_front() {
            if pending.iter().all(Symbol::is_terminal) {
                if prefix.len() + pending.len() <= max_len {
                    let mut sentence = prefix;
                    for symbol in pending {
                        sentence.push(symbol);
                    }
                    sentences.insert(sentence);
                }
                continue;
            }
            if prefix.len() >= max_len {
                continue;
            }
            // pending holds at least one nonterminal here
            let Some((next, rest)) = pending.split_first() else {
                continue;
            };
            match next {
                Symbol::Terminal(t) => {
                    let mut shifted = prefix;
                    shifted.push(Symbol::Terminal(t.clone()));
                    queue.push_back((shifted, rest.to_vec()));
                }
                Symbol::Nonterminal(nt) => {
                    if let Some(alternatives) = grammar.alternatives(nt) {
                        for alt in alternatives {
                            let mut expanded = Vec::with_capacity(alt.len() + rest.len());
                            expanded.extend(alt.iter().cloned());
                            expanded.extend(rest.iter().cloned());
                            queue.push_back((prefix.clone(), expanded));
                        }
                    }
                }
            }
        }

        Language { sentences, max_len }
    }

    /// The length bound this language was generated for
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of distinct sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Whether `sentence` is derivable within the bound
    pub fn has_sentence(&self, sentence: &Sequence) -> bool {
        self.sentences.contains(sentence)
    }

    /// Whether every given sentence is in the language
    pub fn has_all_sentences<'a>(
        &self,
        sentences: impl IntoIterator<Item = &'a Sequence>,
    ) -> bool {
        sentences.into_iter().all(|s| self.has_sentence(s))
    }

    /// The sentences in lexicographic order
    pub fn sentences(&self) -> btree_set::Iter<'_, Sequence> {
        self.sentences.iter()
    }
}

impl<'a> IntoIterator for &'a Language {
    type Item = &'a Sequence;
    type IntoIter = btree_set::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sentence in &self.sentences {
            writeln!(f, "{}", sentence)?;
        }
        Ok(())
    }
}
