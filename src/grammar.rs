use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::sequence::{AlternativeSet, Sequence};
use crate::symbol::{Nonterminal, Symbol, SymbolTable, Terminal};
use crate::utils::{GrammarError, Result};

/// Tokens spelling the empty alternative in the text notation
const EPSILON_TOKENS: [&str; 4] = ["EPS", "EPSILON", "eps", "epsilon"];

const MAX_ROOT_NAME_LEN: usize = 20;

/// An immutable context-free grammar.
///
/// A grammar maps each nonterminal to the deduplicated set of its rule
/// alternatives, carries a distinguished root nonterminal, and the derived
/// vocabularies: every nonterminal occurring in rules (including the root),
/// every terminal, and their union. Grammars are only created through
/// [`GrammarBuilder`] (or the text notation loaders, which use the builder
/// internally) and never change afterwards, so they can be shared freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    root: Nonterminal,
    rules: BTreeMap<Nonterminal, AlternativeSet>,
    nonterminals: BTreeSet<Nonterminal>,
    terminals: BTreeSet<Terminal>,
    symbols: BTreeSet<Symbol>,
}

impl Grammar {
    /// The distinguished root nonterminal
    pub fn root(&self) -> &Nonterminal {
        &self.root
    }

    /// All rules, keyed by nonterminal
    pub fn rules(&self) -> &BTreeMap<Nonterminal, AlternativeSet> {
        &self.rules
    }

    /// The alternatives of `nt`, or `None` if the grammar has no rule for it
    pub fn alternatives(&self, nt: &Nonterminal) -> Option<&AlternativeSet> {
        self.rules.get(nt)
    }

    /// All nonterminals occurring in rules, including the root
    pub fn nonterminals(&self) -> &BTreeSet<Nonterminal> {
        &self.nonterminals
    }

    /// All terminals occurring in rules
    pub fn terminals(&self) -> &BTreeSet<Terminal> {
        &self.terminals
    }

    /// Union of the terminal and nonterminal vocabularies
    pub fn symbols(&self) -> &BTreeSet<Symbol> {
        &self.symbols
    }

    /// Parse a grammar from the line-oriented rule notation:
    ///
    /// ```text
    /// G(S):
    /// S -> a B | b A
    /// A -> a | a S
    /// B -> b | b S
    /// ```
    ///
    /// One rule per line, alternatives separated by `|`, the empty
    /// alternative written as `EPS`/`EPSILON`/`eps`/`epsilon`. Lines starting
    /// with `//` and blank lines are skipped; a line starting with `---` ends
    /// the rule section. A name is a nonterminal iff it appears on the
    /// left-hand side of some rule; every other name is a terminal. Symbols
    /// are interned through `symbols`, so the caller can resolve names
    /// against the same table afterwards.
    pub fn parse(src: &str, symbols: &mut SymbolTable) -> Result<Grammar> {
        let header = Regex::new(r"^G\((\S+)\):$").unwrap();

        // pass 1: the header names the root, every further rule line starts
        // with the nonterminal it defines
        let mut root_name: Option<String> = None;
        let mut lhs_names: BTreeSet<String> = BTreeSet::new();
        for (lnr, line) in rule_lines(src) {
            if root_name.is_none() {
                let captures = header.captures(line).ok_or_else(|| GrammarError::Syntax {
                    line: lnr,
                    message: "grammar does not start with \"G(...):\"".to_string(),
                })?;
                let name = captures[1].to_string();
                if name.len() > MAX_ROOT_NAME_LEN {
                    return Err(GrammarError::Syntax {
                        line: lnr,
                        message: format!("invalid root nonterminal {name:?}"),
                    });
                }
                root_name = Some(name);
                continue;
            }
            let Some(lhs) = line.split_whitespace().next() else {
                continue;
            };
            if !lhs_names.insert(lhs.to_string()) {
                return Err(GrammarError::Syntax {
                    line: lnr,
                    message: format!("duplicate rule for nonterminal {lhs:?}"),
                });
            }
        }
        let root_name = root_name
            .ok_or_else(|| GrammarError::InvalidArgument("grammar text contains no rules".to_string()))?;
        if !lhs_names.contains(&root_name) {
            return Err(GrammarError::MissingRule(root_name));
        }

        // pass 2: build terminals, sequences and rules
        let root = symbols.nonterminal(&root_name)?;
        let mut builder = GrammarBuilder::new(root);
        let mut past_header = false;
        for (lnr, line) in rule_lines(src) {
            if !past_header {
                past_header = true;
                continue;
            }
            let mut tokens = line.split_whitespace();
            let Some(lhs_name) = tokens.next() else {
                continue;
            };
            let lhs = symbols.nonterminal(lhs_name)?;
            if tokens.next() != Some("->") {
                return Err(GrammarError::Syntax {
                    line: lnr,
                    message: "\"->\" missing".to_string(),
                });
            }
            let mut seq = Sequence::empty();
            for token in tokens {
                if token == "|" {
                    builder.add_rule(&lhs, std::mem::take(&mut seq));
                } else if EPSILON_TOKENS.contains(&token) {
                    // the empty alternative contributes no symbols
                } else if lhs_names.contains(token) {
                    seq.push(symbols.nonterminal(token)?);
                } else {
                    seq.push(symbols.terminal(token)?);
                }
            }
            builder.add_rule(&lhs, seq);
        }
        builder.build()
    }

    /// Parse a grammar from a text file in the rule notation
    pub fn from_file<P: AsRef<Path>>(path: P, symbols: &mut SymbolTable) -> Result<Grammar> {
        let src = fs::read_to_string(path)?;
        Grammar::parse(&src, symbols)
    }

    // Rules listed root-first in reachability (discovery) order, unreachable
    // nonterminals appended at the end.
    fn top_sorted_nonterminals(&self) -> Vec<&Nonterminal> {
        let mut ordered: Vec<&Nonterminal> = vec![&self.root];
        let mut i = 0;
        while i < ordered.len() {
            if let Some(alternatives) = self.rules.get(ordered[i]) {
                for seq in alternatives {
                    for symbol in seq {
                        if let Symbol::Nonterminal(nt) = symbol {
                            if !ordered.contains(&nt) {
                                ordered.push(nt);
                            }
                        }
                    }
                }
            }
            i += 1;
        }
        for nt in self.rules.keys() {
            if !ordered.contains(&nt) {
                ordered.push(nt);
            }
        }
        ordered
    }
}

/// Prints the same notation [`Grammar::parse`] accepts, rules in topological
/// order from the root, followed by a `---` trailer with the vocabularies
/// (which the parser skips, so print/parse round-trips).
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "G({}):", self.root)?;
        for nt in self.top_sorted_nonterminals() {
            if let Some(alternatives) = self.rules.get(nt) {
                writeln!(f, "{} -> {}", nt, alternatives)?;
            }
        }
        writeln!(f, "---")?;
        let vnt: Vec<&str> = self.nonterminals.iter().map(Nonterminal::name).collect();
        let vt: Vec<&str> = self.terminals.iter().map(Terminal::name).collect();
        writeln!(f, "VNt = {{ {} }}", vnt.join(", "))?;
        writeln!(f, "VT  = {{ {} }}", vt.join(", "))
    }
}

/// Numbered, trimmed content lines of the rule section: comments and blank
/// lines dropped, everything from the first `---` line on ignored.
fn rule_lines(src: &str) -> impl Iterator<Item = (usize, &str)> {
    src.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with("//"))
        .take_while(|(_, line)| !line.starts_with("---"))
}

/// Accumulates rules and emits a frozen [`Grammar`].
///
/// The builder registers every symbol occurring in an added rule into the
/// derived vocabularies; `build` validates that the root and every referenced
/// nonterminal have a rule entry.
#[derive(Debug)]
pub struct GrammarBuilder {
    root: Nonterminal,
    rules: BTreeMap<Nonterminal, AlternativeSet>,
    nonterminals: BTreeSet<Nonterminal>,
    terminals: BTreeSet<Terminal>,
}

impl GrammarBuilder {
    /// Create an empty builder for a grammar rooted at `root`
    pub fn new(root: Nonterminal) -> Self {
        let mut nonterminals = BTreeSet::new();
        nonterminals.insert(root.clone());
        GrammarBuilder {
            root,
            rules: BTreeMap::new(),
            nonterminals,
            terminals: BTreeSet::new(),
        }
    }

    /// Insert `seq` as an alternative for `nt`; returns whether it was newly
    /// added (false = structural duplicate, discarded). Every symbol of
    /// `seq`, and `nt` itself, is registered into the vocabularies.
    pub fn add_rule(&mut self, nt: &Nonterminal, seq: Sequence) -> bool {
        self.nonterminals.insert(nt.clone());
        for symbol in &seq {
            match symbol {
                Symbol::Terminal(t) => {
                    self.terminals.insert(t.clone());
                }
                Symbol::Nonterminal(n) => {
                    self.nonterminals.insert(n.clone());
                }
            }
        }
        self.rules.entry(nt.clone()).or_default().insert(seq)
    }

    /// Insert several alternatives for `nt`
    pub fn add_rules(&mut self, nt: &Nonterminal, seqs: impl IntoIterator<Item = Sequence>) {
        for seq in seqs {
            self.add_rule(nt, seq);
        }
    }

    /// Reassign the root, e.g. after a transformation introduced a fresh one
    pub fn set_root(&mut self, root: Nonterminal) {
        self.nonterminals.insert(root.clone());
        self.root = root;
    }

    /// Emit the frozen grammar.
    ///
    /// Fails with `MissingRule` when the root or any nonterminal referenced
    /// on a right-hand side has no alternative set of its own.
    pub fn build(self) -> Result<Grammar> {
        if !self.rules.contains_key(&self.root) {
            return Err(GrammarError::MissingRule(self.root.name().to_string()));
        }
        for alternatives in self.rules.values() {
            for seq in alternatives {
                for symbol in seq {
                    if let Symbol::Nonterminal(nt) = symbol {
                        if !self.rules.contains_key(nt) {
                            return Err(GrammarError::MissingRule(nt.name().to_string()));
                        }
                    }
                }
            }
        }
        let symbols = self
            .nonterminals
            .iter()
            .cloned()
            .map(Symbol::from)
            .chain(self.terminals.iter().cloned().map(Symbol::from))
            .collect();
        Ok(Grammar {
            root: self.root,
            rules: self.rules,
            nonterminals: self.nonterminals,
            terminals: self.terminals,
            symbols,
        })
    }
}
