use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::utils::{GrammarError, Result};

/// The two namespaces a symbol name can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolKind {
    Terminal,
    Nonterminal,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SymbolKind::Terminal => "terminal",
            SymbolKind::Nonterminal => "nonterminal",
        })
    }
}

/// A terminal symbol; appears in derived sentences
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Terminal(Arc<str>);

/// A nonterminal symbol; defined by the alternatives of its rule
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nonterminal(Arc<str>);

impl Terminal {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Nonterminal {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A grammar symbol, either terminal or nonterminal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    Nonterminal(Nonterminal),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(t) => t.name(),
            Symbol::Nonterminal(nt) => nt.name(),
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Terminal(_) => SymbolKind::Terminal,
            Symbol::Nonterminal(_) => SymbolKind::Nonterminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Symbol::Terminal(t) => Some(t),
            Symbol::Nonterminal(_) => None,
        }
    }

    pub fn as_nonterminal(&self) -> Option<&Nonterminal> {
        match self {
            Symbol::Terminal(_) => None,
            Symbol::Nonterminal(nt) => Some(nt),
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Self {
        Symbol::Terminal(t)
    }
}

impl From<Nonterminal> for Symbol {
    fn from(nt: Nonterminal) -> Self {
        Symbol::Nonterminal(nt)
    }
}

// Symbols order by name; the kind only breaks ties between symbols
// from different tables that share a name.
impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name()
            .cmp(other.name())
            .then_with(|| self.kind().cmp(&other.kind()))
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Interning table handing out one canonical symbol per distinct name.
///
/// Terminal and nonterminal names live in disjoint namespaces: re-requesting
/// a name with the same kind returns the existing shared instance, while
/// requesting it with the other kind fails with [`GrammarError::NameClash`].
/// The table is an explicit, caller-owned value; grammars built from its
/// symbols stay valid after the table is dropped.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<Arc<str>, SymbolKind>,
}

impl SymbolTable {
    /// Create a new empty symbol table
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Intern `name` as a terminal symbol
    pub fn terminal(&mut self, name: &str) -> Result<Terminal> {
        Ok(Terminal(self.intern(name, SymbolKind::Terminal)?))
    }

    /// Intern `name` as a nonterminal symbol
    pub fn nonterminal(&mut self, name: &str) -> Result<Nonterminal> {
        Ok(Nonterminal(self.intern(name, SymbolKind::Nonterminal)?))
    }

    /// Retrieve an already interned symbol, or `None` for an unknown name
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        let (canonical, kind) = self.symbols.get_key_value(name)?;
        Some(match kind {
            SymbolKind::Terminal => Symbol::Terminal(Terminal(Arc::clone(canonical))),
            SymbolKind::Nonterminal => Symbol::Nonterminal(Nonterminal(Arc::clone(canonical))),
        })
    }

    /// Number of distinct symbols interned so far
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn intern(&mut self, name: &str, kind: SymbolKind) -> Result<Arc<str>> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(GrammarError::InvalidName(name.to_string()));
        }
        if let Some((canonical, existing)) = self.symbols.get_key_value(name) {
            if *existing != kind {
                return Err(GrammarError::NameClash {
                    name: name.to_string(),
                    existing: *existing,
                });
            }
            return Ok(Arc::clone(canonical));
        }
        let canonical: Arc<str> = Arc::from(name);
        self.symbols.insert(Arc::clone(&canonical), kind);
        Ok(canonical)
    }
}
