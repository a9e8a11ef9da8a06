use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use cfg_kit::{eliminate_epsilon, Grammar, GrammarError, Language, Sequence, SymbolTable};

const BALANCED_GRAMMAR: &str = "G(S):\n\
                                S -> a B | b A\n\
                                A -> a | a S | b A A\n\
                                B -> b | b S | a B B\n";

// Every sentence of the balanced-count grammar up to length 6.
const BALANCED_SENTENCES: [&str; 28] = [
    "a a a b b b",
    "a a b a b b",
    "a a b b",
    "a a b b a b",
    "a a b b b a",
    "a b",
    "a b a a b b",
    "a b a b",
    "a b a b a b",
    "a b a b b a",
    "a b b a",
    "a b b a a b",
    "a b b a b a",
    "a b b b a a",
    "b a",
    "b a a a b b",
    "b a a b",
    "b a a b a b",
    "b a a b b a",
    "b a b a",
    "b a b a a b",
    "b a b a b a",
    "b a b b a a",
    "b b a a",
    "b b a a a b",
    "b b a a b a",
    "b b a b a a",
    "b b b a a a",
];

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "// balanced a/b sentences\n{}---\nanything after the separator is ignored\n",
        BALANCED_GRAMMAR
    )
    .unwrap();

    let mut symbols = SymbolTable::new();
    let grammar = Grammar::from_file(file.path(), &mut symbols).unwrap();

    assert_eq!(grammar.root().name(), "S");
    assert_eq!(grammar.rules().len(), 3);
    assert_eq!(grammar.terminals().len(), 2);
}

#[test]
fn test_missing_file_reports_io_error() {
    let mut symbols = SymbolTable::new();
    let err = Grammar::from_file("no/such/grammar.txt", &mut symbols).unwrap_err();
    assert!(matches!(err, GrammarError::Io(_)));
}

#[test]
fn test_bounded_language_of_balanced_grammar() {
    let mut symbols = SymbolTable::new();
    let grammar = Grammar::parse(BALANCED_GRAMMAR, &mut symbols).unwrap();

    let language = Language::of(&grammar, 6);
    assert_eq!(language.len(), 28);

    let expected: Vec<Sequence> = BALANCED_SENTENCES
        .iter()
        .map(|text| Sequence::parse(text, &symbols).unwrap())
        .collect();
    assert!(language.has_all_sentences(&expected));

    let found: Vec<String> = language.sentences().map(Sequence::to_string).collect();
    let wanted: Vec<String> = expected.iter().map(Sequence::to_string).collect();
    assert_eq!(found, wanted);

    // nothing exceeds the bound and nothing is unbalanced
    for sentence in &language {
        assert!(sentence.len() <= 6);
        let a_count = sentence.iter().filter(|sy| sy.name() == "a").count();
        assert_eq!(a_count * 2, sentence.len());
    }
}

#[test]
fn test_language_grows_monotonically() {
    let mut symbols = SymbolTable::new();
    let grammar = Grammar::parse(BALANCED_GRAMMAR, &mut symbols).unwrap();

    let mut previous = Language::of(&grammar, 0);
    assert!(previous.is_empty());
    for max_len in 1..=8 {
        let current = Language::of(&grammar, max_len);
        assert!(current.has_all_sentences(&previous));
        assert!(current.len() >= previous.len());
        previous = current;
    }
}

#[test]
fn test_epsilon_elimination_end_to_end() {
    let mut symbols = SymbolTable::new();
    let grammar = Grammar::parse(
        "G(S):\nS -> A B C\nA -> B B | eps\nB -> C C | a\nC -> A A | b\n",
        &mut symbols,
    )
    .unwrap();
    assert!(!grammar.is_epsilon_free());

    let rewritten = eliminate_epsilon(&grammar, &mut symbols).unwrap();
    assert!(rewritten.is_epsilon_free());
    assert!(rewritten.root_has_epsilon_alternative());
    assert_eq!(rewritten.root().name(), "S'");

    // the non-empty sentences are untouched by the rewrite
    for max_len in [2, 4, 6] {
        let original = Language::of(&grammar, max_len);
        let transformed = Language::of(&rewritten, max_len);
        assert_eq!(original, transformed);
    }

    // a second elimination changes nothing below the root
    let again = eliminate_epsilon(&rewritten, &mut symbols).unwrap();
    assert!(again.is_epsilon_free());
    assert_eq!(Language::of(&again, 4), Language::of(&rewritten, 4));
}

#[test]
fn test_elimination_keeps_epsilon_free_grammars_intact() {
    let mut symbols = SymbolTable::new();
    let grammar = Grammar::parse(BALANCED_GRAMMAR, &mut symbols).unwrap();

    let rewritten = eliminate_epsilon(&grammar, &mut symbols).unwrap();
    assert_eq!(rewritten, grammar);
}

#[test]
fn test_print_parse_round_trip() {
    let mut symbols = SymbolTable::new();
    let grammar = Grammar::parse(BALANCED_GRAMMAR, &mut symbols).unwrap();

    let printed = grammar.to_string();
    let reparsed = Grammar::parse(&printed, &mut symbols).unwrap();
    assert_eq!(reparsed, grammar);

    // printing the reparsed grammar is stable
    assert_eq!(reparsed.to_string(), printed);
}

#[test]
fn test_builder_errors_surface_from_notation() {
    let mut symbols = SymbolTable::new();

    let err = Grammar::parse("G(S):\nS ->\n  -> a\n", &mut symbols).unwrap_err();
    assert!(matches!(err, GrammarError::Syntax { line: 3, .. }));

    let err = Grammar::parse("G(Start):\nOther -> a\n", &mut symbols).unwrap_err();
    assert!(matches!(err, GrammarError::MissingRule(name) if name == "Start"));
}
