use std::error::Error;

use cfg_kit::{eliminate_epsilon, Grammar, Language, SymbolTable};

/// Walkthrough: analyze and transform a grammar of balanced a/b sentences,
/// then enumerate its bounded language.
fn main() -> Result<(), Box<dyn Error>> {
    let mut symbols = SymbolTable::new();

    let grammar = Grammar::parse(
        "G(S):\n\
         S -> E ;\n\
         E -> a A b E | b B a E | eps\n\
         A -> a A b A | eps\n\
         B -> b B a B | eps\n",
        &mut symbols,
    )?;

    println!("original grammar:");
    print!("{}", grammar);

    let deletable = grammar.deletable_nonterminals();
    let names: Vec<&str> = deletable.iter().map(|nt| nt.name()).collect();
    println!("\ndeletable nonterminals: {{ {} }}", names.join(", "));
    println!("epsilon-free: {}", grammar.is_epsilon_free());

    let rewritten = eliminate_epsilon(&grammar, &mut symbols)?;
    println!("\nepsilon-free equivalent:");
    print!("{}", rewritten);

    let language = Language::of(&rewritten, 5);
    println!("\nsentences up to length 5 ({} total):", language.len());
    print!("{}", language);

    Ok(())
}
