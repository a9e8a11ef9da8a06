use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use cfg_kit::{eliminate_epsilon, sample_sentence, Grammar, Language, Nonterminal, SymbolTable};

/// Context-free grammar toolbox
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a grammar file and print it back
    Show {
        #[arg(help = "Path to the grammar file")]
        grammar_file: PathBuf,
    },
    /// Report the deletable nonterminals and epsilon-freedom
    Analyze {
        #[arg(help = "Path to the grammar file")]
        grammar_file: PathBuf,
    },
    /// Print the epsilon-free equivalent of a grammar
    Eliminate {
        #[arg(help = "Path to the grammar file")]
        grammar_file: PathBuf,
    },
    /// Enumerate all sentences up to a length bound
    Language {
        #[arg(help = "Path to the grammar file")]
        grammar_file: PathBuf,

        #[arg(help = "Maximum sentence length", default_value = "6")]
        max_len: usize,

        #[arg(long, help = "Emit the language as JSON")]
        json: bool,
    },
    /// Derive random sentences
    Sample {
        #[arg(help = "Path to the grammar file")]
        grammar_file: PathBuf,

        #[arg(help = "Number of sentences to derive", default_value = "1")]
        count: usize,

        #[arg(long, default_value = "64", help = "Nonterminal expansion budget")]
        max_depth: usize,
    },
}

#[derive(Serialize)]
struct LanguageReport {
    root: String,
    max_len: usize,
    count: usize,
    sentences: Vec<Vec<String>>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let mut symbols = SymbolTable::new();

    match cli.command {
        Commands::Show { grammar_file } => {
            let grammar = Grammar::from_file(&grammar_file, &mut symbols)?;
            print!("{}", grammar);
        }
        Commands::Analyze { grammar_file } => {
            let grammar = Grammar::from_file(&grammar_file, &mut symbols)?;
            let deletable = grammar.deletable_nonterminals();
            let names: Vec<&str> = deletable.iter().map(Nonterminal::name).collect();
            println!("deletable nonterminals: {{ {} }}", names.join(", "));
            println!("epsilon-free: {}", grammar.is_epsilon_free());
            println!(
                "root has epsilon alternative: {}",
                grammar.root_has_epsilon_alternative()
            );
        }
        Commands::Eliminate { grammar_file } => {
            let grammar = Grammar::from_file(&grammar_file, &mut symbols)?;
            let rewritten = eliminate_epsilon(&grammar, &mut symbols)?;
            print!("{}", rewritten);
        }
        Commands::Language { grammar_file, max_len, json } => {
            let grammar = Grammar::from_file(&grammar_file, &mut symbols)?;
            let language = Language::of(&grammar, max_len);
            if json {
                let report = LanguageReport {
                    root: grammar.root().name().to_string(),
                    max_len,
                    count: language.len(),
                    sentences: language
                        .sentences()
                        .map(|s| s.iter().map(|sy| sy.name().to_string()).collect())
                        .collect(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} sentences of length <= {}:", language.len(), max_len);
                print!("{}", language);
            }
        }
        Commands::Sample { grammar_file, count, max_depth } => {
            let grammar = Grammar::from_file(&grammar_file, &mut symbols)?;
            let mut rng = rand::thread_rng();
            for i in 0..count {
                match sample_sentence(&grammar, max_depth, &mut rng) {
                    Some(sentence) => println!("{}. {}", i + 1, sentence),
                    None => println!("{}. <expansion budget exhausted>", i + 1),
                }
            }
        }
    }

    Ok(())
}
