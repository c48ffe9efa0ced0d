use clap::{Parser as ClapParser, Subcommand};
use spl_lang::ParseOptions;
use spl_lang::cli::{self, CheckMode, CheckOptions, CheckResult, CliError};
use spl_lang::parser::DEFAULT_MAX_DEPTH;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "spl")]
#[command(about = "Parse pipelined SPL-style search queries into a structured tree")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and print its tree as JSON
    Parse {
        /// The query (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Deepest allowed nesting of groups and negations
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Only validate a query's syntax
    Check {
        /// The query (reads from stdin if not provided)
        query: Option<String>,

        /// Deepest allowed nesting of groups and negations
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Print a query in canonical form
    Fmt {
        /// The query (reads from stdin if not provided)
        query: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'spl docs' to list categories)
        category: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            query,
            pretty,
            max_depth,
        } => run_check(query, CheckMode::Tree, pretty, max_depth),
        Commands::Check { query, max_depth } => {
            run_check(query, CheckMode::SyntaxOnly, false, max_depth)
        }
        Commands::Fmt { query } => run_check(query, CheckMode::Format, false, DEFAULT_MAX_DEPTH),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end().to_string())
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(
    query: Option<String>,
    mode: CheckMode,
    pretty: bool,
    max_depth: usize,
) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_query(query)?,
        mode,
        pretty,
        parse: ParseOptions::default().with_max_depth(max_depth),
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Tree(json) => println!("{}", json),
        CheckResult::Formatted(text) => println!("{}", text),
    }
    Ok(())
}
