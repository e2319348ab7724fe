//! Clap argument definitions for the `sift` CLI.

use std::{env, process::exit};

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "sift - Parse and inspect full-text search queries")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that override the `[parser]` and `[analysis]` settings.
#[derive(Args, Debug, Clone, Default)]
pub struct ParserArgs {
    /// Fields a query may name (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Fields searched when a query names none (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub default_fields: Option<Vec<String>>,

    /// Fields whose text is analyzed; others match verbatim (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub tokenized_fields: Option<Vec<String>>,

    /// Join juxtaposed clauses with AND instead of OR
    #[arg(long)]
    pub and: bool,

    /// Search the whole input as one term if it cannot be parsed
    #[arg(long)]
    pub lenient: bool,

    /// Repair unbalanced quotes and parentheses before parsing
    #[arg(long)]
    pub clean: bool,

    /// Accept field names that are not configured
    #[arg(long)]
    pub any_field: bool,

    /// Treat AND, OR, NOT and REQ as plain words
    #[arg(long)]
    pub no_keywords: bool,

    /// Clause limit for field and term expansion [default: 512]
    #[arg(long)]
    pub max_clauses: Option<usize>,

    /// Analyzer: standard, whitespace, keyword, or a stemming language [default: standard]
    #[arg(short = 'a', long)]
    pub analyzer: Option<String>,
}

/// Arguments for `sift parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Queries to parse
    #[arg(required = true)]
    pub queries: Vec<String>,

    #[command(flatten)]
    /// Parser setting overrides.
    pub parser: ParserArgs,

    /// Print each query as re-parseable query text
    #[arg(short = 'q', long, conflicts_with = "json")]
    pub query_string: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sift clean`.
#[derive(Args, Debug, Clone)]
pub struct CleanCommand {
    /// Query text to clean
    pub query: String,
}

/// Arguments for `sift tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    /// Text to analyze
    pub text: String,

    /// Field whose analyzer is used [default: first default field]
    #[arg(short = 'f', long)]
    pub field: Option<String>,

    /// Analyzer: standard, whitespace, keyword, or a stemming language
    #[arg(short = 'a', long)]
    pub analyzer: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse queries and print the query tree
    #[command(after_help = "\
QUERY SYNTAX:
  term              Term in the default fields
  term1 term2       Either term (both with --and)
  +term / -term     Term required / excluded (also REQ, NOT, !)
  a AND b, a && b   Both
  a OR b, a || b    Either
  (expr)            Grouping
  \"a b\"~2           Phrase, words at most 2 positions out of place
  \"a <> c\"          Phrase with any one word in the gap
  \"red|blue car\"    Phrase with alternatives in a position
  te?m*, term*      Wildcard and prefix
  term~, term~0.8   Fuzzy, with optional minimum similarity
  [a z] {a z} >=a   Ranges, inclusive and exclusive
  term^2            Boost

FIELDS:
  title:term        Search one field
  title|body:term   Search several fields
  *:term            Search every field

EXAMPLES:
  sift parse --fields title,body 'title:(rust OR go) +\"error handling\"~2'
  sift parse -q 'rust -deprecated'
  sift parse --json --lenient 'unbalanced (query'")]
    Parse(ParseCommand),

    /// Repair query text and print the result
    Clean(CleanCommand),

    /// Show the tokens an analyzer produces for some text
    Tokens(TokensCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,

    /// Initialize sift configuration in current directory
    Init(InitCommand),
}

/// Parses CLI arguments, printing a compact command list for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp && env::args().len() <= 2 {
                print_command_list();
                exit(0);
            }
            e.exit();
        }
    }
}

/// Prints the about line and one line per subcommand.
fn print_command_list() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: sift <COMMAND>");
    println!();
    println!("Commands:");
    for sub in cmd.get_subcommands().filter(|s| s.get_name() != "help") {
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {:8} {about}", sub.get_name());
    }
    println!(
        "  {:<8} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -h, --help  Print help");
}
