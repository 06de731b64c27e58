//! Builds SLR(1) tables for a grammar file and runs them over token
//! strings given on the command line or typed on standard input.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use slrgen::{bnf, report, Grammar, Parser};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
  /// Grammar file, one `LHS -> seq | seq` rule per line
  grammar: PathBuf,

  /// Token string to parse, e.g. "id + id * id" (repeatable).
  /// Lines are read from standard input when absent.
  #[arg(short, long)]
  input: Vec<String>,

  /// Print the FOLLOW sets
  #[arg(long)]
  follow: bool,

  /// Print the canonical collection of LR(0) item sets
  #[arg(long)]
  collection: bool,

  /// Print the ACTION and GOTO tables
  #[arg(long)]
  table: bool,

  /// Print only the verdict of each parse, not its steps
  #[arg(short, long)]
  quiet: bool,
}

fn main() -> Result<()> {
  env_logger::init();

  let args = Args::parse();

  let text = std::fs::read_to_string(&args.grammar)
    .with_context(|| format!("can't read {:?}", args.grammar))?;
  let source = bnf::parse(&text);
  for skipped in &source.skipped {
    eprintln!("warning: {}", skipped);
  }
  let grammar = Grammar::new(source.rules)?;
  let parser = slrgen::build(grammar)?;

  if args.follow {
    println!("{}", report::follow(&parser));
  }
  if args.collection {
    println!("{}", report::collection(&parser));
  }
  if args.table {
    println!("{}", report::table(&parser));
  } else if !parser.table().is_slr1() {
    eprintln!(
      "warning: grammar is not SLR(1), {} conflicts resolved by the later entry",
      parser.table().conflicts().len());
  }

  if !args.input.is_empty() {
    for line in &args.input {
      run(&parser, line, args.quiet);
    }
    return Ok(());
  }

  let stdin = io::stdin();
  let mut lines = stdin.lock().lines();
  loop {
    print!("> ");
    io::stdout().flush()?;
    let line = match lines.next() {
      Some(line) => line?,
      None => break,
    };
    run(&parser, &line, args.quiet);
  }

  Ok(())
}

fn run(parser: &Parser, line: &str, quiet: bool) {
  let trace = parser.parse_str(line);
  if quiet {
    match trace.error() {
      None => println!("accepted"),
      Some(err) => println!("rejected: {}", err),
    }
  } else {
    print!("{}", report::trace(parser, &trace));
  }
}
