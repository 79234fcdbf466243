use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use codesnake::{Block, CodeWidth, Label, LineIndex};
use genome::{
    compiler::{self, primitive::is_identifier},
    tokenize, Command, CompileError, Integer, Sysvars,
};
use yansi::Paint;

/// Compile and run sysvar genomes
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Genome file to compile and run. Starts an interactive session when omitted
    genome: Option<PathBuf>,
    /// Seed a sysvar before running, as NAME=VALUE (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, Integer)>,
    /// Number of times to run the genome against the same sysvars
    #[arg(long, default_value_t = 1)]
    cycles: usize,
    /// Print the compiled commands before running them
    #[arg(long)]
    tree: bool,
}

impl Args {
    fn seeded_sysvars(&self) -> Sysvars {
        self.set
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect()
    }
}

fn parse_assignment(arg: &str) -> Result<(String, Integer), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{arg}`"))?;
    let name = name.trim().trim_start_matches('.');
    if !is_identifier(name) {
        return Err(format!("invalid sysvar name `{name}`"));
    }
    let value = value
        .trim()
        .parse()
        .map_err(|err| format!("invalid value `{value}`: {err}"))?;
    Ok((name.to_owned(), value))
}

fn make_block<'a>(idx: &'a LineIndex, error: &CompileError) -> Option<Block<&'a str, String>> {
    Block::new(
        idx,
        [Label::new(error.payload.span())
            .with_text(error.kind.to_string().red().to_string())
            .with_style(|s| s.red().to_string())],
    )
}

fn report(source: &str, origin: &str, error: &CompileError) {
    eprintln!("{} {error}", "error:".red().bold());

    // The synthetic token points nowhere in the source
    if error.payload.span().is_empty() {
        return;
    }
    let idx = LineIndex::new(source);
    if let Some(block) = make_block(&idx, error) {
        let block = block.map_code(|c| CodeWidth::new(c, c.len()));
        eprintln!("{}[{origin}]", block.prologue());
        eprint!("{block}");
        eprintln!("{}", block.epilogue());
    }
}

fn run_file(path: &Path, args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read genome {}", path.display()))?;
    let origin = path.display().to_string();

    let genome = match genome::compile(&source) {
        Ok(genome) => genome,
        Err(err) => {
            report(&source, &origin, &err);
            anyhow::bail!("could not compile {origin}");
        }
    };
    if args.tree {
        print!("{}", genome.dim());
    }

    let mut sysvars = args.seeded_sysvars();
    for _ in 0..args.cycles {
        genome.run(&mut sysvars);
    }
    print!("{sysvars}");
    Ok(())
}

/// A line opening with `start` is one or more bodies, anything else a single expression.
fn compile_line(source: &str) -> Result<Vec<Command>, CompileError> {
    let tokens = tokenize(source);
    if tokens.first().is_some_and(|t| t.is(compiler::START)) {
        compiler::compile_genome(&tokens).map(|genome| genome.bodies().to_vec())
    } else {
        compiler::compile_complete_expression(&tokens).map(|command| vec![command])
    }
}

/// Runs a `:vars` or `:clear` session command, returning what to print.
/// Any other line is `None` and gets compiled instead.
fn session_command(line: &str, sysvars: &mut Sysvars) -> Option<String> {
    match line {
        ":vars" => Some(sysvars.to_string()),
        ":clear" => {
            // `Paint::clear` would shadow the method call
            Sysvars::clear(sysvars);
            Some(String::new())
        }
        _ => None,
    }
}

fn repl(args: &Args) -> anyhow::Result<()> {
    let mut readline = rustyline::DefaultEditor::new()?;
    let mut sysvars = args.seeded_sysvars();

    while let Ok(input) = readline.readline(">> ") {
        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(output) = session_command(line, &mut sysvars) {
            print!("{output}");
            continue;
        }
        _ = readline.add_history_entry(line);

        let commands = match compile_line(&input) {
            Ok(commands) => commands,
            Err(err) => {
                report(&input, "repl", &err);
                continue;
            }
        };
        let mut last = 0;
        for command in &commands {
            if args.tree {
                println!("{}", command.dim());
            }
            last = command.run(&mut sysvars);
        }
        println!("{}", last.green());
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    match &args.genome {
        Some(path) => run_file(path, &args),
        None => repl(&args),
    }
}
