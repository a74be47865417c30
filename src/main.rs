use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use bfi::engine::Engine;
use bfi::lower::lower_to_c;
use bfi::op;
use clap::{ArgGroup, Parser};

#[derive(Parser)]
#[command(name = "bfi", about = "Brainfuck interpreter and Brainfuck-to-C translator")]
#[command(group(ArgGroup::new("action").required(true).args(["execute", "compile"])))]
struct Cli {
    /// Run the program through the interpreter.
    #[arg(short = 'x', long)]
    execute: bool,

    /// Translate the program to C instead of running it.
    #[arg(short, long)]
    compile: bool,

    /// Brainfuck program file (defaults to standard input).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the generated C (defaults to standard output).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let source = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read program from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read program from stdin")?;
            buf
        }
    };

    if cli.execute {
        let mut engine = Engine::new(&source);
        engine.run().context("execution failed")?;
    } else {
        let c_source = lower_to_c(&op::parse(&source));
        match &cli.output {
            Some(path) => fs::write(path, &c_source)
                .with_context(|| format!("failed to write C source to {}", path.display()))?,
            None => io::stdout()
                .lock()
                .write_all(c_source.as_bytes())
                .context("failed to write C source")?,
        }
    }
    Ok(())
}
