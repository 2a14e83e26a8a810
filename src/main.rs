// ABOUTME: Batch script runner for the vau-lisp interpreter

use clap::Parser;
use std::io::Read as _;
use std::path::PathBuf;
use vau_lisp::{builtins, config, env::Environment, reader, step};

/// A metacircular vau-calculus Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "vau-lisp")]
#[command(version = config::VERSION)]
#[command(about = "A metacircular vau-calculus Lisp interpreter")]
struct CliArgs {
    /// Script file to execute (reads stdin if omitted)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Step quota passed to the evaluator for each top-level form
    #[arg(long, value_name = "STEPS", default_value_t = config::DEFAULT_FUEL)]
    fuel: usize,

    /// Suppress echoing each form's printed result
    #[arg(long)]
    quiet: bool,

    /// Evaluate a single inline expression instead of reading a script
    #[arg(short = 'e', long = "eval", value_name = "EXPR")]
    eval: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let source = read_source(&args)?;

    let env = Environment::new();
    builtins::register_all(&env);

    let forms = reader::read_all(&source).map_err(|e| format!("{e}"))?;
    for form in forms {
        let printed_form = form.to_string();
        match step::eval_top(form, env.clone(), args.fuel) {
            Ok(value) => {
                if !args.quiet {
                    println!("{printed_form} => {value}");
                }
            }
            Err(err) => eprintln!("{printed_form} => error: {err}"),
        }
    }

    Ok(())
}

fn read_source(args: &CliArgs) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(expr) = &args.eval {
        return Ok(expr.clone());
    }
    if let Some(path) = &args.script {
        return Ok(std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read script file {}: {}", path.display(), e))?);
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
