mod environment;
mod lexer;

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr, miette};
use xabsl::{Clock, Engine, EngineOptions, Symbols, render_error};

/// Xabsl - run option graphs against a simulated environment
#[derive(Parser, Debug)]
#[command(name = "xabsl")]
#[command(about = "Execute Xabsl intermediate code", long_about = None)]
struct Args {
    /// Environment file declaring symbols, enumerations and basic behaviors
    #[arg(long)]
    env: Option<PathBuf>,

    /// Number of cycles to execute
    #[arg(long, default_value_t = 1)]
    cycles: u64,

    /// Agent whose root option is executed (default: the first agent)
    #[arg(long)]
    agent: Option<String>,

    /// Simulated milliseconds between two cycles
    #[arg(long, default_value_t = 100)]
    step_ms: u64,

    /// Longest accepted token of the intermediate code, in bytes
    #[arg(long, default_value_t = EngineOptions::default().max_token_length)]
    max_token_length: usize,

    /// Intermediate code file
    ic_file: PathBuf,
}

fn print_set_outputs(symbols: &Symbols) {
    for symbol in symbols.decimal_output_symbols().values() {
        if symbol.active_value_was_set() {
            println!("  {} = {}", symbol.name(), symbol.value());
        }
    }
    for symbol in symbols.boolean_output_symbols().values() {
        if symbol.active_value_was_set() {
            println!("  {} = {}", symbol.name(), symbol.value());
        }
    }
    for symbol in symbols.enumerated_output_symbols().values() {
        if symbol.active_value_was_set() {
            match symbols.enumerated_output_element(symbol.name()) {
                Some(element) => println!("  {} = {}", symbol.name(), element),
                None => println!("  {} = {}", symbol.name(), symbol.value()),
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG to control the log level, WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let declarations = match &args.env {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            environment::parse(&source)?
        }
        None => Vec::new(),
    };
    let ic = std::fs::read_to_string(&args.ic_file)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", args.ic_file.display()))?;

    let time = Rc::new(Cell::new(0));
    let clock = Clock::new({
        let time = time.clone();
        move || time.get()
    });
    let options = EngineOptions {
        max_token_length: args.max_token_length,
        ..EngineOptions::default()
    };
    let mut engine = Engine::new(options, clock, |env| {
        environment::register(&declarations, env)
    })
    .map_err(|e| {
        render_error(&e);
        miette!("invalid environment")
    })?;

    if let Err(e) = engine.create_option_graph(&ic) {
        render_error(&e);
        return Err(miette!("failed to build the option graph"));
    }
    if let Some(agent) = &args.agent {
        engine.set_selected_agent(agent).map_err(|e| miette!("{}", e))?;
    }

    for cycle in 0..args.cycles {
        if cycle > 0 {
            time.set(time.get() + args.step_ms);
        }
        engine.execute().map_err(|e| miette!("{}", e))?;

        println!("cycle {} ({} ms)", engine.cycle(), time.get());
        for behavior in engine.active_behaviors() {
            println!("{}", behavior);
        }
        println!("outputs:");
        print_set_outputs(engine.symbols());
    }

    Ok(())
}
