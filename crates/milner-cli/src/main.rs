use std::process::ExitCode;

use clap::Parser;
use milner_checker::{Checker, Config};
use milner_tree::Builder;

mod demos;
mod logger;
mod prelude;

use demos::{Demo, DEMOS};

/// Infers principal types for a set of demo programs.
#[derive(Parser, Debug)]
#[command(name = "milner", version)]
struct Cli {
    /// Demos to check, every demo when none is given.
    names: Vec<String>,

    /// Report every type error instead of stopping at the first one.
    #[arg(short, long)]
    collect: bool,

    /// List the demos and exit.
    #[arg(short, long)]
    list: bool,

    /// Print the names the demos can use and exit.
    #[arg(short, long)]
    prelude: bool,

    /// Print the typed tree of each accepted demo.
    #[arg(short, long)]
    tree: bool,

    /// Show more log output, can be repeated.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(checker: &Checker, demo: &Demo, show_tree: bool) -> bool {
    let expr = (demo.build)(&Builder::new());

    match checker.infer(&expr) {
        Ok(inferred) => {
            println!("{} : {}", demo.name, inferred.scheme);
            if show_tree {
                print!("{}", inferred.tree);
            }
            true
        }
        Err(errors) => {
            println!("{} : rejected", demo.name);
            for err in errors {
                eprintln!("{}", err.to_diagnostic().with_node(&expr));
            }
            false
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if cli.list {
        for demo in DEMOS {
            println!("{:<10} {}", demo.name, demo.summary);
        }
        return ExitCode::SUCCESS;
    }

    let selected: Vec<&Demo> = if cli.names.is_empty() {
        DEMOS.iter().collect()
    } else {
        let mut selected = Vec::with_capacity(cli.names.len());
        for name in &cli.names {
            let Some(demo) = demos::find(name) else {
                eprintln!("unknown demo '{name}', use --list to see them");
                return ExitCode::FAILURE;
            };
            selected.push(demo);
        }
        selected
    };

    let env = match prelude::prelude() {
        Ok(env) => env,
        Err(err) => {
            tracing::error!(%err, "the prelude is malformed");
            return ExitCode::FAILURE;
        }
    };

    if cli.prelude {
        println!("{env}");
        return ExitCode::SUCCESS;
    }

    let config = if cli.collect {
        Config::default().collect_all()
    } else {
        Config::default()
    };
    let checker = Checker::new(env, config);

    let mut accepted = true;
    for demo in selected {
        accepted &= run(&checker, demo, cli.tree);
    }

    if cli.names.is_empty() || accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
