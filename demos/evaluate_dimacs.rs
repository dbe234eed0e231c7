extern crate dpset;
extern crate itertools;

use itertools::Itertools;
use dpset::dimacs;
use dpset::solver::{Heuristic, SolverConfig};
use std::{env, process};

use thiserror::Error;

#[derive(Error, Debug)]
enum Error {
    #[error("failed to parse input")]
    ParsingError(#[from] dimacs::DimacsError),
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (filepath, heuristic) = match args.len() {
        2 => (&args[1], Heuristic::Random),
        3 if args[2] == "jw" => (&args[1], Heuristic::JeroslowWang),
        _ => {
            eprintln!("evaluate_dimacs [path to problem file] [jw]");
            process::exit(-1);
        }
    };
    match run(filepath, heuristic) {
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("execution failed");
            process::exit(-1);
        }
        Ok(()) => return,
    }
}

fn run(filepath: &str, heuristic: Heuristic) -> Result<(), Error> {
    let clauses = dimacs::parse(filepath)?;

    eprintln!("evaluating");
    let sol = dpset::solve_with(&clauses, SolverConfig::new().with_heuristic(heuristic));
    match sol.assignments() {
        None => println!("s UNSATISFIABLE"),
        Some(mut assignments) => {
            println!("s SATISFIABLE");
            assignments.sort_by_key(|lit| lit.var().name().parse::<u64>().unwrap_or(u64::MAX));
            let solution = assignments
                .iter()
                .map(|lit| format!("{}{}", if lit.polarity() { "" } else { "-" }, lit.var()))
                .join(" ");
            println!("v {} 0", solution);
        }
    }
    eprintln!("stats={:?}", sol.stats);
    Ok(())
}
