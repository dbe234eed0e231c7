extern crate dpset;

use std::{env, process};

use dpset::problem_builder::ProblemBuilder;
use dpset::solver::{Heuristic, Solution, SolverConfig};
use dpset::{Literal, Variable};

fn cell(pb: &ProblemBuilder, row: usize, col: usize) -> Literal {
    pb.var(&format!("V({},{})", row, col))
}

// No two queens share a row or a diagonal, and every column holds a queen. Together these force
// exactly one queen per row.
fn queens(n: usize) -> ProblemBuilder {
    let mut pb = ProblemBuilder::new();
    for row in 1..=n {
        let cells: Vec<_> = (1..=n).map(|col| cell(&pb, row, col)).collect();
        pb.at_most_one(&cells);
    }
    for col in 1..=n {
        let cells: Vec<_> = (1..=n).map(|row| cell(&pb, row, col)).collect();
        pb.require(&cells);
    }
    let n = n as i64;
    for k in (2 - n)..=(n - 2) {
        let cells: Vec<_> = (1..=n)
            .flat_map(|r| (1..=n).map(move |c| (r, c)))
            .filter(|&(r, c)| r - c == k)
            .map(|(r, c)| cell(&pb, r as usize, c as usize))
            .collect();
        pb.at_most_one(&cells);
    }
    for k in 3..=(2 * n - 1) {
        let cells: Vec<_> = (1..=n)
            .flat_map(|r| (1..=n).map(move |c| (r, c)))
            .filter(|&(r, c)| r + c == k)
            .map(|(r, c)| cell(&pb, r as usize, c as usize))
            .collect();
        pb.at_most_one(&cells);
    }
    pb
}

fn print_board(solution: &Solution, n: usize) {
    let border = format!("        {}", "-".repeat(8 * n + 1));
    let blank = format!("        |{}", "       |".repeat(n));
    println!("{}", border);
    for row in 1..=n {
        println!("{}", blank);
        let mut line = "        |".to_string();
        for col in 1..=n {
            let var = Variable::new(&format!("V({},{})", row, col));
            if solution.value_of(&var) == Some(true) {
                line.push_str("   Q   |");
            } else {
                line.push_str("       |");
            }
        }
        println!("{}", line);
        println!("{}", blank);
        println!("{}", border);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let n = match args.get(1).map(|s| s.parse::<usize>()) {
        None => 8,
        Some(Ok(n)) if n > 0 => n,
        _ => {
            eprintln!("n_queens [board size] [random|jw]");
            process::exit(-1);
        }
    };
    let heuristic = match args.get(2).map(String::as_str) {
        Some("jw") => Heuristic::JeroslowWang,
        _ => Heuristic::Random,
    };

    let clauses = queens(n).build();
    eprintln!("{} clauses", clauses.len());
    let solution = dpset::solve_with(&clauses, SolverConfig::new().with_heuristic(heuristic));
    if solution.is_satisfiable() {
        print_board(&solution, n);
        eprintln!("stats={:?}", solution.stats);
    } else {
        println!("The problem is not solvable for {} queens!", n);
    }
}
