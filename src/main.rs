use clap::{App, Arg};
use gluing::formula::problem::{parse, parse_file, Problem};
use gluing::*;
use log::{error, info};

fn main() {
    env_logger::init();

    let matches = App::new("gluing")
        .arg(Arg::with_name("INPUT").help("input file (clauses and assignments)").index(1))
        .get_matches();

    let problem = if let Some(path) = matches.value_of("INPUT") {
        parse_file(path)
    } else {
        parse(std::io::stdin())
    };

    let exit_code = match problem {
        Ok(problem) => match run(&problem) {
            Ok(Propagation::NoConflict) => 0,
            Ok(Propagation::Conflict(_)) => 1,
            Err(e) => {
                error!("{}", e);
                -1
            }
        },
        Err(e) => {
            error!("parse error: {}", e);
            -1
        }
    };
    std::process::exit(exit_code);
}

fn run(problem: &Problem) -> Result<Propagation, Error> {
    let (mut propagator, matrix) = problem.load()?;
    let result = problem.replay(&mut propagator, &matrix)?;
    match result {
        Propagation::Conflict(clause) => info!(
            "{} clause {} violated after {} assignments",
            propagator[clause].kind(),
            clause,
            propagator.trail().len()
        ),
        Propagation::NoConflict => info!(
            "no violated clause; {} of {} clauses fully assigned",
            propagator.clauses().filter(|(_, c)| c.is_full()).count(),
            propagator.num_clauses()
        ),
    }
    Ok(result)
}
