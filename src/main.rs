use clap::{value_t, App, Arg, ArgMatches};
use propsat::formula::{dimacs, parse};
use propsat::*;
use std::fs::File;
use std::io::Read;
use std::time::Duration;

fn main() {
    env_logger::init();

    let matches = App::new("propsat")
        .about("Decides propositional formulas with the Tseitin encoding and DPLL")
        .arg(Arg::with_name("INPUT").help("input file (stdin if absent)").index(1))
        .arg(
            Arg::with_name("dimacs")
                .long("dimacs")
                .help("read the input as DIMACS CNF instead of a formula"),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .short("t")
                .takes_value(true)
                .value_name("MS")
                .help("give up after this many milliseconds"),
        )
        .arg(
            Arg::with_name("fixpoint")
                .long("fixpoint")
                .help("propagate unit clauses to a fixpoint at every step"),
        )
        .arg(
            Arg::with_name("show-cnf")
                .long("show-cnf")
                .help("print the clauses before solving"),
        )
        .get_matches();

    let cnf = match read_cnf(&matches) {
        Ok(cnf) => cnf,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(-1);
        }
    };
    if matches.is_present("show-cnf") {
        println!("{}", cnf);
    }

    let mut solver = Solver::new(cnf).with_options(solver_options(&matches));
    let exit_code = match solver.solve() {
        Ok(SatResult::Satisfiable(model)) => {
            println!("SAT");
            print!("{}", model);
            0
        }
        Ok(SatResult::Unsatisfiable(residual)) => {
            println!("UNSAT");
            println!("{}", residual);
            1
        }
        Err(e @ Error::Timeout(_)) => {
            eprintln!("{}", e);
            2
        }
        Err(e) => {
            eprintln!("error: {}", e);
            -1
        }
    };
    std::process::exit(exit_code);
}

fn read_cnf(matches: &ArgMatches) -> Result<Cnf> {
    let input: Box<dyn Read> = match matches.value_of("INPUT") {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(std::io::stdin()),
    };

    if matches.is_present("dimacs") {
        dimacs::parse(input)
    } else {
        let formula = parse::parse_reader(input)?;
        Ok(transform(&formula))
    }
}

fn solver_options(matches: &ArgMatches) -> SolverOptions {
    let mut options = SolverOptions::new();
    if matches.is_present("timeout") {
        let ms = value_t!(matches, "timeout", u64).unwrap_or_else(|e| e.exit());
        options = options.with_timeout(Duration::from_millis(ms));
    }
    if matches.is_present("fixpoint") {
        options = options.with_propagation(Propagation::Fixpoint);
    }
    options
}
