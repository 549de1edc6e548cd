use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn run(contents: &str, args: &[&str]) -> Output {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    write!(file, "{}", contents).expect("failed to write input");

    Command::new(env!("CARGO_BIN_EXE_propsat"))
        .args(args)
        .arg(file.path())
        .output()
        .expect("failed to run propsat")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn formula_sat() {
    let output = run("!(q1 ^ (q2 v !q3))\n", &[]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.starts_with("SAT\n"), "{}", out);
    assert!(out.contains("q1 -> "), "{}", out);
}

#[test]
fn formula_unsat() {
    let output = run("q1 ^ !q1", &[]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.starts_with("UNSAT\n"), "{}", out);
    assert!(out.contains('□'), "{}", out);
}

#[test]
fn show_cnf() {
    let output = run("a v b", &["--show-cnf"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("p1 ^ ((a v b) v !p1) ^ (!a v p1) ^ (!b v p1)\nSAT\n"));
}

#[test]
fn dimacs_input() {
    let cnf = "c two clauses
p cnf 2 3
1 2 0
-1 0
-2 0
";
    let output = run(cnf, &["--dimacs", "--fixpoint"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("UNSAT\n"));
}

#[test]
fn parse_error_exit_code() {
    let output = run("a ^ (b", &[]);
    assert_eq!(output.status.code(), Some(255));
    assert!(String::from_utf8_lossy(&output.stderr).contains("parse error"));
}

#[test]
fn generous_timeout_still_answers() {
    let output = run("(a -> b) ^ (b -> c) ^ a ^ !c", &["--timeout", "60000"]);
    assert_eq!(output.status.code(), Some(1));
}
