//! Portfolio QUBO solver comparison runner
//!
//! Builds a problem instance, encodes it as a QUBO, runs the selected
//! solver (or all of them) and prints a comparison of the results.

use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use qfolio_core::{ProblemParameters, QuboModel};
use qfolio_sim::{
    analyze, ClassicalSolver, CvarVqeSolver, QaoaSolver, SolutionReport, Solver, VqeSolver,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolverChoice {
    /// Simulated-annealing baseline
    Classical,
    /// Expectation-based variational eigensolver
    Vqe,
    /// Risk-averse (tail-conditional) variational eigensolver
    Cvar,
    /// Alternating-operator ansatz
    Qaoa,
}

#[derive(Debug, Parser)]
#[command(name = "qfolio", about = "Quantum-inspired portfolio selection over a QUBO encoding")]
struct Cli {
    /// Number of securities in the portfolio
    #[arg(long, default_value_t = 4)]
    num_securities: usize,

    /// Solver to run
    #[arg(long, value_enum, default_value = "classical")]
    solver: SolverChoice,

    /// Run every available solver and compare
    #[arg(long)]
    run_all: bool,

    /// Fraction of worst-case samples averaged by the CVaR solver
    #[arg(long, default_value_t = 0.2)]
    cvar_alpha: f64,

    /// Number of layers (p) for the alternating-operator ansatz
    #[arg(long, default_value_t = 2)]
    qaoa_layers: usize,

    /// Seed for problem generation, initial angles, and sampling
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Emit the reports as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn build_solver(choice: SolverChoice, cli: &Cli) -> Box<dyn Solver> {
    match choice {
        SolverChoice::Classical => Box::new(ClassicalSolver::new(cli.seed)),
        SolverChoice::Vqe => Box::new(VqeSolver::new(150, cli.seed)),
        SolverChoice::Cvar => Box::new(CvarVqeSolver::new(cli.cvar_alpha, 150, cli.seed)),
        SolverChoice::Qaoa => Box::new(QaoaSolver::new(cli.qaoa_layers, 100, cli.seed)),
    }
}

fn print_table(reports: &[SolutionReport]) {
    println!(
        "{:<10} {:>12} {:>12} {:>9} {:>7} {:>11} {:>9}",
        "solver", "qubo energy", "objective", "selected", "bound", "constraint", "time (s)"
    );
    for r in reports {
        println!(
            "{:<10} {:>12.4} {:>12.4} {:>9} {:>7} {:>11} {:>9.2}",
            r.solver,
            r.qubo_energy,
            r.objective_value,
            r.selected,
            r.bound,
            if r.constraint_satisfied { "ok" } else { "VIOLATED" },
            r.runtime_seconds,
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        num_securities = cli.num_securities,
        seed = cli.seed,
        "building problem instance"
    );
    let params = ProblemParameters::random(cli.num_securities, cli.seed);
    let model = QuboModel::from_parameters(&params).context("failed to encode the QUBO")?;
    info!(
        variables = model.num_variables(),
        penalty = model.penalty_weight(),
        "QUBO encoded"
    );

    let choices: Vec<SolverChoice> = if cli.run_all {
        vec![
            SolverChoice::Classical,
            SolverChoice::Vqe,
            SolverChoice::Cvar,
            SolverChoice::Qaoa,
        ]
    } else {
        vec![cli.solver]
    };

    let mut reports = Vec::new();
    for choice in choices {
        let mut solver = build_solver(choice, &cli);
        let name = solver.name();
        info!(solver = name, "running solver");

        let start = Instant::now();
        let outcome = solver
            .solve(&model)
            .with_context(|| format!("solver '{}' failed", name))?;
        let runtime = start.elapsed();

        info!(
            solver = name,
            selected = outcome.solution.selected_count(),
            evaluations = outcome.history.len(),
            "solver finished"
        );
        reports.push(analyze(name, &outcome, &params, &model, runtime)?);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_table(&reports);
    }

    Ok(())
}
