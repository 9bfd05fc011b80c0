//! `merit` - cost-minimal hourly power dispatch.
//!
//! Reads a dispatch payload (load, fuel prices, fleet) as JSON from a file
//! or stdin, validates it, runs the allocation pipeline and prints the
//! per-plant outputs as JSON. Validation and infeasibility failures are
//! answered with an `{"errors": [...]}` body on stdout and a non-zero exit
//! code; logs go to stderr.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use merit_algo::{DispatchSolver, SolveError};
use merit_core::{validation, DispatchRequest, Diagnostics, MeritError, MeritResult};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "merit",
    version,
    about = "Compute a cost-minimal power dispatch for an hourly payload"
)]
struct Cli {
    /// Payload file; reads stdin when absent or `-`
    payload: Option<PathBuf>,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,

    /// Emit whole-MWh outputs (rounds derated wind capacity too)
    #[arg(long)]
    integral: bool,

    /// Abort the search after N states and report infeasibility
    #[arg(long, value_name = "N")]
    step_limit: Option<usize>,
}

/// The `{"errors": [...]}` failure body of the historical API
#[derive(Serialize)]
struct ErrorBody {
    errors: Vec<String>,
}

fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let raw = read_payload(cli.payload.as_deref())?;

    let request: DispatchRequest = match serde_json::from_str(&raw) {
        Ok(request) => request,
        Err(err) => {
            error!("payload parse failed: {err}");
            return fail(vec![format!("The payload could not be parsed: {err}.")], cli);
        }
    };

    info!("validating payload ({} powerplants)", request.powerplants.len());
    let mut diag = Diagnostics::new();
    if !validation::validate_request(&request, &mut diag) {
        for issue in diag.errors() {
            error!("{issue}");
        }
        return fail(diag.error_messages(), cli);
    }

    info!(
        "allocating {} across the fleet",
        request.load
    );
    let solver = DispatchSolver::new()
        .with_integral_outputs(cli.integral)
        .with_step_limit(cli.step_limit);

    let solution = match solver.solve(&request) {
        Ok(solution) => solution,
        Err(SolveError::Infeasible(reason)) => {
            error!("dispatch infeasible: {reason}");
            return fail(vec![format!("The load cannot be dispatched: {reason}.")], cli);
        }
        Err(SolveError::InvalidInput(reason)) => {
            // Validation should have caught this; surface it loudly.
            error!("internal invariant violated: {reason}");
            return fail(vec![format!("Internal error: {reason}.")], cli);
        }
    };

    info!(
        "dispatch complete: {:.1} MWh at {:.2} euro ({} states explored)",
        solution.total_power(),
        solution.total_cost,
        solution.states_explored
    );
    print_json(&solution.assignments, cli.pretty)?;
    Ok(ExitCode::SUCCESS)
}

fn read_payload(path: Option<&std::path::Path>) -> MeritResult<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .map_err(|err| MeritError::Other(format!("cannot read {path:?}: {err}"))),
        _ => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

fn fail(errors: Vec<String>, cli: &Cli) -> anyhow::Result<ExitCode> {
    print_json(&ErrorBody { errors }, cli.pretty)?;
    Ok(ExitCode::FAILURE)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let body = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{body}");
    Ok(())
}
