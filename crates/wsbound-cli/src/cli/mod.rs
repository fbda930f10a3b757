mod commands;

use clap::Parser;

/// Exit codes: 0 converged, 1 finished without convergence, 2 error.
pub fn run_from_env() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                return 0;
            }
            _ => {
                eprint!("{}", err);
                return 2;
            }
        },
    };

    match dispatch(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            2
        }
    }
}

fn dispatch(command: CliCommand) -> anyhow::Result<i32> {
    match command {
        CliCommand::Solve(args) => commands::run_solve(args),
        CliCommand::Spectrum(args) => commands::run_spectrum(args),
    }
}

#[derive(Parser)]
#[command(name = "wsbound", about = "Woods-Saxon bound-state eigenvalue solver")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Solve for one bound state with a requested node count
    Solve(commands::SolveArgs),
    /// Enumerate bound states of increasing node count until one fails
    Spectrum(commands::SpectrumArgs),
}
