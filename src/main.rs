use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use pahakia_fault::logging::{init_logging, LoggingConfig};
use pahakia_fault::{codes, CodeBlockWorker, Fault, FaultCatalog, FaultCode};

#[derive(Parser, Debug)]
#[command(name = "pahakia")]
#[command(version)]
#[command(about = "Inspect fault code catalogs and render faults")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a catalog file and list its codes
    Check {
        /// Path to the TOML catalog
        catalog: PathBuf,
    },
    /// Render a fault from a catalog code and arguments
    Render {
        /// Path to the TOML catalog
        catalog: PathBuf,
        /// Fault code to render
        code: String,
        /// Template arguments, in order
        args: Vec<String>,
        /// Print the fault as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the framework's reserved fault codes
    Builtin,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(fault) = init_logging(LoggingConfig::from_verbosity(cli.verbose)) {
        eprintln!("{}", fault);
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(fault) => {
            eprintln!("error: {}", fault);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Fault> {
    match command {
        Command::Check { catalog } => {
            let catalog = FaultCatalog::load(&catalog)?;
            for code in catalog.codes() {
                print_code(code);
            }
            println!("{} fault code(s) OK", catalog.len());
            Ok(())
        }
        Command::Render {
            catalog,
            code,
            args,
            json,
        } => {
            let catalog = FaultCatalog::load(&catalog)?;
            let fault = render(&catalog, &code, args)?;
            if json {
                let report = serde_json::to_string_pretty(&fault.report())
                    .map_err(Fault::naturalize)?;
                println!("{}", report);
            } else {
                println!("{}", fault);
            }
            Ok(())
        }
        Command::Builtin => {
            for code in codes::all() {
                print_code(code);
            }
            Ok(())
        }
    }
}

fn render(catalog: &FaultCatalog, code: &str, args: Vec<String>) -> Result<Fault, Fault> {
    CodeBlockWorker::wrap(|| catalog.create(code, args))
        .katch(&codes::NUM_ARGS_NOT_MATCH_CODE, |fault| {
            if let Some(expected) = fault.args().get(1) {
                eprintln!("hint: {} takes {} argument(s)", code, expected);
            }
            Err(fault)
        })
        .finale()
}

fn print_code(code: &FaultCode) {
    println!("{} ({} args): {}", code.code(), code.num_args(), code.template());
}
