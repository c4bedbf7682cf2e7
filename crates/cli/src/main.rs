//! medclean CLI
//!
//! Removes duplicate medicine records from a CSV file, keeping the first
//! row for each (product name, salt composition, manufacturer) key.

mod config;
mod progress;

use anyhow::Result;
use clap::Parser;
use medclean_core::{run, CleanConfig, CleanReport, Error, SilentObserver};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use config::{FileConfig, Overrides};
use progress::ConsoleReporter;

#[derive(Parser)]
#[command(name = "medclean")]
#[command(version, about = "Remove duplicate medicine records from a CSV file", long_about = None)]
struct Cli {
    /// Input file [default: medicine_data.csv]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file [default: medicine_data_cleaned.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Key column, repeat for each column in order
    /// [default: product_name, salt_composition, product_manufactured]
    #[arg(short, long = "key", value_name = "COLUMN")]
    keys: Vec<String>,

    /// Config file with cleaning settings (YAML or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show statistics without writing output
    #[arg(long)]
    dry_run: bool,

    /// Output the report in JSON format
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.json)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let json_output = cli.json;
    let outcome = build_config(cli).map_err(Failure::Setup).and_then(|config| {
        debug!("Resolved configuration: {:?}", config);
        clean(&config, json_output).map_err(Failure::Clean)
    });

    ExitCode::from(report_outcome(outcome, json_output))
}

/// Print the report or the failure and return the process exit status
fn report_outcome(outcome: std::result::Result<CleanReport, Failure>, json_output: bool) -> u8 {
    match outcome {
        Ok(report) => {
            if json_output {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize report: {}", e);
                        return 1;
                    }
                }
            } else {
                progress::print_summary_report(&report);
            }
            0
        }
        Err(failure) => {
            failure.print(json_output);
            1
        }
    }
}

/// Every way a run can fail, reported through one exit path
enum Failure {
    Setup(anyhow::Error),
    Clean(Error),
}

impl Failure {
    fn kind(&self) -> &'static str {
        match self {
            Failure::Setup(_) => "config",
            Failure::Clean(Error::InputNotFound(_)) => "input_not_found",
            Failure::Clean(Error::ParseError(_)) => "parse",
            Failure::Clean(Error::SchemaError(_)) => "schema",
            Failure::Clean(Error::WriteError(_)) => "write",
            Failure::Clean(Error::InvalidConfig(_)) => "config",
        }
    }

    fn message(&self) -> String {
        match self {
            Failure::Setup(e) => format!("{:#}", e),
            Failure::Clean(e) => e.to_string(),
        }
    }

    fn print(&self, json_output: bool) {
        if json_output {
            let report = serde_json::json!({
                "error": self.kind(),
                "message": self.message(),
            });
            println!("{}", report);
            return;
        }

        match self {
            Failure::Clean(Error::InputNotFound(path)) => {
                println!("Error: Input file '{}' not found.", path.display());
            }
            _ => println!(
                "An error occurred during the cleaning process: {}",
                self.message()
            ),
        }
    }
}

fn build_config(cli: Cli) -> Result<CleanConfig> {
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    config::resolve(
        Overrides {
            input: cli.input,
            output: cli.output,
            key_columns: cli.keys,
            dry_run: cli.dry_run,
        },
        file,
    )
}

fn clean(config: &CleanConfig, json_output: bool) -> medclean_core::Result<CleanReport> {
    if json_output {
        run(config, &mut SilentObserver)
    } else {
        run(config, &mut ConsoleReporter::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["medclean"]).unwrap();
        let config = build_config(cli).unwrap();

        assert_eq!(config.input, PathBuf::from("medicine_data.csv"));
        assert_eq!(config.output, PathBuf::from("medicine_data_cleaned.csv"));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_repeated_keys() {
        let cli = Cli::try_parse_from([
            "medclean", "-i", "a.csv", "-k", "product_name", "--key", "price", "--dry-run",
        ])
        .unwrap();
        let config = build_config(cli).unwrap();

        assert_eq!(
            config.key_columns.names(),
            &["product_name".to_string(), "price".to_string()]
        );
        assert!(config.dry_run);
    }

    #[test]
    fn test_failure_kinds() {
        let missing = Failure::Clean(Error::InputNotFound(PathBuf::from("x.csv")));
        assert_eq!(missing.kind(), "input_not_found");
        assert_eq!(missing.message(), "Input file 'x.csv' not found");

        let schema = Failure::Clean(Error::SchemaError("no product_name".into()));
        assert_eq!(schema.kind(), "schema");

        let setup = Failure::Setup(anyhow::anyhow!("bad config"));
        assert_eq!(setup.kind(), "config");
    }

    #[test]
    fn test_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let config = CleanConfig {
            input: dir.path().join("medicine_data.csv"),
            output: dir.path().join("medicine_data_cleaned.csv"),
            ..CleanConfig::default()
        };

        let missing = clean(&config, true).map_err(Failure::Clean);
        assert_eq!(report_outcome(missing, true), 1);
        assert_eq!(report_outcome(unreadable_config_outcome(), false), 1);

        std::fs::write(
            &config.input,
            "product_name,salt_composition,product_manufactured\nA,S,M\n",
        )
        .unwrap();
        let ok = clean(&config, true).map_err(Failure::Clean);
        assert_eq!(report_outcome(ok, true), 0);
    }

    fn unreadable_config_outcome() -> std::result::Result<CleanReport, Failure> {
        let cli = Cli::try_parse_from(["medclean", "-c", "/nonexistent/medclean.yaml"]).unwrap();
        build_config(cli)
            .map_err(Failure::Setup)
            .and_then(|config| clean(&config, true).map_err(Failure::Clean))
    }

    #[test]
    fn test_clean_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = CleanConfig {
            input: dir.path().join("medicine_data.csv"),
            output: dir.path().join("medicine_data_cleaned.csv"),
            ..CleanConfig::default()
        };

        let result = clean(&config, true);

        assert!(matches!(result, Err(Error::InputNotFound(_))));
        assert!(!config.output.exists());
    }

    #[test]
    fn test_clean_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = CleanConfig {
            input: dir.path().join("medicine_data.csv"),
            output: dir.path().join("medicine_data_cleaned.csv"),
            ..CleanConfig::default()
        };
        std::fs::write(
            &config.input,
            "product_name,salt_composition,product_manufactured,product_price\n\
             Dolo 650,Paracetamol (650mg),Micro Labs,30\n\
             Dolo 650,Paracetamol (650mg),Micro Labs,32\n",
        )
        .unwrap();

        let report = clean(&config, true).unwrap();

        assert_eq!(report.rows_removed, 1);
        assert_eq!(
            std::fs::read_to_string(&config.output).unwrap(),
            "product_name,salt_composition,product_manufactured,product_price\n\
             Dolo 650,Paracetamol (650mg),Micro Labs,30\n"
        );
    }
}
