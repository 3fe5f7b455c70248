use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score an application from a JSON record (default if no subcommand)
    Assess {
        /// Path to the application JSON (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the raw assessment record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective scoring configuration as YAML
    Weights,
}

#[derive(Parser, Debug)]
#[command(name = "lendscore")]
#[command(about = "Business-lending risk scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Show the per-factor score breakdown
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/lendscore/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Assess {
        input: None,
        json: false,
    });

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match lendscore::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring = config.effective_scoring();
    if let Err(errors) = lendscore::scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    match command {
        Commands::Assess { input, json } => {
            let raw = match read_input(input.as_deref()) {
                Ok(raw) => raw,
                Err(e) => {
                    eprintln!("Input error: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let application: lendscore::assessment::AssessmentInput =
                match serde_json::from_str(&raw) {
                    Ok(a) => a,
                    Err(e) => {
                        eprintln!("Invalid application JSON: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                };

            let result = match lendscore::scoring::assess(&application, &scoring) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            if json {
                match serde_json::to_string_pretty(&result) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            } else {
                let use_colors = lendscore::output::should_use_colors();
                println!("{}", lendscore::output::format_report(&result, use_colors));

                if cli.verbose {
                    println!();
                    println!(
                        "{}",
                        lendscore::output::format_breakdown(&result.breakdown, use_colors)
                    );
                }
            }
        }
        Commands::Weights => match serde_saphyr::to_string(&scoring) {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => {
                eprintln!("Failed to render scoring config: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        },
    }

    std::process::exit(EXIT_SUCCESS);
}

fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    use anyhow::Context;

    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read application from stdin")?;
            Ok(buffer)
        }
    }
}
