mod serve;
mod service;

use std::collections::BTreeMap;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Boolean logic expression toolchain.
#[derive(Parser)]
#[command(name = "boolex", version, about = "Boolean logic expression engine and server")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that an expression is well-formed
    Check {
        /// The expression string, e.g. "(x OR y) AND z"
        expression: String,
    },

    /// Print the parameter set an expression requires
    Params {
        /// The expression string
        expression: String,
    },

    /// Evaluate an expression against integer bindings
    Eval {
        /// The expression string
        expression: String,
        /// A binding as NAME=VALUE (repeatable); true iff VALUE > 0
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
    },

    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { expression } => {
            cmd_check(&expression, cli.output);
        }
        Commands::Params { expression } => {
            cmd_params(&expression, cli.output);
        }
        Commands::Eval { expression, params } => {
            cmd_eval(&expression, &params, cli.output);
        }
        Commands::Serve { port } => {
            let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
            if let Err(e) = rt.block_on(serve::start_server(port)) {
                eprintln!("Server error: {}", e);
                process::exit(1);
            }
        }
    }
}

fn cmd_check(expression: &str, output: OutputFormat) {
    match boolex_core::parse_and_validate(expression) {
        Ok(()) => match output {
            OutputFormat::Text => println!("valid"),
            OutputFormat::Json => println!("{}", serde_json::json!({"valid": true})),
        },
        Err(err) => {
            match output {
                OutputFormat::Text => eprintln!("invalid expression: {}", err.cause),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({"valid": false, "error": err.cause.to_string()})
                ),
            }
            process::exit(1);
        }
    }
}

fn cmd_params(expression: &str, output: OutputFormat) {
    match boolex_core::required_parameters(expression) {
        Ok(names) => {
            let names: Vec<String> = names.into_iter().collect();
            match output {
                OutputFormat::Text => {
                    for name in names {
                        println!("{}", name);
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({"parameters": names}))
                }
            }
        }
        Err(err) => {
            eprintln!("invalid expression: {}", err.cause);
            process::exit(1);
        }
    }
}

fn cmd_eval(expression: &str, raw_params: &[String], output: OutputFormat) {
    let mut params = BTreeMap::new();
    for raw in raw_params {
        let Some((name, value)) = raw.split_once('=') else {
            eprintln!("error: --param expects NAME=VALUE, got \"{}\"", raw);
            process::exit(1);
        };
        let value: i64 = match value.parse() {
            Ok(v) => v,
            Err(_) => {
                eprintln!("error: value for \"{}\" is not an integer: \"{}\"", name, value);
                process::exit(1);
            }
        };
        params.insert(name.to_string(), value);
    }

    match boolex_core::evaluate(expression, &params) {
        Ok(result) => match output {
            OutputFormat::Text => println!("{}", result),
            OutputFormat::Json => println!("{}", serde_json::json!({"result": result})),
        },
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }
}
