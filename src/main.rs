mod debug_report;

use optweave::{BulkOptionSource, Context, Edit, Synchronizer, builtin_catalog, submit_payload};
use serde::Deserialize;
use std::io::{self, IsTerminal, Read};

/// Product definition accepted on stdin or via `--input`.
#[derive(Debug, Deserialize)]
struct ProductInput {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    base_price: Option<f64>,
    #[serde(default)]
    options: Vec<InputOption>,
}

#[derive(Debug, Deserialize)]
struct InputOption {
    name: String,
    #[serde(default)]
    values: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let product: ProductInput = match serde_json::from_str(&config.input) {
        Ok(product) => product,
        Err(err) => {
            eprintln!("error: invalid product JSON: {err}");
            std::process::exit(2);
        }
    };

    let ctx = Context {
        base_code: config.base_code.clone().or_else(|| product.base_code.clone()),
        base_price: config.base_price.or(product.base_price).unwrap_or_default(),
    };

    let mut sync = Synchronizer::new(ctx);
    sync.submit(Edit::EnableFeature);
    for (idx, option) in product.options.iter().enumerate() {
        if idx > 0 {
            sync.submit(Edit::AddOption);
        }
        // An option listed without values pulls its suggestions from the
        // bulk catalog, like picking a known name in the form does.
        if option.values.is_empty() {
            if let Some(entry) = builtin_catalog().lookup(&option.name) {
                sync.submit(Edit::AdoptCatalogEntry { option: idx, entry: entry.clone() });
                continue;
            }
        }
        sync.submit(Edit::RenameOption { option: idx, name: option.name.clone() });
        for value in &option.values {
            sync.submit(Edit::AddValue { option: idx, value: value.clone() });
        }
    }
    let report = sync.settle();

    if config.json {
        match submit_payload(&sync) {
            Ok(payload) => match serde_json::to_string_pretty(&payload) {
                Ok(body) => println!("{body}"),
                Err(err) => {
                    eprintln!("error: failed to serialize payload: {err}");
                    std::process::exit(1);
                }
            },
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    let name = product.name.as_deref().unwrap_or("(unnamed product)");
    debug_report::print_run(name, sync.options().options(), sync.variants(), &report, config.color);
}

struct CliConfig {
    input: String,
    base_code: Option<String>,
    base_price: Option<f64>,
    json: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut base_code: Option<String> = None;
    let mut base_price: Option<f64> = None;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("optweave {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--base-code" => {
                let value = args.next().ok_or_else(|| "error: --base-code expects a value".to_string())?;
                base_code = Some(value);
            }
            "--base-price" => {
                let value = args.next().ok_or_else(|| "error: --base-price expects a value".to_string())?;
                base_price = Some(parse_price(&value)?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            _ if arg.starts_with("--base-code=") => {
                base_code = Some(arg.trim_start_matches("--base-code=").to_string());
            }
            _ if arg.starts_with("--base-price=") => {
                base_price = Some(parse_price(arg.trim_start_matches("--base-price="))?);
            }
            _ if arg.starts_with("--input=") => {
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(arg.trim_start_matches("--input=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                let body = std::fs::read_to_string(&arg)
                    .map_err(|err| format!("error: failed to read '{arg}': {err}"))?;
                input = Some(body);
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no product JSON provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, base_code, base_price, json, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_price(value: &str) -> Result<f64, String> {
    value.parse::<f64>().map_err(|_| format!("error: invalid --base-price '{value}' (expected a number)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "optweave {version}

Product variant synchronization engine CLI.

Reads a product definition as JSON and prints the derived variant table:

  {{\"name\": \"Shirt\", \"base_code\": \"SHT\", \"base_price\": 19.9,
   \"options\": [{{\"name\": \"Color\", \"values\": [\"Red\", \"Blue\"]}}]}}

An option with no values is filled from the builtin bulk catalog when its
name is known there (Color, Size, Material).

Usage:
  optweave [OPTIONS] <product.json>
  optweave [OPTIONS] --input <json>

Options:
  -i, --input <json>       Inline product JSON. A positional argument is read
                           as a file instead; with neither, reads stdin.
  --base-code <code>       Override the sku base code.
  --base-price <price>     Override the default price for new variants.
  --json                   Print the submission payload as JSON instead of
                           the human-readable table.
  --color                  Force ANSI color output.
  --no-color               Disable ANSI color output.
  -h, --help               Show this help message.
  -V, --version            Print version information.

Exit codes:
  0  Success.
  1  Submission payload invalid or not serializable.
  2  Invalid arguments or malformed input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
