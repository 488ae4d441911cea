mod debug_report;

use interpolator::{Interpolator, Options};
use serde_json::Value;
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "INTERPOLATOR_LOG";

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(CliError::Usage(err)) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
        Err(CliError::Internal(err)) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let mut engine = match Interpolator::with_options(config.options) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };
    for (key, path) in &config.aliases {
        engine.add_alias(key, path.as_str());
    }

    if config.verbose {
        let res = engine.parse_verbose(&config.template, &config.data);
        debug_report::print_run(&res, config.color);
    } else {
        println!("{}", engine.parse(&config.template, &config.data));
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

struct CliConfig {
    template: String,
    data: Value,
    options: Options,
    aliases: Vec<(String, String)>,
    verbose: bool,
    color: bool,
}

enum CliError {
    /// Bad arguments or malformed input (exit 2).
    Usage(String),
    /// Environment failures such as unreadable files (exit 1).
    Internal(String),
}

impl From<String> for CliError {
    fn from(err: String) -> Self {
        CliError::Usage(err)
    }
}

fn parse_args() -> Result<CliConfig, CliError> {
    let mut template: Option<String> = None;
    let mut data: Option<Value> = None;
    let mut options = Options::default();
    let mut aliases = Vec::new();
    let mut verbose = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("interpolator {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--open" => options.delimiter.0 = expect_value(&mut args, "--open")?,
            "--close" => options.delimiter.1 = expect_value(&mut args, "--close")?,
            "--data" | "-d" => {
                let value = expect_value(&mut args, "--data")?;
                set_once(&mut data, parse_data(&value)?, "data")?;
            }
            "--data-file" => {
                let path = expect_value(&mut args, "--data-file")?;
                set_once(&mut data, read_data_file(&path)?, "data")?;
            }
            "--alias" | "-a" => {
                let value = expect_value(&mut args, "--alias")?;
                aliases.push(parse_alias(&value)?);
            }
            "--template" | "-t" => {
                let value = expect_value(&mut args, "--template")?;
                set_once(&mut template, value, "template")?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.is_empty() {
                    set_once(&mut template, rest, "template")?;
                }
                break;
            }
            _ if arg.starts_with("--data=") => {
                let value = arg.trim_start_matches("--data=");
                set_once(&mut data, parse_data(value)?, "data")?;
            }
            _ if arg.starts_with("--template=") => {
                let value = arg.trim_start_matches("--template=");
                set_once(&mut template, value.to_string(), "template")?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'").into());
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_once(&mut template, rest, "template")?;
                break;
            }
        }
    }

    let template = match template {
        Some(value) => value,
        None => read_stdin_template()?,
    };

    if template.is_empty() {
        return Err(format!("error: no template provided\n\n{}", help_text()).into());
    }

    Ok(CliConfig {
        template,
        data: data.unwrap_or_else(|| Value::Object(Default::default())),
        options,
        aliases,
        verbose,
        color,
    })
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("error: {flag} expects a value"))
}

fn set_once<T>(slot: &mut Option<T>, value: T, what: &str) -> Result<(), String> {
    if slot.is_some() {
        return Err(format!("error: {what} provided multiple times"));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_data(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|err| format!("error: invalid --data JSON: {err}"))
}

fn read_data_file(path: &str) -> Result<Value, CliError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| CliError::Internal(format!("error: failed to read data file '{path}': {err}")))?;
    serde_json::from_str(&raw).map_err(|err| CliError::Usage(format!("error: invalid JSON in '{path}': {err}")))
}

fn parse_alias(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, path)) if !key.is_empty() && !path.is_empty() => Ok((key.to_string(), path.to_string())),
        _ => Err(format!("error: invalid --alias '{raw}' (expected KEY=PATH)")),
    }
}

fn read_stdin_template() -> Result<String, CliError> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| CliError::Internal(format!("error: failed to read stdin: {err}")))?;
    // Keep inner newlines, drop the one a shell pipe usually appends.
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "interpolator {version}

Substitute {{key[:alternative][|modifier,...]}} placeholders from JSON data.

Usage:
  interpolator [OPTIONS] [--] <template...>
  interpolator [OPTIONS] --template <text>

Options:
  -t, --template <text>      Template to render. If omitted, reads remaining args
                             or stdin when no args are provided.
  -d, --data <json>          Data object as inline JSON. Default: {{}}
  --data-file <path>         Read the data object from a JSON file.
  --open <marker>            Open delimiter. Default: {{
  --close <marker>           Close delimiter. Default: }}
  -a, --alias <key=path>     Register an alias (repeatable).
  -v, --verbose              Print a per-placeholder report instead of the output.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}=<filter>   Log filter for engine traces (e.g. trace). Default: warn

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments, malformed data or missing template.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
