use std::env;
use std::path::PathBuf;

/// Parsed command-line options. Every option overrides the config file.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub seed: Option<u64>,
    pub readings_csv: Option<PathBuf>,
    pub no_seed: bool,
    pub report: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--config" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --config (expected a TOML file path)",
                )?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--host" => {
                i += 1;
                let host =
                    args.next_or_err(i, "missing value for --host (expected an address)")?;
                opts.host = Some(host.to_string());
            }
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                opts.port = Some(port);
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(seed);
            }
            "--readings-csv" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --readings-csv (expected a CSV file path)",
                )?;
                opts.readings_csv = Some(PathBuf::from(path));
            }
            "--no-seed" => opts.no_seed = true,
            "--report" => opts.report = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.no_seed && opts.readings_csv.is_some() {
        return Err(
            "arguments `--no-seed` and `--readings-csv` are mutually exclusive".to_string(),
        );
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("joi-energy: smart meter readings and price plan comparison");
    eprintln!();
    eprintln!("Usage: joi-energy [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load service config from TOML file");
    eprintln!("  --host <addr>            Bind address (default: 0.0.0.0)");
    eprintln!("  --port <u16>             Bind port (default: 3000)");
    eprintln!("  --seed <u64>             RNG seed for generated readings");
    eprintln!("  --readings-csv <path>    Seed readings from CSV instead of generating them");
    eprintln!("  --no-seed                Start with an empty reading store");
    eprintln!("  --report                 Print a cost report for every meter and exit");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("Log verbosity follows RUST_LOG (default: info).");
}
