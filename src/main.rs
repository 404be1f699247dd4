//! JOI Energy entry point: CLI wiring, config loading, seeding, and serving.

mod cli;

use std::path::Path;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use joi_energy::config::ServiceConfig;
use joi_energy::pricing::PlanCatalog;
use joi_energy::readings::ReadingStore;
use joi_energy::readings::seed::{SeedError, import_csv, seed_store};
use joi_energy::report::build_report;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file (or defaults) and applies CLI overrides.
fn load_config(opts: &cli::CliOptions) -> ServiceConfig {
    let mut config = match opts.config {
        Some(ref path) => ServiceConfig::from_toml_file(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        }),
        None => ServiceConfig::default(),
    };

    if let Some(ref host) = opts.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = opts.port {
        config.server.port = port;
    }
    if let Some(seed) = opts.seed {
        config.seed.rng_seed = seed;
    }
    if let Some(ref path) = opts.readings_csv {
        config.seed.readings_csv = Some(path.clone());
    }
    if opts.no_seed {
        config.seed.enabled = false;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

/// Current time in epoch seconds; `0` if the clock is before the epoch.
fn now_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

/// Populates the store per the seed config.
fn seed(store: &ReadingStore, config: &ServiceConfig) -> Result<(), SeedError> {
    let seed = &config.seed;
    if !seed.enabled {
        info!("seeding disabled, starting with an empty store");
        return Ok(());
    }
    match seed.readings_csv {
        Some(ref path) => import_csv(store, path)?,
        None => seed_store(
            store,
            config.seed_meter_ids(),
            seed.readings_per_meter,
            seed.rng_seed,
            now_epoch_secs(),
        )?,
    };
    Ok(())
}

fn print_report(store: &ReadingStore, catalog: &PlanCatalog) {
    match build_report(store, catalog) {
        Ok(reports) => {
            for report in &reports {
                println!("{report}");
            }
        }
        Err(e) => {
            error!(%e, "failed to build report");
            process::exit(1);
        }
    }
}

fn main() {
    init_logging();

    let opts = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });
    let config = load_config(&opts);

    let store = ReadingStore::new();
    if let Err(e) = seed(&store, &config) {
        eprintln!("error: {e}");
        process::exit(1);
    }
    let catalog = config.catalog();
    info!(
        plans = catalog.plans().len(),
        accounts = catalog.accounts().len(),
        "plan catalog loaded"
    );

    #[cfg(feature = "api")]
    if !opts.report {
        use std::net::ToSocketAddrs;
        use std::sync::Arc;

        use joi_energy::api::{AppState, serve};

        let server = &config.server;
        let addr = (server.host.as_str(), server.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .unwrap_or_else(|| {
                eprintln!(
                    "error: cannot resolve bind address {}:{}",
                    server.host, server.port
                );
                process::exit(1);
            });

        let state = Arc::new(AppState { store, catalog });
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(serve(state, addr)) {
            error!(%e, %addr, "server stopped");
            process::exit(1);
        }
        return;
    }

    print_report(&store, &catalog);
}
