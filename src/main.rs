//! Renewables planner entry point: CLI wiring and site loading.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use renewables_planner::config::SiteConfig;
use renewables_planner::io::export::export_csv;
use renewables_planner::persistence::{JsonLinesSink, save_analysis};

/// Plans renewable installations around a building and prints the
/// techno-economic analysis.
#[derive(Parser)]
#[command(name = "renewables-planner", version)]
struct Cli {
    /// Load the site from a TOML file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    site: Option<PathBuf>,

    /// Use a built-in preset (apartments, office, office_mixed)
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Write per-kind results to CSV
    #[arg(long, value_name = "PATH")]
    export_csv: Option<PathBuf>,

    /// Append the analysis records to a JSON-lines store
    #[arg(long, value_name = "PATH", requires = "user_id")]
    save: Option<PathBuf>,

    /// Owner of the saved records
    #[arg(long, value_name = "ID")]
    user_id: Option<String>,

    /// Start the REST API server after the analysis
    #[cfg(feature = "api")]
    #[arg(long)]
    serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // --site takes priority, then --preset, then the apartments default
    let loaded = match (&cli.site, &cli.preset) {
        (Some(path), _) => SiteConfig::from_toml_file(path),
        (None, Some(name)) => SiteConfig::from_preset(name),
        (None, None) => Ok(SiteConfig::apartments()),
    };
    let site = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let errors = site.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let session = site.build_session().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    println!("{}", session.report());

    if let Some(ref path) = cli.export_csv {
        if let Err(e) = export_csv(&session.report().results, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Results written to {}", path.display());
    }

    // A failed save is reported but never aborts the run.
    if let (Some(path), Some(user_id)) = (&cli.save, &cli.user_id) {
        let saved = JsonLinesSink::append(path)
            .and_then(|mut sink| save_analysis(session.report(), user_id, &mut sink));
        match saved {
            Ok(n) => eprintln!("Saved {n} records to {}", path.display()),
            Err(e) => eprintln!("warning: analysis not saved: {e}"),
        }
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(renewables_planner::api::AppState::from_session(&session));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(renewables_planner::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
