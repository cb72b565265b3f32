use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ol_app_setup::provision::Provisioner;
use ol_app_setup::server::{self, ServeOptions};
use ol_app_setup::{Config, Options, Plan, ScaffoldError, Scaffolder};

/// Environment variable holding the tracing filter (e.g. `debug`)
const LOG_ENV_VAR: &str = "OL_APP_SETUP_LOG";

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Sets up a minimal OpenLayers web-mapping app", long_about = None)]
struct Cli {
    /// Path to create the app within (required)
    #[arg(short, long, value_name = "folder")]
    target: Option<PathBuf>,

    /// Library profile to use: "ol3" or "ol2" (default: ol3)
    #[arg(short = 'v', long = "olversion", value_name = "majorversion")]
    olversion: Option<String>,

    /// Include jQuery in the app setup
    #[arg(short, long)]
    jquery: bool,

    /// Include Bootstrap 3 in the app setup
    #[arg(short, long)]
    bootstrap: bool,

    /// Serve the app directory over HTTP after setup
    #[arg(short, long)]
    serve: bool,

    /// Port for --serve (default: 8000)
    #[arg(short, long, requires = "serve")]
    port: Option<u16>,

    /// Copy assets from this directory instead of downloading them
    #[arg(short, long, value_name = "assets-dir")]
    local: Option<PathBuf>,

    /// Directory holding the app/index templates
    #[arg(long, value_name = "dir")]
    templates: Option<PathBuf>,

    /// Config file (default: ~/.ol-app-setup/config.toml)
    #[arg(long, value_name = "file")]
    config: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli) {
        eprintln!("\n❌ {:#}", e);
        let is_configuration = e
            .downcast_ref::<ScaffoldError>()
            .map(ScaffoldError::is_configuration)
            .unwrap_or(false);
        if is_configuration {
            eprintln!();
            let _ = Cli::command().print_help();
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Everything up to Plan::resolve is side-effect free
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    let options = Options {
        target: cli.target.clone().unwrap_or_default(),
        version: cli.olversion.clone(),
        jquery: cli.jquery,
        bootstrap: cli.bootstrap,
        serve: cli.serve,
    };
    let plan = Plan::resolve(&options, &config.default_version)?;

    let provisioner = match cli.local.clone().or_else(|| config.assets_dir()) {
        Some(dir) => {
            if !dir.is_dir() {
                return Err(ScaffoldError::Configuration(format!(
                    "assets directory {} does not exist",
                    dir.display()
                ))
                .into());
            }
            Provisioner::local(dir)
        }
        None => Provisioner::remote(config.fetch_timeout())?,
    };

    let templates_dir = cli.templates.clone().unwrap_or_else(|| config.templates_dir());
    let scaffolder = Scaffolder::new(provisioner, templates_dir).quiet(cli.quiet);
    let report = scaffolder.run(&plan)?;

    if !cli.quiet {
        println!(
            "\n✅ App ready: {} files, {} bytes in {}",
            report.files.len(),
            report.total_bytes(),
            plan.target.display()
        );
    }

    if options.serve {
        let serve_options = ServeOptions {
            port: cli.port.unwrap_or(config.port),
            ..Default::default()
        };
        server::execute(&plan.target, &serve_options)?;
    }

    Ok(())
}
