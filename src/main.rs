//! The gradebook server: a GraphQL API over courses, students and grades that
//! are held in memory.

use clap::Parser;
use std::sync::Arc;

use crate::{
    args::{Args, Command, Shared},
    config::Config,
    prelude::*,
    store::{Seed, Store},
};

mod api;
mod args;
mod cmd;
mod config;
mod http;
mod logger;
mod model;
mod prelude;
mod store;


#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Log error in case stdout is not connected and it is logged into a file.
        error!("{:?}", e);

        // Show a somewhat nice representation of the error
        eprintln!();
        eprintln!();
        bunt::eprintln!("{$red}▶▶▶ {$bold}Error:{/$}{/$} {[yellow+intense]}", e);
        eprintln!();
        if e.chain().len() > 1 {
            bunt::eprintln!("{$red+italic}Caused by:{/$}");
        }

        for (i, cause) in e.chain().skip(1).enumerate() {
            eprint!(" {: >1$}", "", i * 2);
            eprintln!("‣ {cause}");
        }

        std::process::exit(1);
    }
}

/// Main entry point.
async fn run() -> Result<()> {
    let args = Args::parse();

    // Configure output via `bunt`
    bunt::set_stdout_color_choice(args.stdout_color());
    bunt::set_stderr_color_choice(args.stderr_color());

    // Dispatch subcommand.
    match &args.cmd {
        None => start_server(&Shared::default(), &args).await?,
        Some(Command::Serve { shared }) => start_server(shared, &args).await?,
        Some(Command::Check { shared }) => cmd::check::run(shared, &args).await?,
        Some(Command::WriteConfig { target }) => config::write_template(target.as_ref())?,
        Some(Command::ExportApiSchema { target }) => cmd::export_api_schema::run(target.as_ref())?,
    }

    Ok(())
}

async fn start_server(shared: &Shared, args: &Args) -> Result<()> {
    let config = load_config_and_init_logger(shared, args)?;
    info!("Starting gradebook server ...");
    trace!("Configuration: {:#?}", config);

    let seed = Seed::load(&config.seed).await.context("failed to load seed data")?;
    for problem in seed.problems() {
        warn!("Seed data: {problem}");
    }
    let store = Arc::new(Store::new(seed));

    http::serve(config, api::root_node(), store).await
        .context("failed to start HTTP server")?;

    Ok(())
}

fn load_config_and_init_logger(shared: &Shared, args: &Args) -> Result<Config> {
    // Load configuration.
    let (config, path) = match &shared.config {
        Some(path) => {
            let config = Config::load_from(path)
                .context(format!("failed to load config from '{}'", path.display()))?;
            (config, Some(path.clone()))
        }
        None => Config::from_env_or_default_locations()?,
    };

    // Initialize logger. Unfortunately, we can only do this here
    // after reading the config.
    logger::init(&config.log, args.stdout_color())?;
    match path {
        Some(path) => info!("Loaded config from '{}'", path.display()),
        None => info!("No config file found, using default configuration"),
    }

    Ok(config)
}
