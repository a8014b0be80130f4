use anyhow::{ anyhow, Result };
use clap::Parser;
use dotenv::dotenv;
use log::{ debug, info };

use flipper::models::property::PropertyInput;
use flipper::{ App, Backend, FileStore, FlipperConfig, ModelVariant };

mod cli;
use cli::{ Commands, FlipperCli };

#[tokio::main]
async fn main() -> Result<()> {
    // Parse the command line arguments
    let cli = FlipperCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    if dotenv().is_ok() {
        debug!("Loaded environment variables from .env file");
    }

    let config = load_config(&cli)?;
    info!("Using storage at {}", config.storage_path.display());

    if let Commands::Models = &cli.command {
        return cli::commands::models::execute(&config.default_model);
    }

    let storage = FileStore::at_path(&config.storage_path);
    let mut app = App::from_config(&config, storage)?;

    match cli.command {
        Commands::Add { address, price, square_feet, bedrooms, bathrooms, condition, market } => {
            let input = address.map(|address| PropertyInput {
                address,
                purchase_price: price.unwrap_or_default(),
                square_feet: square_feet.unwrap_or_default(),
                bedrooms: bedrooms.unwrap_or_default(),
                bathrooms: bathrooms.unwrap_or_default(),
                condition,
                market_description: market.unwrap_or_default(),
            });
            cli::commands::add::execute(&mut app, input)?;
        }
        Commands::List => cli::commands::list::execute(&app)?,
        Commands::Remove { target } => cli::commands::remove::execute(&mut app, &target)?,
        Commands::Analyze { target } => cli::commands::analyze::execute(&mut app, &target).await?,
        Commands::Interactive => cli::commands::interactive::execute(&mut app).await?,
        Commands::Models => {}
    }

    Ok(())
}

/// Config file first, then command-line overrides
fn load_config(cli: &FlipperCli) -> Result<FlipperConfig> {
    let mut config = match &cli.config {
        Some(path) => FlipperConfig::from_file(path)?,
        None => FlipperConfig::default(),
    };

    if let Some(storage) = &cli.storage {
        config.storage_path = storage.clone();
    }
    if let Some(backend) = &cli.backend {
        config.backend = backend.parse::<Backend>().map_err(|e| anyhow!(e))?;
    }
    if let Some(model) = &cli.model {
        config.default_model = model.parse::<ModelVariant>().map_err(|e| anyhow!(e))?;
    }

    Ok(config)
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
