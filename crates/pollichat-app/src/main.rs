use anyhow::Result;
use clap::Parser;

use pollichat::app::{run_image_mode, run_models_mode, run_repl_mode, run_static_server, setup_from_cli};
use pollichat::{ChatArgs, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    pollichat_logging::init_logging(cli.verbose);

    let app_config = setup_from_cli(&cli);

    match cli.command.unwrap_or_else(|| Commands::Chat(ChatArgs::defaults())) {
        Commands::Chat(args) => run_repl_mode(&args, app_config).await,
        Commands::Models => run_models_mode(&app_config).await,
        Commands::Image(args) => run_image_mode(&args, &app_config).await,
        Commands::Serve(args) => run_static_server(&args).await,
    }
}
