use pollichat_chat::ChatConfig;
use pollichat_llm_api::ClientConfig;
use pollichat_types::DEFAULT_MODEL;

use crate::cli::{ChatArgs, Cli};

/// Application configuration derived from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client_config: ClientConfig,
    pub verbose: bool,
}

impl AppConfig {
    /// Queue and session settings for a chat run
    pub fn chat_config(&self, args: &ChatArgs) -> ChatConfig {
        ChatConfig {
            request_interval: args.request_interval(),
            request_timeout: args.request_timeout(),
            model: match args.model.trim() {
                "" => DEFAULT_MODEL.to_string(),
                model => model.to_string(),
            },
            verbose: self.verbose,
            ..ChatConfig::default()
        }
    }
}

/// Set up application configuration from CLI arguments
pub fn setup_from_cli(cli: &Cli) -> AppConfig {
    let client_config = ClientConfig::new(&cli.chat_api, &cli.image_api).with_verbose(cli.verbose);

    if cli.verbose {
        log::debug!("chat API: {}", client_config.chat_api_url);
        log::debug!("image API: {}", client_config.image_api_url);
    }

    AppConfig {
        client_config,
        verbose: cli.verbose,
    }
}
