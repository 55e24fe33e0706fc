use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use pollichat_types::{DEFAULT_CHAT_API_URL, DEFAULT_IMAGE_API_URL, DEFAULT_MODEL};

/// CLI arguments for pollichat
#[derive(Parser, Debug)]
#[command(name = "pollichat")]
#[command(about = "Streaming chat and image generation on the Pollinations APIs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the text API
    #[arg(long, global = true, value_name = "URL", env = "POLLICHAT_CHAT_API", default_value = DEFAULT_CHAT_API_URL)]
    pub chat_api: String,

    /// Base URL of the image API
    #[arg(long, global = true, value_name = "URL", env = "POLLICHAT_IMAGE_API", default_value = DEFAULT_IMAGE_API_URL)]
    pub image_api: String,

    /// Enable verbose debug output (shows HTTP requests, responses and stream chunks)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with a model (default when no subcommand is given)
    Chat(ChatArgs),

    /// List the available text models grouped by capability
    Models,

    /// Generate an image from a prompt
    Image(ImageArgs),

    /// Serve the static web front-end
    Serve(ServeArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Model to chat with
    #[arg(long, env = "POLLICHAT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Send these messages in order, print the replies and exit
    #[arg(short = 'm', long = "message", value_name = "TEXT")]
    pub messages: Vec<String>,

    /// Minimum time between two requests, in milliseconds
    #[arg(long, value_name = "MS", env = "POLLICHAT_REQUEST_INTERVAL_MS", default_value_t = 3000)]
    pub request_interval_ms: u64,

    /// Give up on a reply after this many seconds
    #[arg(long, value_name = "SECS", env = "POLLICHAT_REQUEST_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,
}

impl ChatArgs {
    /// Arguments of a bare `pollichat` invocation (defaults plus environment)
    pub fn defaults() -> Self {
        ChatArgs::parse_from(["pollichat"])
    }

    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ImageArgs {
    /// What to draw
    pub prompt: Option<String>,

    /// Use one of the built-in prompt ideas
    #[arg(long, conflicts_with = "prompt")]
    pub random_prompt: bool,

    /// Size preset: square, landscape, portrait or max
    #[arg(long, default_value = "square")]
    pub size: String,

    /// Custom width in pixels (use together with --height)
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Custom height in pixels (use together with --width)
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// Seed for reproducible results; random when omitted
    #[arg(long)]
    pub seed: Option<u32>,

    /// Image model
    #[arg(long, default_value = "flux")]
    pub model: String,

    /// Generate with every image model for comparison
    #[arg(long, conflicts_with = "model")]
    pub compare: bool,

    /// Download the generated images
    #[arg(long)]
    pub download: bool,

    /// Where downloaded images are written
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// Directory with the front-end assets
    #[arg(long, value_name = "DIR", default_value = "public")]
    pub dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bare_invocation_is_chat() {
        let cli = Cli::try_parse_from(["pollichat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_batch_messages() {
        let cli = Cli::try_parse_from(["pollichat", "chat", "-m", "Hello", "-m", "Bye", "--model", "mistral"]).unwrap();
        match cli.command {
            Some(Commands::Chat(args)) => {
                assert_eq!(args.messages, vec!["Hello", "Bye"]);
                assert_eq!(args.model, "mistral");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pollichat", "models", "--verbose", "--chat-api", "http://localhost:9000"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Models)));
        assert!(cli.verbose);
        assert_eq!(cli.chat_api, "http://localhost:9000");
    }

    #[test]
    fn test_image_arguments() {
        let cli = Cli::try_parse_from([
            "pollichat", "image", "a red fox", "--width", "800", "--height", "600", "--seed", "7",
        ])
        .unwrap();
        let Some(Commands::Image(args)) = cli.command else {
            panic!("expected image command");
        };
        assert_eq!(args.prompt.as_deref(), Some("a red fox"));
        assert_eq!((args.width, args.height), (Some(800), Some(600)));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.model, "flux");
    }

    #[test]
    fn test_width_requires_height() {
        assert!(Cli::try_parse_from(["pollichat", "image", "x", "--width", "800"]).is_err());
    }

    #[test]
    fn test_random_prompt_conflicts_with_prompt() {
        assert!(Cli::try_parse_from(["pollichat", "image", "x", "--random-prompt"]).is_err());
    }
}
