pub mod image;
pub mod models;
pub mod repl;
pub mod setup;
pub mod terminal_view;
pub mod web_server;

pub use image::run_image_mode;
pub use models::run_models_mode;
pub use repl::run_repl_mode;
pub use setup::{setup_from_cli, AppConfig};
pub use terminal_view::TerminalView;
pub use web_server::run_static_server;
