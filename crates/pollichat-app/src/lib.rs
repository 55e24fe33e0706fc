//! pollichat: terminal chat and image generation on the Pollinations APIs.

pub mod app;
pub mod cli;
pub mod web;

pub use cli::{ChatArgs, Cli, Commands, ImageArgs, ServeArgs};
