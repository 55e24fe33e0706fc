// Logging module - diagnostic logger setup and verbose HTTP dumps
pub mod request_logger;

// Re-export request logging functions
pub use request_logger::{log_request, log_response, log_stream_chunk};

/// Initialise the process-wide `log` backend.
///
/// `RUST_LOG` always wins; otherwise `--verbose` turns on debug output for the
/// pollichat crates and everything else stays at `warn`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,pollichat=debug,pollichat_chat=debug,pollichat_llm_api=debug"
    } else {
        "warn"
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}
