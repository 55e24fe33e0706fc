use chrono::Local;
use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use pollichat_chat::{ChatView, Notice};

const TYPING: &str = "● ● ●";

fn timestamp() -> String {
    Local::now().format("%H:%M").to_string()
}

fn flush() {
    let _ = io::stdout().flush();
}

/// Chat view that renders to the terminal.
///
/// Tokens go to stdout as they arrive; diagnostics from the logger go to
/// stderr so the two never interleave mid-line.
pub struct TerminalView {
    /// Print the user's message; off in the REPL where it was just typed
    echo_user: bool,
    input_enabled: AtomicBool,
}

impl TerminalView {
    pub fn new(echo_user: bool) -> Self {
        Self {
            echo_user,
            input_enabled: AtomicBool::new(true),
        }
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled.load(Ordering::SeqCst)
    }
}

impl ChatView for TerminalView {
    fn set_input_enabled(&self, enabled: bool) {
        self.input_enabled.store(enabled, Ordering::SeqCst);
    }

    fn show_user_message(&self, content: &str) {
        if self.echo_user {
            println!("{} {} {}", timestamp().bright_black(), "You:".bright_green().bold(), content);
        }
    }

    fn show_typing_indicator(&self) {
        print!("{}", TYPING.bright_black());
        flush();
    }

    fn hide_typing_indicator(&self) {
        // Overwrite the indicator in place
        print!("\r{}\r", " ".repeat(TYPING.chars().count()));
        flush();
    }

    fn begin_assistant_message(&self) {
        print!("{} {} ", timestamp().bright_black(), "AI:".bright_cyan().bold());
        flush();
    }

    fn append_token(&self, token: &str) {
        print!("{}", token);
        flush();
    }

    fn finish_assistant_message(&self) {
        println!();
    }

    fn show_notice(&self, notice: Notice) {
        let text = match notice {
            Notice::Failure => notice.message().red(),
            Notice::Timeout | Notice::Cancelled => notice.message().yellow(),
        };
        println!("{} {}", timestamp().bright_black(), text);
    }

    fn clear_messages(&self) {
        // Clear screen and home the cursor
        print!("\x1b[2J\x1b[H");
        flush();
        println!("{}", "Conversation cleared.".bright_black());
    }
}
