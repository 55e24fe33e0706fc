use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

use pollichat_chat::ChatController;
use pollichat_llm_api::{ChatBackend, PollinationsClient};
use pollichat_models::ModelInfo;
use pollichat_types::{ConversationHistory, Role};

use crate::app::models::print_models;
use crate::app::{AppConfig, TerminalView};
use crate::cli::ChatArgs;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Message(String),
    Clear,
    /// `/model` alone shows the current model
    Model(Option<String>),
    Models,
    History,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    if !line.starts_with('/') {
        return match line {
            "exit" | "quit" => ReplCommand::Quit,
            _ => ReplCommand::Message(line.to_string()),
        };
    }

    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match command {
        "/clear" => ReplCommand::Clear,
        "/model" if rest.is_empty() => ReplCommand::Model(None),
        "/model" => ReplCommand::Model(Some(rest.to_string())),
        "/models" => ReplCommand::Models,
        "/history" => ReplCommand::History,
        "/help" => ReplCommand::Help,
        "/quit" | "/exit" => ReplCommand::Quit,
        other => ReplCommand::Unknown(other.to_string()),
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_cyan().bold());
    println!("  /clear           start a new conversation");
    println!("  /model [name]    show or switch the model");
    println!("  /models          list available models");
    println!("  /history         show the conversation so far");
    println!("  /help            show this help");
    println!("  /quit            exit");
}

fn print_history(controller: &ChatController) {
    let history = controller.history();
    if history.is_empty() {
        println!("{}", "No messages yet.".bright_black());
        return;
    }
    for turn in history.turns() {
        let label = match turn.role {
            Role::User => "You:".bright_green().bold(),
            Role::Assistant => "AI:".bright_cyan().bold(),
            Role::System => "System:".bright_black().bold(),
        };
        println!("{} {}", label, turn.content);
    }
}

const CLEAR_QUESTION: &str = "Clear the whole conversation?";
const SWITCH_QUESTION: &str = "Switching models will clear the conversation. Continue?";

/// Only a non-empty conversation is worth a confirmation
pub fn needs_confirmation(history: &ConversationHistory) -> bool {
    !history.is_empty()
}

/// `y` or `yes`, any case; everything else (including no answer) declines
pub fn is_confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn confirm(rl: &mut DefaultEditor, question: &str) -> bool {
    let prompt = format!("{} ", format!("{} [y/N]", question).yellow());
    matches!(rl.readline(&prompt), Ok(answer) if is_confirmed(&answer))
}

async fn load_catalog(client: &PollinationsClient) -> Vec<ModelInfo> {
    match client.list_models().await {
        Ok(models) => {
            log::debug!("loaded {} models", models.len());
            models
        }
        Err(e) => {
            eprintln!("{} {}", "Error loading models:".red(), e);
            Vec::new()
        }
    }
}

/// Send every message in order and wait for the replies
async fn run_batch(controller: &ChatController, messages: &[String]) {
    for message in messages {
        if !controller.submit(message) {
            log::warn!("skipping blank message");
        }
    }
    controller.wait_idle().await;
}

/// Run interactive REPL mode, or batch mode when messages were given
pub async fn run_repl_mode(args: &ChatArgs, config: AppConfig) -> Result<()> {
    let chat_config = config.chat_config(args);
    let client = Arc::new(PollinationsClient::new(config.client_config.clone()));
    let batch = !args.messages.is_empty();
    let view = Arc::new(TerminalView::new(batch));
    let controller = ChatController::new(client.clone(), view.clone(), chat_config);
    let dispatcher = controller.spawn_dispatcher();

    if batch {
        run_batch(&controller, &args.messages).await;
        dispatcher.abort();
        return Ok(());
    }

    println!("{}", "🌸 pollichat".bright_cyan().bold());
    println!(
        "{}",
        "Type a message to chat, /help for commands, /quit to exit\n".bright_black()
    );

    let mut models = load_catalog(&client).await;
    let mut rl = DefaultEditor::new().context("Failed to initialise line editor")?;

    loop {
        let model_indicator = format!("[{}]", controller.current_model()).bright_magenta();
        let readline = rl.readline(&format!("{} {} ", model_indicator, "You:".bright_green().bold()));

        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Input error:".red(), err);
                break;
            }
        };

        match parse_command(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Message(message) => {
                let _ = rl.add_history_entry(message.as_str());
                controller.submit(&message);
                // Input stays closed until the reply is in
                controller.wait_idle().await;
            }
            ReplCommand::Clear => {
                if !needs_confirmation(&controller.history()) || confirm(&mut rl, CLEAR_QUESTION) {
                    controller.clear();
                }
            }
            ReplCommand::Model(None) => println!("Current model: {}", controller.current_model().bright_magenta()),
            ReplCommand::Model(Some(name)) => {
                if name == controller.current_model() {
                    println!("Already using {}", name.bright_magenta());
                    continue;
                }
                if !models.is_empty() && !models.iter().any(|m| m.name == name) {
                    println!("{} {}", "Unknown model:".yellow(), name);
                    continue;
                }
                if needs_confirmation(&controller.history()) && !confirm(&mut rl, SWITCH_QUESTION) {
                    continue;
                }
                if controller.switch_model(&name) {
                    println!("Switched to {}", name.bright_magenta());
                }
            }
            ReplCommand::Models => {
                if models.is_empty() {
                    models = load_catalog(&client).await;
                }
                print_models(&models, &controller.current_model());
            }
            ReplCommand::History => print_history(&controller),
            ReplCommand::Help => print_help(),
            ReplCommand::Unknown(command) => {
                println!("{} {} (try /help)", "Unknown command:".yellow(), command);
            }
            ReplCommand::Quit => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
        }
    }

    dispatcher.abort();
    Ok(())
}
