//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(
    name = "gastroassist",
    version,
    about = "Ask gastroenterology questions from the terminal"
)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/gastroassist/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the answering service origin (server.base_url)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Override the identity sent with each question (session.user_id)
    #[arg(long = "user-id", global = true, value_name = "ID")]
    pub user_id: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a single question and print the answer
    Ask(AskArgs),
}

#[derive(Debug, Args)]
pub struct AskArgs {
    /// Print the raw answer payload as JSON
    #[arg(long)]
    pub json: bool,

    /// The question; multiple words are joined with spaces
    #[arg(value_name = "QUESTION", required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl AskArgs {
    pub fn question_text(&self) -> String {
        self.question.join(" ")
    }
}

impl Cli {
    /// Load the config file named on the command line, or the default one.
    pub fn load_config(&self) -> Result<Config, crate::config::ConfigError> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// Apply command-line overrides on top of file values.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(server) = &self.server {
            config.server.base_url = server.clone();
        }
        if let Some(user_id) = &self.user_id {
            config.session.user_id = user_id.clone();
        }
    }
}
