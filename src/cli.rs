//! Command-line interface definitions.
//!
//! Every option can also be set through the environment (a `.env` file in the
//! working directory is loaded first).

use crate::bot::Command;
use clap::Parser;

/// Command-line arguments for the health news bot.
///
/// # Examples
///
/// ```sh
/// # Run the Telegram bot
/// TELEGRAM_TOKEN=123:ABC health_news_bot
///
/// # Print one command's replies without Telegram
/// health_news_bot --print keywords
///
/// # Use a custom keyword vocabulary
/// health_news_bot --vocabulary ./my_vocabulary.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Base URL of the Telegram Bot API
    #[arg(long, env = "TELEGRAM_API_BASE", default_value = "https://api.telegram.org")]
    pub api_base: String,

    /// Long-polling timeout in seconds
    #[arg(long, env = "TELEGRAM_POLL_TIMEOUT", default_value_t = 30)]
    pub poll_timeout: u64,

    /// YAML file replacing the built-in keyword vocabulary
    #[arg(long, env = "VOCABULARY_PATH")]
    pub vocabulary: Option<String>,

    /// Run a single command and print its replies to stdout
    #[arg(long, value_enum)]
    pub print: Option<Command>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["health_news_bot", "--telegram-token", "123:ABC"]);

        assert_eq!(cli.telegram_token.as_deref(), Some("123:ABC"));
        assert_eq!(cli.api_base, "https://api.telegram.org");
        assert_eq!(cli.poll_timeout, 30);
        assert!(cli.print.is_none());
    }

    #[test]
    fn test_cli_print_mode() {
        let cli = Cli::parse_from([
            "health_news_bot",
            "--print",
            "keywords",
            "--vocabulary",
            "/tmp/vocab.yaml",
        ]);

        assert_eq!(cli.print, Some(Command::Keywords));
        assert_eq!(cli.vocabulary.as_deref(), Some("/tmp/vocab.yaml"));
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["health_news_bot", "--print", "weather"]).is_err());
    }
}
