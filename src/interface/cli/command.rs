//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::domain::credential::ProviderId;

#[derive(Debug, Parser)]
#[command(name = "lifepoop-auth")]
#[command(about = "Sign in to LifePoop with Apple or Kakao")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the provider login flow and print the credential as JSON
    Login {
        /// Provider to sign in with (apple, kakao)
        provider: String,
    },
    /// Show effective merged config and login helper availability
    Config,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Login(ProviderId),
    InspectConfig,
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        match self.command {
            Commands::Config => Ok(CliAction::InspectConfig),
            Commands::Login { provider } => provider.parse().map(CliAction::Login),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(args: &[&str]) -> Result<CliAction, String> {
        Cli::try_parse_from(args)
            .map_err(|err| err.to_string())?
            .into_action()
    }

    #[test]
    fn parses_login_and_config() {
        assert_eq!(
            action(&["lifepoop-auth", "login", "Kakao"]),
            Ok(CliAction::Login(ProviderId::Kakao))
        );
        assert_eq!(
            action(&["lifepoop-auth", "login", "apple"]),
            Ok(CliAction::Login(ProviderId::Apple))
        );
        assert_eq!(action(&["lifepoop-auth", "config"]), Ok(CliAction::InspectConfig));
    }

    #[test]
    fn rejects_unknown_provider_and_missing_command() {
        assert!(action(&["lifepoop-auth", "login", "naver"]).is_err());
        assert!(action(&["lifepoop-auth"]).is_err());
    }
}
