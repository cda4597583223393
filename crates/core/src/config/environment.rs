use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::validation::ConfigError;

/// Runtime surface the application was launched for
///
/// This is not the deployment environment (dev/staging/prod) but the shape
/// of the process: an HTTP server, a console command, a test run, or a
/// launcher that has not declared itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Web,
    Console,
    Test,
    Unknown,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "web" => Ok(AppEnvironment::Web),
            "console" => Ok(AppEnvironment::Console),
            "test" | "testing" => Ok(AppEnvironment::Test),
            "unknown" => Ok(AppEnvironment::Unknown),
            _ => Err(ConfigError::invalid_value(
                "environment",
                s,
                "web, console, test, or unknown",
            )),
        }
    }
}

impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env_str = match self {
            AppEnvironment::Web => "web",
            AppEnvironment::Console => "console",
            AppEnvironment::Test => "test",
            AppEnvironment::Unknown => "unknown",
        };
        write!(f, "{}", env_str)
    }
}

impl AppEnvironment {
    /// Check if the application serves HTTP
    pub fn is_web(&self) -> bool {
        matches!(self, AppEnvironment::Web)
    }

    /// Check if the application runs a console command
    pub fn is_console(&self) -> bool {
        matches!(self, AppEnvironment::Console)
    }

    /// Check if the application runs under a test harness
    pub fn is_test(&self) -> bool {
        matches!(self, AppEnvironment::Test)
    }

    /// Check if the launcher declared an environment at all
    pub fn is_known(&self) -> bool {
        !matches!(self, AppEnvironment::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_round_trip() {
        for env in [
            AppEnvironment::Web,
            AppEnvironment::Console,
            AppEnvironment::Test,
            AppEnvironment::Unknown,
        ] {
            assert_eq!(env.to_string().parse::<AppEnvironment>().unwrap(), env);
        }
    }

    #[test]
    fn test_environment_aliases() {
        assert_eq!(
            "testing".parse::<AppEnvironment>().unwrap(),
            AppEnvironment::Test
        );
        assert_eq!("WEB".parse::<AppEnvironment>().unwrap(), AppEnvironment::Web);
        assert!("repl".parse::<AppEnvironment>().is_err());
    }

    #[test]
    fn test_environment_serde() {
        let parsed: AppEnvironment = serde_json::from_str("\"console\"").unwrap();
        assert_eq!(parsed, AppEnvironment::Console);
        assert_eq!(serde_json::to_string(&AppEnvironment::Web).unwrap(), "\"web\"");
    }
}
