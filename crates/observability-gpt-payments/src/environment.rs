//! Billing backend environments.

use std::fmt;
use std::str::FromStr;

use crate::error::PaymentsError;

/// A named billing backend deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Public sandbox (test credits).
    #[default]
    Sandbox,
    /// Production.
    Live,
    /// Staging deployment backed by the sandbox network.
    StagingSandbox,
    /// Staging deployment backed by the live network.
    StagingLive,
}

impl Environment {
    /// Protocol API base URL.
    #[must_use]
    pub const fn backend_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://api.sandbox.nevermined.app",
            Self::Live => "https://api.live.nevermined.app",
            Self::StagingSandbox => "https://api.sandbox.nevermined.dev",
            Self::StagingLive => "https://api.live.nevermined.dev",
        }
    }

    /// Observability (logging and model gateway) base URL.
    #[must_use]
    pub const fn observability_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://helicone.sandbox.nevermined.app",
            Self::Live => "https://helicone.live.nevermined.app",
            Self::StagingSandbox => "https://helicone.sandbox.nevermined.dev",
            Self::StagingLive => "https://helicone.live.nevermined.dev",
        }
    }

    /// The name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
            Self::StagingSandbox => "staging_sandbox",
            Self::StagingLive => "staging_live",
        }
    }
}

impl FromStr for Environment {
    type Err = PaymentsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "live" => Ok(Self::Live),
            "staging_sandbox" => Ok(Self::StagingSandbox),
            "staging_live" => Ok(Self::StagingLive),
            other => Err(PaymentsError::Configuration(format!(
                "unknown environment: {other}"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("sandbox".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert_eq!("LIVE".parse::<Environment>().unwrap(), Environment::Live);
        assert_eq!(
            "staging_sandbox".parse::<Environment>().unwrap(),
            Environment::StagingSandbox
        );
        assert!("mainnet".parse::<Environment>().is_err());
    }

    #[test]
    fn display_matches_config_name() {
        for env in [
            Environment::Sandbox,
            Environment::Live,
            Environment::StagingSandbox,
            Environment::StagingLive,
        ] {
            assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        }
    }
}
