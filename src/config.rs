//! Environment driven configuration
use super::gate::BasicAuthCredentials;
use anyhow::Context;
use std::path::Path;
use std::str::FromStr;

pub const VALIDATION_VAR: &str = "INSPECTION_VALIDATION";
pub const USERNAME_VAR: &str = "BASIC_AUTH_USERNAME";
pub const PASSWORD_VAR: &str = "BASIC_AUTH_PASSWORD";

/// How strictly a session checks inspector input.
///
/// `Permissive` accepts empty rejection reasons, negative quantities and
/// quantity edits on rejected items, exactly as entered. `Strict` turns each
/// of those into an error.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPolicy {
    #[default]
    Permissive,
    Strict,
}

impl ValidationPolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, ValidationPolicy::Strict)
    }
}

impl FromStr for ValidationPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(ValidationPolicy::Permissive),
            "strict" => Ok(ValidationPolicy::Strict),
            other => Err(anyhow::anyhow!(
                "{VALIDATION_VAR} must be 'permissive' or 'strict', got '{other}'"
            )),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InspectionConfig {
    pub validation: ValidationPolicy,
    pub basic_auth: Option<BasicAuthCredentials>,
}

impl InspectionConfig {
    /// Load `.env` if one exists, then read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded environment file");
        }
        Self::from_vars(std::env::vars())
    }

    /// Read settings from an env file without touching the process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let vars = dotenvy::from_path_iter(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Self::from_vars(vars)
    }

    pub fn from_vars<I, K, V>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = InspectionConfig::default();
        let mut username = None;
        let mut password = None;

        for (key, value) in vars {
            let value: String = value.into();
            match key.as_ref() {
                VALIDATION_VAR => config.validation = value.parse()?,
                USERNAME_VAR => username = Some(value),
                PASSWORD_VAR => password = Some(value),
                _ => {}
            }
        }

        // both halves are needed, an empty value counts as unset
        config.basic_auth = match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(BasicAuthCredentials::new(username, password))
            }
            _ => None,
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_permissive_without_gate() {
        let config = InspectionConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config, InspectionConfig::default());
        assert_eq!(config.validation, ValidationPolicy::Permissive);
        assert!(config.basic_auth.is_none());
    }

    #[test]
    fn reads_policy_and_credentials() {
        let config = InspectionConfig::from_vars([
            (VALIDATION_VAR, "Strict"),
            (USERNAME_VAR, "inspector"),
            (PASSWORD_VAR, "hunter2"),
            ("PATH", "/usr/bin"),
        ])
        .unwrap();

        assert!(config.validation.is_strict());
        assert_eq!(
            config.basic_auth,
            Some(BasicAuthCredentials::new("inspector", "hunter2"))
        );
    }

    #[test]
    fn half_configured_gate_is_disabled() {
        let config =
            InspectionConfig::from_vars([(USERNAME_VAR, "inspector"), (PASSWORD_VAR, "")])
                .unwrap();
        assert!(config.basic_auth.is_none());
    }

    #[test]
    fn unknown_policy_is_an_error() {
        assert!(InspectionConfig::from_vars([(VALIDATION_VAR, "lenient")]).is_err());
    }
}
