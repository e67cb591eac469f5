//! Service identity configuration.

use serde::Deserialize;

use super::ValidationError;

/// Deployment environment the service runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

/// Service configuration (name, environment).
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Service name used in log output.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
}

fn default_service_name() -> String {
    "storypoints".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            environment: Environment::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyServiceName);
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
