//! Pipeline configuration
//!
//! Each standard behavior can be switched off. Everything is on by default;
//! disabling a behavior removes it from every pipeline the mediator builds,
//! the order of the remaining ones never changes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::pipeline::PipelineBehavior;
use crate::pipeline::behaviors::{
    ExceptionBehavior, LoggingBehavior, NotificationBehavior, ValidationBehavior,
};
use crate::request::Request;
use crate::validation::Validator;

/// Prefix of the environment variables read by [`PipelineConfig::from_env`]
pub const ENV_PREFIX: &str = "CONDUIT_PIPELINE_";

/// Which standard behaviors are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fault containment
    pub exception: bool,
    /// Entry/exit logging
    pub logging: bool,
    /// Validator execution
    pub validation: bool,
    /// Notification merging
    pub notification: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            exception: true,
            logging: true,
            validation: true,
            notification: true,
        }
    }
}

impl PipelineConfig {
    /// Configuration with every behavior off
    pub fn disabled() -> Self {
        Self {
            exception: false,
            logging: false,
            validation: false,
            notification: false,
        }
    }

    /// Set the exception behavior
    pub fn with_exception(mut self, enabled: bool) -> Self {
        self.exception = enabled;
        self
    }

    /// Set the logging behavior
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Set the validation behavior
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validation = enabled;
        self
    }

    /// Set the notification behavior
    pub fn with_notification(mut self, enabled: bool) -> Self {
        self.notification = enabled;
        self
    }

    /// Read overrides from `CONDUIT_PIPELINE_{EXCEPTION,LOGGING,VALIDATION,NOTIFICATION}`.
    ///
    /// Unset variables keep the default; unrecognized values are ignored
    /// with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        for (name, slot) in [
            ("EXCEPTION", &mut config.exception),
            ("LOGGING", &mut config.logging),
            ("VALIDATION", &mut config.validation),
            ("NOTIFICATION", &mut config.notification),
        ] {
            let key = format!("{ENV_PREFIX}{name}");
            let Some(raw) = lookup(&key) else {
                continue;
            };
            match parse_switch(&raw) {
                Some(enabled) => *slot = enabled,
                None => warn!(key = %key, value = %raw, "ignoring unrecognized pipeline switch"),
            }
        }
        config
    }

    /// Names of the active behaviors, outermost first
    pub fn active(&self) -> Vec<&'static str> {
        [
            (self.exception, "exception"),
            (self.logging, "logging"),
            (self.validation, "validation"),
            (self.notification, "notification"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }

    /// Standard behaviors for one request type, in fixed order
    pub(crate) fn behaviors<R: Request>(
        &self,
        validators: Vec<Arc<dyn Validator<R>>>,
    ) -> Vec<Arc<dyn PipelineBehavior<R>>> {
        let mut behaviors: Vec<Arc<dyn PipelineBehavior<R>>> = Vec::with_capacity(4);
        if self.exception {
            behaviors.push(Arc::new(ExceptionBehavior));
        }
        if self.logging {
            behaviors.push(Arc::new(LoggingBehavior));
        }
        if self.validation {
            behaviors.push(Arc::new(ValidationBehavior::new(validators)));
        }
        if self.notification {
            behaviors.push(Arc::new(NotificationBehavior));
        }
        behaviors
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_enables_everything() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.active(),
            vec!["exception", "logging", "validation", "notification"]
        );
        assert!(PipelineConfig::disabled().active().is_empty());
    }

    #[test]
    fn test_switches_keep_order() {
        let config = PipelineConfig::default()
            .with_logging(false)
            .with_notification(false);
        assert_eq!(config.active(), vec!["exception", "validation"]);
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("CONDUIT_PIPELINE_EXCEPTION", "off"),
            ("CONDUIT_PIPELINE_VALIDATION", " FALSE "),
            ("CONDUIT_PIPELINE_LOGGING", "maybe"),
        ]
        .into_iter()
        .collect();

        let config = PipelineConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert!(!config.exception);
        assert!(!config.validation);
        assert!(config.logging);
        assert!(config.notification);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: PipelineConfig = serde_json::from_str(r#"{"logging": false}"#).unwrap();
        assert_eq!(config, PipelineConfig::default().with_logging(false));
    }
}
