//! Tunables shared by the session engine and the configuration file.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Placeholder substituted with the lookup target in [`LinkConfig::url_template`].
pub const TARGET_PLACEHOLDER: &str = "{target}";

/// Largest cap that keeps every rank a single digit.
pub const MAX_RESULT_CAP: usize = 9;

/// Query trigger and result selection behaviour.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Character that starts an interactive query.
    #[serde(default = "QueryConfig::default_trigger")]
    pub trigger: char,

    /// Size of the live result list; ranks are single digits.
    #[serde(default = "QueryConfig::default_max_results")]
    pub max_results: usize,

    /// Leave the query open when a rank digit has no matching result.
    #[serde(default = "QueryConfig::default_ignore_out_of_range")]
    pub ignore_out_of_range: bool,

    /// Keep the trigger character in front of the inserted value.
    #[serde(default)]
    pub retain_trigger: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            trigger: Self::default_trigger(),
            max_results: Self::default_max_results(),
            ignore_out_of_range: Self::default_ignore_out_of_range(),
            retain_trigger: false,
        }
    }
}

impl QueryConfig {
    const fn default_trigger() -> char {
        ':'
    }

    const fn default_max_results() -> usize {
        MAX_RESULT_CAP
    }

    const fn default_ignore_out_of_range() -> bool {
        true
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger.is_whitespace() || self.trigger.is_ascii_digit() {
            return Err(ConfigError::InvalidTrigger(self.trigger));
        }
        if self.max_results == 0 || self.max_results > MAX_RESULT_CAP {
            return Err(ConfigError::InvalidResultCap(self.max_results));
        }
        Ok(())
    }
}

/// How the link column of the fact table is rendered.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    #[serde(default = "LinkConfig::default_label")]
    pub label: String,

    /// URL with a `{target}` placeholder.
    #[serde(default = "LinkConfig::default_url_template")]
    pub url_template: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            label: Self::default_label(),
            url_template: Self::default_url_template(),
        }
    }
}

impl LinkConfig {
    fn default_label() -> String {
        "Reputation Check".to_string()
    }

    fn default_url_template() -> String {
        "https://www.virustotal.com/gui/search/{target}".to_string()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url_template.contains(TARGET_PLACEHOLDER) {
            Ok(())
        } else {
            Err(ConfigError::InvalidLinkTemplate(self.url_template.clone()))
        }
    }

    /// Render a markdown hyperlink for `target`.
    #[must_use]
    pub fn render(&self, target: &str) -> String {
        let url = self.url_template.replace(TARGET_PLACEHOLDER, target);
        format!("[{}]({url})", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_are_valid() {
        let config = QueryConfig::default();
        assert_eq!(config.trigger, ':');
        assert_eq!(config.max_results, 9);
        assert!(config.ignore_out_of_range);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_query_validation() {
        let mut config = QueryConfig {
            max_results: 10,
            ..QueryConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidResultCap(10)));

        config.max_results = 3;
        config.trigger = '7';
        assert_eq!(config.validate(), Err(ConfigError::InvalidTrigger('7')));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_partial_query_config_uses_defaults() {
        let config: QueryConfig =
            serde_json::from_str(r#"{"max_results": 5}"#).expect("valid JSON should deserialize");
        assert_eq!(config.max_results, 5);
        assert_eq!(config.trigger, ':');
        assert!(!config.retain_trigger);
    }

    #[test]
    fn test_link_render() {
        let links = LinkConfig::default();
        assert_eq!(
            links.render("8.8.8.8"),
            "[Reputation Check](https://www.virustotal.com/gui/search/8.8.8.8)"
        );
        assert_eq!(links.validate(), Ok(()));

        let broken = LinkConfig {
            url_template: "https://example.com/".to_string(),
            ..LinkConfig::default()
        };
        assert!(broken.validate().is_err());
    }
}
