use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use fieldnotes_core::{LinkConfig, QueryConfig};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub links: LinkConfig,
    #[serde(default)]
    pub case_files: CaseFilesConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct CaseFilesConfig {
    /// Root directory for saved notes; `~/Documents/Case Files` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl CaseFilesConfig {
    pub fn resolve_root(&self) -> anyhow::Result<PathBuf> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        let documents = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?;
        Ok(documents.join("Case Files"))
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("fieldnotes"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'fieldnotes init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_json(&content)
    }

    /// Load the config file, falling back to defaults when there is none.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load()
        } else {
            debug!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.query.validate()?;
        self.links.validate()?;
        Ok(())
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "query": {
    "trigger": ":",
    "max_results": 9,
    "ignore_out_of_range": true,
    "retain_trigger": false
  },
  "links": {
    "label": "Reputation Check",
    "url_template": "https://www.virustotal.com/gui/search/{target}"
  },
  "case_files": {}
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("🔧 Configuration options:");
        println!("   - query.trigger: character that starts a fact lookup while typing");
        println!("   - query.max_results: number of ranked results shown (1-9)");
        println!("   - links.url_template: reputation lookup URL, {{target}} is replaced");
        println!("   - case_files.root: where saved notes go (default ~/Documents/Case Files)");
        println!();
        Ok(())
    }
}
