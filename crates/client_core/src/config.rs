use std::{collections::HashMap, fs, path::Path};

use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://fsa-crud-2aa9294fe819.herokuapp.com/api";
pub const DEFAULT_COHORT: &str = "/2506-Angel";
pub const SETTINGS_FILE: &str = "planner.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub cohort: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            cohort: DEFAULT_COHORT.into(),
        }
    }
}

impl Settings {
    /// Base address joined with the cohort segment, without a trailing slash.
    pub fn api_root(&self) -> Result<String, url::ParseError> {
        let base = Url::parse(self.base_url.trim())?;
        let base = base.as_str().trim_end_matches('/');
        let cohort = self.cohort.trim().trim_matches('/');

        let root = if cohort.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{cohort}")
        };
        Url::parse(&root)?;
        Ok(root)
    }

    /// Applies `base_url` / `cohort` keys from a TOML document. Malformed
    /// documents are ignored.
    pub fn apply_toml(&mut self, raw: &str) {
        let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
            tracing::warn!(file = SETTINGS_FILE, "ignoring malformed settings file");
            return;
        };
        if let Some(v) = file_cfg.get("base_url") {
            self.base_url = v.clone();
        }
        if let Some(v) = file_cfg.get("cohort") {
            self.cohort = v.clone();
        }
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("PLANNER_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("APP__BASE_URL") {
            self.base_url = v;
        }

        if let Some(v) = lookup("PLANNER_COHORT") {
            self.cohort = v;
        }
        if let Some(v) = lookup("APP__COHORT") {
            self.cohort = v;
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        settings.apply_toml(&raw);
    }
    settings.apply_env(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()));

    tracing::debug!(
        base_url = %settings.base_url,
        cohort = %settings.cohort,
        "resolved planner settings"
    );
    settings
}
