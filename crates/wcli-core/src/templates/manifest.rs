//! Template manifest types and parsing

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Manifest file name inside a templates directory
pub const MANIFEST_FILE: &str = "template.yaml";

/// Extension of template files resolved by key when the manifest has no entry
pub const TEMPLATE_EXTENSION: &str = "template";

/// Templates directory manifest (templates/template.yaml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Minimum CLI version the templates were written for
    #[serde(default)]
    pub version: Option<String>,

    /// Template key to file name, relative to the templates directory
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
}

impl TemplateManifest {
    /// Load the manifest from a templates directory
    ///
    /// A missing manifest is not an error: keys then resolve to `<key>.template`.
    pub fn load(template_dir: &Path) -> Result<Self> {
        let manifest_path = template_dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&manifest_path).map_err(|e| Error::fs(&manifest_path, e))?;
        Self::parse(&content).map_err(|message| Error::InvalidManifest {
            path: manifest_path,
            message,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// File name for a template key
    pub fn file_name(&self, key: &str) -> String {
        self.templates
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("{}.{}", key, TEMPLATE_EXTENSION))
    }

    /// Full path of a template key inside `template_dir`
    pub fn resolve(&self, template_dir: &Path, key: &str) -> PathBuf {
        template_dir.join(self.file_name(key))
    }
}
