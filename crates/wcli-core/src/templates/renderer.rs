//! Named template rendering with strict placeholder substitution

use super::manifest::TemplateManifest;
use super::version;
use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Templates the scaffolder knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    /// Root build descriptor of a project
    Project,
    /// Build descriptor of a library module
    ModuleLibrary,
    /// Build descriptor of an executable module
    ModuleExecutable,
}

impl TemplateKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKey::Project => "project",
            TemplateKey::ModuleLibrary => "module-library",
            TemplateKey::ModuleExecutable => "module-executable",
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flat placeholder-name to value mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a string value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert a path value, always written with forward slashes
    pub fn insert_path(&mut self, key: impl Into<String>, path: &Path) -> &mut Self {
        let value = path.to_string_lossy().replace('\\', "/");
        self.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder regex is valid")
    })
}

/// Substitute every `{{ name }}` in `source` from `context`
///
/// All placeholders are checked before substitution, so a template either
/// renders completely or not at all.
pub fn render_str(template: &str, source: &str, context: &TemplateContext) -> Result<String> {
    let regex = placeholder_regex();

    if let Some(missing) = regex
        .captures_iter(source)
        .map(|caps| caps[1].to_string())
        .find(|name| !context.contains(name))
    {
        return Err(Error::UnresolvedPlaceholder {
            template: template.to_string(),
            placeholder: missing,
        });
    }

    let rendered = regex.replace_all(source, |caps: &Captures| {
        context.get(&caps[1]).unwrap_or_default().to_string()
    });
    Ok(rendered.into_owned())
}

/// Renders named templates from a templates directory
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template_dir: PathBuf,
}

impl TemplateRenderer {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
        }
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Warn-only compatibility check of the templates against the running CLI
    pub fn check_version(&self, cli_version: &str) -> Result<Option<String>> {
        let manifest = TemplateManifest::load(&self.template_dir)?;
        Ok(manifest
            .version
            .as_deref()
            .and_then(|template_version| version::check_compatibility(cli_version, template_version)))
    }

    /// Path of the template file a key resolves to
    pub fn template_path(&self, key: TemplateKey) -> Result<PathBuf> {
        let manifest = TemplateManifest::load(&self.template_dir)?;
        Ok(manifest.resolve(&self.template_dir, key.as_str()))
    }

    /// Render a template to a string
    pub fn render_to_string(&self, key: TemplateKey, context: &TemplateContext) -> Result<String> {
        let template_path = self.template_path(key)?;
        if !template_path.is_file() {
            return Err(Error::TemplateNotFound {
                key: key.as_str().to_string(),
                path: template_path,
            });
        }

        let source =
            std::fs::read_to_string(&template_path).map_err(|e| Error::fs(&template_path, e))?;
        render_str(key.as_str(), &source, context)
    }

    /// Render a template and write it to `output_path`, creating parent
    /// directories. An existing file is overwritten.
    pub fn render(
        &self,
        key: TemplateKey,
        context: &TemplateContext,
        output_path: &Path,
    ) -> Result<()> {
        let rendered = self.render_to_string(key, context)?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::fs(parent, e))?;
        }
        std::fs::write(output_path, rendered).map_err(|e| Error::fs(output_path, e))?;

        tracing::info!("Rendered {} template to {}", key, output_path.display());
        Ok(())
    }
}
