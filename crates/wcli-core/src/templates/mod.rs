//! Build descriptor templates
//!
//! This module provides:
//! - The templates manifest (`template.yaml`) mapping keys to files
//! - Strict `{{ placeholder }}` rendering into build descriptors
//! - Version compatibility checking of the templates against the CLI

pub mod manifest;
pub mod renderer;
pub mod version;

use std::path::PathBuf;

pub use manifest::TemplateManifest;
pub use renderer::{render_str, TemplateContext, TemplateKey, TemplateRenderer};
pub use version::check_compatibility;

/// Templates directory shipped with this package
pub fn default_template_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_templates_resolve() {
        let renderer = TemplateRenderer::new(default_template_dir());
        for key in [
            TemplateKey::Project,
            TemplateKey::ModuleLibrary,
            TemplateKey::ModuleExecutable,
        ] {
            assert!(renderer.template_path(key).unwrap().is_file(), "missing {}", key);
        }
    }

    #[test]
    fn test_shipped_templates_compatible_with_crate_version() {
        let renderer = TemplateRenderer::new(default_template_dir());
        assert!(renderer
            .check_version(env!("CARGO_PKG_VERSION"))
            .unwrap()
            .is_none());
    }
}
