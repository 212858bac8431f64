//! Module kinds and module discovery

use crate::error::{Error, Result};
use crate::paths::{CMAKELISTS_FILE, SOURCE_DIR};
use crate::templates::TemplateKey;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// What a module's build descriptor produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleKind {
    #[default]
    Library,
    Executable,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Library => "library",
            ModuleKind::Executable => "executable",
        }
    }

    /// Template the module's build descriptor is rendered from
    pub fn template_key(&self) -> TemplateKey {
        match self {
            ModuleKind::Library => TemplateKey::ModuleLibrary,
            ModuleKind::Executable => TemplateKey::ModuleExecutable,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Module names must be a single normal path component
pub fn validate_module_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::InvalidModuleName(name.to_string())),
    }
}

/// List the modules under `root/Source`
///
/// A module is an immediate subdirectory holding a build descriptor. Other
/// directories are skipped, and a root without a Source directory has no
/// modules. Results are sorted by name.
pub fn discover_modules(root: &Path) -> Result<Vec<PathBuf>> {
    let source_path = root.join(SOURCE_DIR);
    if !source_path.is_dir() {
        return Ok(Vec::new());
    }

    let mut modules = Vec::new();
    for entry in WalkDir::new(&source_path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(&source_path).to_path_buf();
            Error::fs(path, e.into())
        })?;

        // `Path::is_dir` follows symlinked module directories
        if entry.path().is_dir() && entry.path().join(CMAKELISTS_FILE).is_file() {
            modules.push(entry.into_path());
        }
    }

    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_skips_directories_without_descriptor() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("Source");
        fs::create_dir_all(source.join("WCore")).unwrap();
        fs::write(source.join("WCore/CMakeLists.txt"), "").unwrap();
        fs::create_dir_all(source.join("Scratch")).unwrap();
        fs::create_dir_all(source.join("WRender")).unwrap();
        fs::write(source.join("WRender/CMakeLists.txt"), "").unwrap();
        fs::write(source.join("notes.txt"), "").unwrap();

        let modules = discover_modules(dir.path()).unwrap();
        assert_eq!(modules, vec![source.join("WCore"), source.join("WRender")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_includes_symlinked_module() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("Source");
        let shared = dir.path().join("shared/WNet");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("CMakeLists.txt"), "").unwrap();
        std::os::unix::fs::symlink(&shared, source.join("WNet")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing"), source.join("Dangling")).unwrap();

        let modules = discover_modules(dir.path()).unwrap();
        assert_eq!(modules, vec![source.join("WNet")]);
    }

    #[test]
    fn test_discover_without_source_dir() {
        let dir = tempdir().unwrap();
        assert!(discover_modules(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_validate_module_name() {
        assert!(validate_module_name("WRender").is_ok());
        assert!(validate_module_name("W.Render").is_ok());
        assert!(validate_module_name("").is_err());
        assert!(validate_module_name("..").is_err());
        assert!(validate_module_name("a/b").is_err());
        assert!(validate_module_name("/abs").is_err());
    }

    #[test]
    fn test_module_kind_templates() {
        assert_eq!(ModuleKind::default(), ModuleKind::Library);
        assert_eq!(ModuleKind::Library.template_key(), TemplateKey::ModuleLibrary);
        assert_eq!(ModuleKind::Executable.template_key(), TemplateKey::ModuleExecutable);
    }
}
