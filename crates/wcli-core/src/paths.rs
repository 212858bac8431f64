//! Path resolution for builds, installs, projects and modules
//!
//! Every location the CLI touches is computed here from a handful of
//! primitive inputs. Nothing in this module performs I/O except
//! [`absolute`], which only reads the current directory.

use crate::error::{Error, Result};
use clap::builder::PossibleValue;
use clap::ValueEnum;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Directory name that identifies an engine root
pub const ENGINE_DIR_NAME: &str = "WEng";

/// Build descriptor file name consumed by CMake
pub const CMAKELISTS_FILE: &str = "CMakeLists.txt";

/// Source directory of a project, parent of all modules
pub const SOURCE_DIR: &str = "Source";

/// Suffix of every build folder name
const BUILD_FOLDER_SUFFIX: &str = "Standalone";

/// Top-level folders every project carries
pub const PROJECT_FOLDER_STRUCTURE: &[&str] = &["Source", "Assets", "Shaders", "Docs", "cmake"];

/// Module content set; `{module_name}` is replaced by the module's name.
/// Entries with an extension are files, the rest are directories.
pub const MODULE_STRUCTURE: &[&str] = &[
    "Shaders",
    "Assets",
    "Docs",
    "Tests",
    "{module_name}.cpp",
    "{module_name}.h",
    "README.md",
];

/// Target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    X86,
    X64,
    X86_64,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X64 => "x64",
            Architecture::X86_64 => "x86_64",
        }
    }

    /// Architectures the host platform can build for
    pub fn allowed() -> &'static [Architecture] {
        if cfg!(windows) {
            &[Architecture::X86, Architecture::X64]
        } else {
            &[Architecture::X86_64]
        }
    }

    /// Default architecture on the host platform
    pub fn host_default() -> Architecture {
        if cfg!(windows) {
            Architecture::X64
        } else {
            Architecture::X86_64
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ValueEnum for Architecture {
    fn value_variants<'a>() -> &'a [Self] {
        Architecture::allowed()
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.as_str()))
    }
}

/// CMake build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BuildConfiguration {
    #[value(name = "Debug")]
    Debug,
    #[value(name = "Release")]
    Release,
}

impl BuildConfiguration {
    pub const ALL: [BuildConfiguration; 2] = [BuildConfiguration::Debug, BuildConfiguration::Release];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "Debug",
            BuildConfiguration::Release => "Release",
        }
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Host operating system name as embedded in build folder names
/// ("Linux", "Windows", "Darwin", ...)
pub fn host_system_name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "windows" => "Windows",
        "macos" => "Darwin",
        "freebsd" => "FreeBSD",
        "netbsd" => "NetBSD",
        "openbsd" => "OpenBSD",
        other => other,
    }
}

/// Format `{system}_{arch}_{config}_Standalone`
pub fn format_build_folder_name(
    system: &str,
    arch: Architecture,
    config: BuildConfiguration,
) -> String {
    format!("{}_{}_{}_{}", system, arch, config, BUILD_FOLDER_SUFFIX)
}

/// Check whether a path names an engine root (structural check on the final component)
pub fn is_engine_path(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name == ENGINE_DIR_NAME)
}

/// Fail with [`Error::InvalidEngineRoot`] unless `path` is an engine root
pub fn validate_engine_path(path: &Path) -> Result<()> {
    if is_engine_path(path) {
        Ok(())
    } else {
        Err(Error::InvalidEngineRoot(path.to_path_buf()))
    }
}

/// Make a path absolute against the current directory without touching symlinks
///
/// `.` and `..` segments are folded lexically, so `WEng/Source/..` names `WEng`.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| Error::fs(path, e))?;
    Ok(normalize(&absolute))
}

/// Fold `.` and `..` out of a path without consulting the filesystem
///
/// `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Format a module structure entry with the module's name
pub fn format_module_entry(entry: &str, module_name: &str) -> String {
    entry.replace("{module_name}", module_name)
}

/// Path table for a project and, optionally, the engine it builds against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    project_path: PathBuf,
    engine_path: Option<PathBuf>,
    build_root: PathBuf,
    install_root: PathBuf,
    system: String,
}

impl ProjectPaths {
    /// Create a path table; build and install roots default to
    /// `<project>/build` and `<project>/Install`
    pub fn new(project_path: impl Into<PathBuf>, engine_path: Option<PathBuf>) -> Self {
        let project_path = project_path.into();
        Self {
            build_root: project_path.join("build"),
            install_root: project_path.join("Install"),
            project_path,
            engine_path,
            system: host_system_name().to_string(),
        }
    }

    /// Override the build root
    pub fn with_build_root(mut self, build_root: impl Into<PathBuf>) -> Self {
        self.build_root = build_root.into();
        self
    }

    /// Override the install root
    pub fn with_install_root(mut self, install_root: impl Into<PathBuf>) -> Self {
        self.install_root = install_root.into();
        self
    }

    /// Override the system name embedded in build folder names
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn engine_path(&self) -> Option<&Path> {
        self.engine_path.as_deref()
    }

    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Project name, the last component of the project path
    pub fn project_name(&self) -> String {
        self.project_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    // build paths

    pub fn build_folder_name(&self, arch: Architecture, config: BuildConfiguration) -> String {
        format_build_folder_name(&self.system, arch, config)
    }

    pub fn build_folder(&self, arch: Architecture, config: BuildConfiguration) -> PathBuf {
        self.build_root.join(self.build_folder_name(arch, config))
    }

    pub fn build_source_folder(&self, arch: Architecture, config: BuildConfiguration) -> PathBuf {
        self.build_folder(arch, config).join(SOURCE_DIR)
    }

    /// Raw artifact CMake produces for `target` before install
    pub fn build_target_path(
        &self,
        arch: Architecture,
        config: BuildConfiguration,
        target: &str,
    ) -> PathBuf {
        self.build_source_folder(arch, config).join(target).join(target)
    }

    // install paths

    pub fn install_path(&self, arch: Architecture, config: BuildConfiguration) -> PathBuf {
        self.install_root.join(self.build_folder_name(arch, config))
    }

    pub fn bin_folder(&self, arch: Architecture, config: BuildConfiguration) -> PathBuf {
        self.install_path(arch, config).join("bin")
    }

    pub fn lib_folder(&self, arch: Architecture, config: BuildConfiguration) -> PathBuf {
        self.install_path(arch, config).join("lib")
    }

    pub fn target_bin_path(
        &self,
        arch: Architecture,
        config: BuildConfiguration,
        target: &str,
    ) -> PathBuf {
        self.bin_folder(arch, config).join(target)
    }

    // project layout

    pub fn root_cmakelists_path(&self) -> PathBuf {
        self.project_path.join(CMAKELISTS_FILE)
    }

    pub fn source_folder(&self) -> PathBuf {
        self.project_path.join(SOURCE_DIR)
    }

    pub fn module_path(&self, module_name: &str) -> PathBuf {
        self.source_folder().join(module_name)
    }

    pub fn module_cmakelists_path(&self, module_name: &str) -> PathBuf {
        self.module_path(module_name).join(CMAKELISTS_FILE)
    }

    /// Every entry of [`MODULE_STRUCTURE`] resolved for `module_name`
    pub fn module_structure_paths(&self, module_name: &str) -> Vec<PathBuf> {
        let module_path = self.module_path(module_name);
        MODULE_STRUCTURE
            .iter()
            .map(|entry| module_path.join(format_module_entry(entry, module_name)))
            .collect()
    }
}
