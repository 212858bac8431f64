//! Settings overridable through the environment

use crate::templates::default_template_dir;
use std::path::PathBuf;

pub const TEMPLATE_DIR_ENV: &str = "WCLI_TEMPLATE_DIR";
pub const CMAKE_ENV: &str = "WCLI_CMAKE";
pub const GENERATOR_ENV: &str = "WCLI_GENERATOR";
pub const CXX_COMPILER_ENV: &str = "WCLI_CXX_COMPILER";
pub const BUILD_ROOT_ENV: &str = "WCLI_BUILD_ROOT";
pub const INSTALL_ROOT_ENV: &str = "WCLI_INSTALL_ROOT";

pub const DEFAULT_CMAKE: &str = "cmake";
pub const DEFAULT_GENERATOR: &str = "Ninja";
pub const DEFAULT_CXX_COMPILER: &str = "clang++";

/// Resolved tool settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub template_dir: PathBuf,
    pub cmake: String,
    pub generator: String,
    pub cxx_compiler: String,
    /// `None` keeps the project-relative default
    pub build_root: Option<PathBuf>,
    /// `None` keeps the project-relative default
    pub install_root: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            cmake: DEFAULT_CMAKE.to_string(),
            generator: DEFAULT_GENERATOR.to_string(),
            cxx_compiler: DEFAULT_CXX_COMPILER.to_string(),
            build_root: None,
            install_root: None,
        }
    }
}

impl Settings {
    /// Settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from an arbitrary variable lookup; empty values are ignored
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            template_dir: get(TEMPLATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.template_dir),
            cmake: get(CMAKE_ENV).unwrap_or(defaults.cmake),
            generator: get(GENERATOR_ENV).unwrap_or(defaults.generator),
            cxx_compiler: get(CXX_COMPILER_ENV).unwrap_or(defaults.cxx_compiler),
            build_root: get(BUILD_ROOT_ENV).map(PathBuf::from),
            install_root: get(INSTALL_ROOT_ENV).map(PathBuf::from),
        }
    }
}
