//! Command arguments and shared path handling

pub mod build;
pub mod modules;
pub mod project;
pub mod run;
pub mod vscenv;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use wcli_core::{paths, Architecture, BuildConfiguration, Settings};

/// Project and engine location flags
#[derive(Parser, Debug, Clone, Default)]
pub struct PathArgs {
    /// Project directory path, project name is the last folder name (defaults to the engine path)
    #[arg(short = 'p', long = "project-path")]
    pub project_path: Option<PathBuf>,

    /// Engine directory path (defaults to the current directory)
    #[arg(long = "engine-path", visible_alias = "ep")]
    pub engine_path: Option<PathBuf>,
}

impl PathArgs {
    /// Absolute (project, engine) paths, with the engine root validated
    pub fn resolve(&self) -> Result<(PathBuf, PathBuf)> {
        let engine_path = match &self.engine_path {
            Some(path) => paths::absolute(path)?,
            None => current_dir()?,
        };
        paths::validate_engine_path(&engine_path)?;

        let project_path = match &self.project_path {
            Some(path) => paths::absolute(path)?,
            None => {
                tracing::info!("Project path not set, using engine path as project path.");
                engine_path.clone()
            }
        };

        Ok((project_path, engine_path))
    }
}

#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Project directory to build (defaults to the current directory)
    #[arg(short = 'p', long = "project-path")]
    pub project_path: Option<PathBuf>,

    /// Build type
    #[arg(short = 't', long = "build-type", value_enum, default_value_t = BuildConfiguration::Debug)]
    pub build_type: BuildConfiguration,

    /// Build architecture
    #[arg(short = 'a', long = "arch", value_enum, default_value_t = Architecture::host_default())]
    pub arch: Architecture,

    #[command(flatten)]
    pub roots: RootArgs,

    /// CMake generator (overrides WCLI_GENERATOR)
    #[arg(long)]
    pub generator: Option<String>,

    /// C++ compiler (overrides WCLI_CXX_COMPILER)
    #[arg(long = "cxx-compiler")]
    pub cxx_compiler: Option<String>,

    /// Skip the toolchain availability check
    #[arg(long = "skip-tool-check")]
    pub skip_tool_check: bool,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Installed target to run
    pub target: String,

    /// Project directory the target was built from (defaults to the current directory)
    #[arg(short = 'p', long = "project-path")]
    pub project_path: Option<PathBuf>,

    /// Build type
    #[arg(short = 't', long = "build-type", value_enum, default_value_t = BuildConfiguration::Debug)]
    pub build_type: BuildConfiguration,

    /// Build architecture
    #[arg(short = 'a', long = "arch", value_enum, default_value_t = Architecture::host_default())]
    pub arch: Architecture,

    #[command(flatten)]
    pub roots: RootArgs,

    /// Arguments passed to the target
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Create or update the project
    #[arg(short = 'u', long)]
    pub update: bool,

    /// Regenerate build descriptors and placeholder files
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Templates directory (overrides WCLI_TEMPLATE_DIR)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ModulesArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Modules are libraries (default)
    #[arg(short = 'l', long, conflicts_with = "executable")]
    pub library: bool,

    /// Modules are executables
    #[arg(short = 'e', long)]
    pub executable: bool,

    /// Regenerate build descriptors and placeholder files
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Templates directory (overrides WCLI_TEMPLATE_DIR)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Module names
    #[arg(required = true, num_args = 1..)]
    pub modules: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct VscEnvArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    #[command(flatten)]
    pub roots: RootArgs,
}

/// Build and install root overrides
#[derive(Parser, Debug, Clone, Default)]
pub struct RootArgs {
    /// Build root (overrides WCLI_BUILD_ROOT, defaults to <project>/build)
    #[arg(long = "build-root")]
    pub build_root: Option<PathBuf>,

    /// Install root (overrides WCLI_INSTALL_ROOT, defaults to <project>/Install)
    #[arg(long = "install-root")]
    pub install_root: Option<PathBuf>,
}

impl RootArgs {
    /// Apply flag overrides on top of environment settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(build_root) = &self.build_root {
            settings.build_root = Some(build_root.clone());
        }
        if let Some(install_root) = &self.install_root {
            settings.install_root = Some(install_root.clone());
        }
    }
}

/// Path table for `project_path` with root overrides from settings
pub fn project_paths(
    project_path: &Path,
    engine_path: Option<PathBuf>,
    settings: &Settings,
) -> Result<wcli_core::ProjectPaths> {
    let mut paths = wcli_core::ProjectPaths::new(project_path, engine_path);
    if let Some(build_root) = &settings.build_root {
        paths = paths.with_build_root(paths::absolute(build_root)?);
    }
    if let Some(install_root) = &settings.install_root {
        paths = paths.with_install_root(paths::absolute(install_root)?);
    }
    Ok(paths)
}

/// Absolute project path, defaulting to the current directory
pub fn project_or_current_dir(project_path: Option<&Path>) -> Result<PathBuf> {
    match project_path {
        Some(path) => Ok(paths::absolute(path)?),
        None => current_dir(),
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to read the current directory")
}
