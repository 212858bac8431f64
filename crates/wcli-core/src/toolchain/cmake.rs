//! CMake configure/build/install plan and sequential runner

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::paths::{Architecture, BuildConfiguration, ProjectPaths};
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// One external program call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Name reported in failures
    pub fn tool_name(&self) -> String {
        Path::new(&self.program)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.clone())
    }

    /// Command line as typed in a shell
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| {
                if part.contains(' ') {
                    format!("\"{}\"", part)
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Configure, build and install steps for one architecture/configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    pub build_dir: PathBuf,
    pub install_dir: PathBuf,
    pub steps: Vec<ToolInvocation>,
}

impl BuildPlan {
    pub fn new(
        paths: &ProjectPaths,
        arch: Architecture,
        config: BuildConfiguration,
        settings: &Settings,
    ) -> Self {
        let build_dir = paths.build_folder(arch, config);
        let install_dir = paths.install_path(arch, config);
        let cwd = paths.project_path();

        let mut configure = ToolInvocation::new(&settings.cmake, cwd)
            .arg("-G")
            .arg(&settings.generator)
            .arg("-S")
            .arg(".")
            .arg("-B")
            .path_arg(&build_dir)
            .arg(format!("-DCMAKE_BUILD_TYPE={}", config))
            .arg("-DCMAKE_EXPORT_COMPILE_COMMANDS=ON")
            .arg("-DCMAKE_VERBOSE_MAKEFILE:BOOL=ON")
            .arg(format!("-DCMAKE_CXX_COMPILER={}", settings.cxx_compiler));
        if config == BuildConfiguration::Debug {
            configure = configure.arg("-DCMAKE_CXX_FLAGS=-g -O0");
        }

        let build = ToolInvocation::new(&settings.cmake, cwd)
            .arg("--build")
            .path_arg(&build_dir);

        let install = ToolInvocation::new(&settings.cmake, cwd)
            .arg("--install")
            .path_arg(&build_dir)
            .arg("--prefix")
            .path_arg(&install_dir)
            .arg("-v");

        Self {
            build_dir,
            install_dir,
            steps: vec![configure, build, install],
        }
    }

    /// Create the build directory and run every step in order
    pub async fn execute(&self) -> Result<()> {
        std::fs::create_dir_all(&self.build_dir).map_err(|e| Error::fs(&self.build_dir, e))?;
        run_steps(&self.steps).await
    }
}

/// Run one invocation with inherited stdio and no timeout
///
/// A non-zero exit becomes [`Error::ExternalToolFailure`]; a child killed
/// by a signal reports code 1.
pub async fn run_step(invocation: &ToolInvocation) -> Result<()> {
    println!("{} {}", "Running:".dimmed(), invocation.command_line().yellow());

    let status = TokioCommand::new(&invocation.program)
        .args(&invocation.args)
        .current_dir(&invocation.cwd)
        .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound if invocation.cwd.is_dir() => Error::ToolNotFound {
                tool: invocation.program.clone(),
            },
            _ => Error::fs(&invocation.cwd, e),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::ExternalToolFailure {
            tool: invocation.tool_name(),
            code: status.code().unwrap_or(1),
        })
    }
}

/// Run invocations in order, stopping at the first failure
pub async fn run_steps(steps: &[ToolInvocation]) -> Result<()> {
    for step in steps {
        run_step(step).await?;
    }
    Ok(())
}
