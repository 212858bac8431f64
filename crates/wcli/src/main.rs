//! wcli - Build, scaffold and editor-workspace front-end for WEng projects

mod commands;

use clap::{Parser, Subcommand};
use commands::{BuildArgs, ModulesArgs, ProjectArgs, RunArgs, VscEnvArgs};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "wcli")]
#[command(about = "Build, scaffold and editor-workspace front-end for WEng projects")]
#[command(version)]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Log level: error, warn, info, debug, trace (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure, build and install with CMake
    #[command(name = "Build")]
    Build(BuildArgs),
    /// Run an installed target
    #[command(name = "Run")]
    Run(RunArgs),
    /// Create or update a project
    #[command(name = "Project")]
    Project(ProjectArgs),
    /// Create or update modules of a project
    #[command(name = "Modules")]
    Modules(ModulesArgs),
    /// Generate a VS Code workspace
    #[command(name = "VSCEnv")]
    VscEnv(VscEnvArgs),
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Exit code for a failed command: the external tool's code when it failed, else 1
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<wcli_core::Error>()
        .map(wcli_core::Error::exit_code)
        .unwrap_or(1)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let result = match args.command {
        Command::Build(build_args) => commands::build::run(build_args).await,
        Command::Run(run_args) => commands::run::run(run_args).await,
        Command::Project(project_args) => commands::project::run(project_args),
        Command::Modules(modules_args) => commands::modules::run(modules_args),
        Command::VscEnv(vscenv_args) => commands::vscenv::run(vscenv_args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            let code = exit_code(&err).clamp(1, 255);
            ExitCode::from(code as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use wcli_core::{Architecture, BuildConfiguration};

    #[test]
    fn test_parse_build_defaults() {
        let args = Args::try_parse_from(["wcli", "Build"]).unwrap();
        match args.command {
            Command::Build(build) => {
                assert_eq!(build.build_type, BuildConfiguration::Debug);
                assert_eq!(build.arch, Architecture::host_default());
                assert!(build.project_path.is_none());
            }
            other => panic!("expected Build, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_build_release() {
        let arch = Architecture::host_default().as_str();
        let args = Args::try_parse_from(["wcli", "Build", "-t", "Release", "-a", arch]).unwrap();
        match args.command {
            Command::Build(build) => assert_eq!(build.build_type, BuildConfiguration::Release),
            other => panic!("expected Build, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_build_type() {
        assert!(Args::try_parse_from(["wcli", "Build", "-t", "Profile"]).is_err());
    }

    #[cfg(not(windows))]
    #[test]
    fn test_parse_rejects_windows_arch_elsewhere() {
        assert!(Args::try_parse_from(["wcli", "Build", "-a", "x64"]).is_err());
    }

    #[test]
    fn test_parse_project_update() {
        let args = Args::try_parse_from([
            "wcli",
            "Project",
            "-p",
            "/tmp/Foo",
            "--engine-path",
            "/tmp/WEng",
            "-u",
        ])
        .unwrap();
        match args.command {
            Command::Project(project) => {
                assert!(project.update);
                assert!(!project.force);
                assert_eq!(project.paths.project_path, Some(PathBuf::from("/tmp/Foo")));
                assert_eq!(project.paths.engine_path, Some(PathBuf::from("/tmp/WEng")));
            }
            other => panic!("expected Project, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_modules_requires_names() {
        assert!(Args::try_parse_from(["wcli", "Modules"]).is_err());

        let args = Args::try_parse_from(["wcli", "Modules", "WAudio", "WPhysics", "-e"]).unwrap();
        match args.command {
            Command::Modules(modules) => {
                assert_eq!(modules.modules, vec!["WAudio", "WPhysics"]);
                assert!(modules.executable);
            }
            other => panic!("expected Modules, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_modules_kind_flags_conflict() {
        assert!(Args::try_parse_from(["wcli", "Modules", "WAudio", "-l", "-e"]).is_err());
    }

    #[test]
    fn test_parse_run_trailing_args() {
        let args =
            Args::try_parse_from(["wcli", "Run", "WSandBox", "--", "--level", "Demo"]).unwrap();
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.target, "WSandBox");
                assert_eq!(run.args, vec!["--level", "Demo"]);
            }
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_vscenv_name() {
        let args = Args::try_parse_from(["wcli", "VSCEnv"]).unwrap();
        assert!(matches!(args.command, Command::VscEnv(_)));
    }

    #[test]
    fn test_exit_code_mapping() {
        let tool_failure = anyhow::Error::new(wcli_core::Error::ExternalToolFailure {
            tool: "cmake".to_string(),
            code: 2,
        });
        assert_eq!(exit_code(&tool_failure), 2);
        assert_eq!(exit_code(&tool_failure.context("Build failed")), 2);
        assert_eq!(exit_code(&anyhow::anyhow!("other")), 1);
    }
}
