//! `VSCEnv` - generate a VS Code workspace for a project/engine pair

use super::{project_paths, VscEnvArgs};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use wcli_core::paths::is_engine_path;
use wcli_core::workspace::EnvironmentVariable;
use wcli_core::{
    Architecture, BuildConfiguration, Launch, ProjectPaths, Settings, Task, WorkspaceManager,
};

/// Binary name the generated tasks invoke
const WCLI: &str = "wcli";

/// Executables the engine workspace gets debug launches for
pub const ENGINE_LAUNCH_TARGETS: &[&str] = &["WSpacers", "WVulkanTest"];

fn build_task_label(arch: Architecture, config: BuildConfiguration) -> String {
    format!("Build {} {}", arch.as_str().to_uppercase(), config)
}

fn build_task(project_path: &Path, arch: Architecture, config: BuildConfiguration) -> Task {
    Task::new(
        build_task_label(arch, config),
        WCLI,
        vec![
            "Build".to_string(),
            "-t".to_string(),
            config.to_string(),
            "-a".to_string(),
            arch.to_string(),
            "-p".to_string(),
            project_path.to_string_lossy().into_owned(),
        ],
    )
}

fn launch(
    paths: &ProjectPaths,
    target: &str,
    arch: Architecture,
    config: BuildConfiguration,
) -> Launch {
    let name = format!("{} {} {}", target, arch.as_str().to_uppercase(), config);
    Launch::new(
        name,
        &paths.target_bin_path(arch, config, target),
        &paths.install_path(arch, config),
    )
    .with_environment(vec![
        EnvironmentVariable::new("PATH", paths.bin_folder(arch, config).to_string_lossy()),
        EnvironmentVariable::new(
            "LD_LIBRARY_PATH",
            paths.lib_folder(arch, config).to_string_lossy(),
        ),
    ])
    .with_pre_launch_task(build_task_label(arch, config))
}

/// Targets that get debug launches: the engine executables for the engine
/// itself, the primary module for any other project
fn launch_targets(paths: &ProjectPaths) -> Vec<String> {
    if is_engine_path(paths.project_path()) {
        ENGINE_LAUNCH_TARGETS.iter().map(|t| t.to_string()).collect()
    } else {
        vec![paths.project_name()]
    }
}

/// Workspace rooted at the project with folders, build tasks and launches
pub fn build_workspace(paths: &ProjectPaths, engine_path: &Path) -> WorkspaceManager {
    let project_path = paths.project_path();
    let arch = Architecture::host_default();

    let mut workspace = WorkspaceManager::new(project_path);

    workspace.add_folder(engine_path);
    if project_path != engine_path {
        workspace.add_folder(project_path);
    }

    for config in BuildConfiguration::ALL {
        workspace.add_task(build_task(project_path, arch, config));
    }

    for target in launch_targets(paths) {
        for config in BuildConfiguration::ALL {
            workspace.add_launch(launch(paths, &target, arch, config));
        }
    }

    workspace
}

pub fn run(args: VscEnvArgs) -> Result<()> {
    let (project_path, engine_path) = args.paths.resolve()?;

    let mut settings = Settings::from_env();
    args.roots.apply(&mut settings);
    let paths = project_paths(&project_path, Some(engine_path.clone()), &settings)?;

    let workspace = build_workspace(&paths, &engine_path);
    let written: PathBuf = workspace.save()?;
    tracing::debug!("Wrote {}", written.display());

    let vscode_path = project_path.join(".vscode");
    std::fs::create_dir_all(&vscode_path)
        .with_context(|| format!("Failed to create {}", vscode_path.display()))?;

    tracing::info!("VSC environment created at '{}'.", project_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{PathArgs, RootArgs};
    use tempfile::tempdir;

    #[test]
    fn test_engine_workspace() {
        let engine = PathBuf::from("/work/WEng");
        let paths = ProjectPaths::new(&engine, Some(engine.clone()));
        let workspace = build_workspace(&paths, &engine);
        let document = workspace.document();

        assert_eq!(document.folders.len(), 1);
        assert_eq!(document.folders[0].name, "WEng");
        assert_eq!(workspace.workspace_path(), Path::new("/work/WEng/WEng.code-workspace"));

        assert_eq!(document.tasks.len(), 2);
        assert_eq!(document.launch.len(), ENGINE_LAUNCH_TARGETS.len() * 2);
        assert!(document
            .launch
            .iter()
            .any(|l| l.name.starts_with("WSpacers ") && l.name.ends_with(" Debug")));
    }

    #[test]
    fn test_project_workspace_launches_primary_module() {
        let engine = PathBuf::from("/work/WEng");
        let project = PathBuf::from("/work/Game");
        let paths = ProjectPaths::new(&project, Some(engine.clone()));
        let workspace = build_workspace(&paths, &engine);
        let document = workspace.document();

        let folder_names: Vec<&str> = document.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(folder_names, vec!["Game", "WEng"]);

        let arch = Architecture::host_default();
        let debug = document
            .launch
            .iter()
            .find(|l| l.name.ends_with(" Debug"))
            .unwrap();
        assert!(debug.name.starts_with("Game "));
        assert_eq!(
            PathBuf::from(&debug.program),
            paths.target_bin_path(arch, BuildConfiguration::Debug, "Game")
        );
        assert_eq!(
            PathBuf::from(&debug.cwd),
            paths.install_path(arch, BuildConfiguration::Debug)
        );
        assert_eq!(
            debug.pre_launch_task,
            build_task_label(arch, BuildConfiguration::Debug)
        );
        assert!(document.tasks.iter().any(|t| t.label == debug.pre_launch_task));
    }

    #[test]
    fn test_build_task_arguments() {
        let task = build_task(
            Path::new("/work/Game"),
            Architecture::X86_64,
            BuildConfiguration::Release,
        );
        assert_eq!(task.label, "Build X86_64 Release");
        assert_eq!(task.command, "wcli");
        assert_eq!(
            task.args,
            vec!["Build", "-t", "Release", "-a", "x86_64", "-p", "/work/Game"]
        );
    }

    #[test]
    fn test_run_writes_workspace_and_vscode_dir() {
        let dir = tempdir().unwrap();
        let engine = dir.path().join("WEng");

        run(VscEnvArgs {
            paths: PathArgs {
                project_path: None,
                engine_path: Some(engine.clone()),
            },
            roots: RootArgs::default(),
        })
        .unwrap();

        assert!(engine.join("WEng.code-workspace").is_file());
        assert!(engine.join(".vscode").is_dir());
    }
}
