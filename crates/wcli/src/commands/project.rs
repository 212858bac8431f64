//! `Project` - create or update a project tree

use super::ProjectArgs;
use anyhow::Result;
use wcli_core::{ProjectManager, Settings, TemplateRenderer, CLI_VERSION};

/// Renderer for the configured templates directory, warning on version mismatch
pub fn renderer(template_dir: Option<&std::path::Path>) -> Result<TemplateRenderer> {
    let template_dir = match template_dir {
        Some(dir) => dir.to_path_buf(),
        None => Settings::from_env().template_dir,
    };
    let renderer = TemplateRenderer::new(template_dir);

    if let Some(warning) = renderer.check_version(CLI_VERSION)? {
        tracing::warn!("{}", warning);
    }
    Ok(renderer)
}

pub fn run(args: ProjectArgs) -> Result<()> {
    let (project_path, engine_path) = args.paths.resolve()?;

    if !args.update {
        tracing::info!("Nothing to do, pass --update to create or update the project.");
        return Ok(());
    }

    let manager = ProjectManager::new(
        &project_path,
        &engine_path,
        renderer(args.template_dir.as_deref())?,
    )?;
    let report = manager.ensure_project(args.force)?;

    tracing::debug!(
        "{} entries created, {} descriptors rendered",
        report.created.len(),
        report.rendered.len()
    );
    tracing::info!("Project updated at '{}'", project_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::PathArgs;
    use tempfile::tempdir;
    use wcli_core::templates::default_template_dir;

    fn args(project: std::path::PathBuf, engine: std::path::PathBuf) -> ProjectArgs {
        ProjectArgs {
            paths: PathArgs {
                project_path: Some(project),
                engine_path: Some(engine),
            },
            update: true,
            force: false,
            template_dir: Some(default_template_dir()),
        }
    }

    #[test]
    fn test_project_update_scaffolds() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("Foo");

        run(args(project.clone(), dir.path().join("WEng"))).unwrap();

        assert!(project.join("CMakeLists.txt").is_file());
        assert!(project.join("Source/Foo/Foo.cpp").is_file());
    }

    #[test]
    fn test_invalid_engine_leaves_filesystem_untouched() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("Foo");

        let err = run(args(project.clone(), dir.path().join("NotEngine"))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<wcli_core::Error>(),
            Some(wcli_core::Error::InvalidEngineRoot(_))
        ));
        assert!(!project.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_without_update_does_nothing() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("Foo");
        let mut project_args = args(project.clone(), dir.path().join("WEng"));
        project_args.update = false;

        run(project_args).unwrap();
        assert!(!project.exists());
    }
}
