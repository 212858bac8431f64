//! `Modules` - create or update modules of a project

use super::project::renderer;
use super::ModulesArgs;
use anyhow::{Context, Result};
use wcli_core::{ModuleKind, ProjectManager};

fn module_kind(args: &ModulesArgs) -> ModuleKind {
    if args.executable {
        ModuleKind::Executable
    } else {
        ModuleKind::Library
    }
}

pub fn run(args: ModulesArgs) -> Result<()> {
    let (project_path, engine_path) = args.paths.resolve()?;
    let manager = ProjectManager::new(
        &project_path,
        &engine_path,
        renderer(args.template_dir.as_deref())?,
    )?;
    let kind = module_kind(&args);

    for module in &args.modules {
        manager
            .ensure_module_with_kind(module, kind, args.force)
            .with_context(|| format!("Failed to update module '{}'", module))?;
        tracing::info!(
            "Module '{}' updated at '{}'",
            module,
            project_path.display()
        );
    }

    Ok(())
}
