//! `Build` - configure, build and install with CMake

use super::{project_or_current_dir, project_paths, BuildArgs};
use anyhow::{Context, Result};
use wcli_core::toolchain::{self, BuildPlan};
use wcli_core::Settings;

/// Settings for a build: environment first, flags on top
fn settings(args: &BuildArgs) -> Settings {
    let mut settings = Settings::from_env();
    args.roots.apply(&mut settings);
    if let Some(generator) = &args.generator {
        settings.generator = generator.clone();
    }
    if let Some(cxx_compiler) = &args.cxx_compiler {
        settings.cxx_compiler = cxx_compiler.clone();
    }
    settings
}

pub async fn run(args: BuildArgs) -> Result<()> {
    let settings = settings(&args);
    let project_path = project_or_current_dir(args.project_path.as_deref())?;
    let paths = project_paths(&project_path, None, &settings)?;

    if !args.skip_tool_check {
        let tools = toolchain::required_programs(&settings);
        for tool in toolchain::require_tools(&tools)? {
            tracing::debug!(
                "Found {} ({})",
                tool.name,
                tool.version.as_deref().unwrap_or("unknown")
            );
        }
    }

    let plan = BuildPlan::new(&paths, args.arch, args.build_type, &settings);
    tracing::info!("Build {}", plan.build_dir.display());

    plan.execute()
        .await
        .with_context(|| format!("Build of {} failed", project_path.display()))?;

    tracing::info!("Installed to {}", plan.install_dir.display());
    Ok(())
}
