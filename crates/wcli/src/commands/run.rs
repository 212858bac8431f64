//! `Run` - run an installed target

use super::{project_or_current_dir, project_paths, RunArgs};
use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use wcli_core::toolchain::{run_step, ToolInvocation};
use wcli_core::{Architecture, BuildConfiguration, Error, ProjectPaths, Settings};

/// `dir` followed by the entries of an existing search path
fn prepend_path(dir: &Path, existing: Option<OsString>) -> String {
    let mut entries = vec![dir.to_path_buf()];
    if let Some(existing) = existing {
        entries.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(entries)
        .map(|joined| joined.to_string_lossy().into_owned())
        .unwrap_or_else(|_| dir.to_string_lossy().into_owned())
}

/// Installed executable for `target`, accepting the platform's executable suffix
fn installed_executable(
    paths: &ProjectPaths,
    arch: Architecture,
    config: BuildConfiguration,
    target: &str,
) -> Option<PathBuf> {
    let program = paths.target_bin_path(arch, config, target);
    if program.is_file() {
        return Some(program);
    }

    let suffix = std::env::consts::EXE_SUFFIX;
    if suffix.is_empty() {
        return None;
    }
    let with_suffix = paths.target_bin_path(arch, config, &format!("{}{}", target, suffix));
    with_suffix.is_file().then_some(with_suffix)
}

/// Invocation of an installed target with its bin/lib folders on the search paths
fn target_invocation(
    paths: &ProjectPaths,
    arch: Architecture,
    config: BuildConfiguration,
    target: &str,
    target_args: &[String],
) -> wcli_core::Result<ToolInvocation> {
    let program = installed_executable(paths, arch, config, target).ok_or_else(|| {
        Error::TargetNotInstalled {
            target: target.to_string(),
            path: paths.target_bin_path(arch, config, target),
        }
    })?;

    let bin = paths.bin_folder(arch, config);
    let lib = paths.lib_folder(arch, config);

    let invocation = ToolInvocation::new(program.to_string_lossy(), paths.install_path(arch, config))
        .env("PATH", prepend_path(&bin, std::env::var_os("PATH")))
        .env(
            "LD_LIBRARY_PATH",
            prepend_path(&lib, std::env::var_os("LD_LIBRARY_PATH")),
        );

    Ok(target_args
        .iter()
        .fold(invocation, |invocation, arg| invocation.arg(arg.as_str())))
}

pub async fn run(args: RunArgs) -> Result<()> {
    let mut settings = Settings::from_env();
    args.roots.apply(&mut settings);

    let project_path = project_or_current_dir(args.project_path.as_deref())?;
    let paths = project_paths(&project_path, None, &settings)?;

    let invocation = target_invocation(
        &paths,
        args.arch,
        args.build_type,
        &args.target,
        &args.args,
    )?;
    run_step(&invocation).await?;
    Ok(())
}
