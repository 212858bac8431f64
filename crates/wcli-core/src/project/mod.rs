//! Project and module scaffolding
//!
//! [`ProjectManager`] keeps a project tree in sync with the canonical layout:
//! top-level folders, a root build descriptor, and per-module descriptors,
//! sources and auxiliary directories. Every operation is idempotent when
//! `force` is false and never touches existing files in that mode.

pub mod modules;

use crate::error::{Error, Result};
use crate::paths::{self, ProjectPaths, PROJECT_FOLDER_STRUCTURE};
use crate::templates::{TemplateContext, TemplateKey, TemplateRenderer};
use std::path::{Path, PathBuf};

pub use modules::{discover_modules, validate_module_name, ModuleKind};

/// What a scaffolding call changed on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Directories and placeholder files created or reset
    pub created: Vec<PathBuf>,
    /// Build descriptors rendered from templates
    pub rendered: Vec<PathBuf>,
}

impl ScaffoldReport {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.rendered.is_empty()
    }

    fn merge(&mut self, other: ScaffoldReport) {
        self.created.extend(other.created);
        self.rendered.extend(other.rendered);
    }
}

/// Scaffolding engine for one project built against one engine root
#[derive(Debug, Clone)]
pub struct ProjectManager {
    paths: ProjectPaths,
    renderer: TemplateRenderer,
    project: String,
}

impl ProjectManager {
    /// Create a manager, rejecting engine paths that are not engine roots
    ///
    /// No filesystem access happens here.
    pub fn new(
        project_path: impl Into<PathBuf>,
        engine_path: impl Into<PathBuf>,
        renderer: TemplateRenderer,
    ) -> Result<Self> {
        let engine_path = engine_path.into();
        paths::validate_engine_path(&engine_path)?;

        let paths = ProjectPaths::new(project_path, Some(engine_path));
        let project = paths.project_name();
        validate_module_name(&project)?;

        Ok(Self {
            paths,
            renderer,
            project,
        })
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Project name, which is also the name of its primary module
    pub fn project_name(&self) -> &str {
        &self.project
    }

    fn engine_path(&self) -> &Path {
        // validated in `new`
        self.paths.engine_path().unwrap_or(self.paths.project_path())
    }

    fn project_context(&self) -> TemplateContext {
        let mut context = TemplateContext::new();
        context
            .insert("project_name", self.project.as_str())
            .insert_path("project_path", self.paths.project_path())
            .insert_path("engine_path", self.engine_path());
        context
    }

    fn module_context(&self, module_name: &str, kind: ModuleKind) -> TemplateContext {
        let mut context = self.project_context();
        context
            .insert("module_name", module_name)
            .insert("module_kind", kind.as_str());
        context
    }

    /// Create the project tree, its root build descriptor and its primary module
    pub fn ensure_project(&self, force: bool) -> Result<ScaffoldReport> {
        let mut report = ScaffoldReport::default();

        ensure_dir(self.paths.project_path(), &mut report)?;
        for folder in PROJECT_FOLDER_STRUCTURE {
            ensure_dir(&self.paths.project_path().join(folder), &mut report)?;
        }

        self.ensure_descriptor(
            TemplateKey::Project,
            &self.project_context(),
            &self.paths.root_cmakelists_path(),
            force,
            &mut report,
        )?;

        let module = self.ensure_module_with_kind(&self.project, ModuleKind::Executable, force)?;
        report.merge(module);

        Ok(report)
    }

    /// Ensure a library module exists
    pub fn ensure_module(&self, module_name: &str, force: bool) -> Result<ScaffoldReport> {
        self.ensure_module_with_kind(module_name, ModuleKind::default(), force)
    }

    /// Ensure a module's directory, build descriptor and content set exist
    pub fn ensure_module_with_kind(
        &self,
        module_name: &str,
        kind: ModuleKind,
        force: bool,
    ) -> Result<ScaffoldReport> {
        validate_module_name(module_name)?;
        let mut report = ScaffoldReport::default();

        ensure_dir(&self.paths.module_path(module_name), &mut report)?;

        self.ensure_descriptor(
            kind.template_key(),
            &self.module_context(module_name, kind),
            &self.paths.module_cmakelists_path(module_name),
            force,
            &mut report,
        )?;

        for entry in self.paths.module_structure_paths(module_name) {
            if entry.extension().is_some() {
                ensure_placeholder_file(&entry, force, &mut report)?;
            } else {
                ensure_dir(&entry, &mut report)?;
            }
        }

        Ok(report)
    }

    fn ensure_descriptor(
        &self,
        key: TemplateKey,
        context: &TemplateContext,
        path: &Path,
        force: bool,
        report: &mut ScaffoldReport,
    ) -> Result<()> {
        if path.exists() && !force {
            tracing::debug!("Keeping existing {}", path.display());
            return Ok(());
        }

        self.renderer.render(key, context, path)?;
        report.rendered.push(path.to_path_buf());
        Ok(())
    }

    /// Modules of this project
    pub fn project_modules_paths(&self) -> Result<Vec<PathBuf>> {
        discover_modules(self.paths.project_path())
    }

    /// Modules of the engine this project builds against
    pub fn engine_modules_paths(&self) -> Result<Vec<PathBuf>> {
        discover_modules(self.engine_path())
    }
}

fn ensure_dir(path: &Path, report: &mut ScaffoldReport) -> Result<()> {
    if path.is_dir() {
        tracing::debug!("Keeping existing directory {}", path.display());
        return Ok(());
    }

    std::fs::create_dir_all(path).map_err(|e| Error::fs(path, e))?;
    tracing::debug!("Created directory {}", path.display());
    report.created.push(path.to_path_buf());
    Ok(())
}

fn ensure_placeholder_file(path: &Path, force: bool, report: &mut ScaffoldReport) -> Result<()> {
    if path.exists() && !force {
        tracing::debug!("Keeping existing {}", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::fs(parent, e))?;
    }
    std::fs::write(path, "").map_err(|e| Error::fs(path, e))?;
    tracing::debug!("Created file {}", path.display());
    report.created.push(path.to_path_buf());
    Ok(())
}
