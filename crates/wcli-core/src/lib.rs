//! WCli Core - Shared library for the WEng command-line front-end
//!
//! This library holds everything the `wcli` binary does besides argument
//! parsing: it computes build/install/project locations, scaffolds projects
//! and modules from build descriptor templates, drives CMake, and writes
//! VS Code workspace descriptors.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Paths** - [`paths::ProjectPaths`], pure functions computing every location
//! - **Layer 2: Templates** - [`templates::TemplateRenderer`] rendering named build descriptors
//! - **Layer 3: Scaffolding** - [`project::ProjectManager`] keeping a project tree in sync
//! - **Layer 4: Collaborators** - CMake runner, toolchain checks, workspace descriptor
//!
//! # Example Usage
//!
//! ```ignore
//! use wcli_core::{ProjectManager, TemplateRenderer, templates};
//!
//! let renderer = TemplateRenderer::new(templates::default_template_dir());
//! let manager = ProjectManager::new("/work/Game", "/work/WEng", renderer)?;
//! manager.ensure_project(false)?;
//! ```

pub mod config;
pub mod error;
pub mod paths;
pub mod project;
pub mod templates;
pub mod toolchain;
pub mod workspace;

// Re-export main types for convenience
pub use config::Settings;
pub use error::{Error, Result};
pub use paths::{Architecture, BuildConfiguration, ProjectPaths, ENGINE_DIR_NAME};
pub use project::{ModuleKind, ProjectManager, ScaffoldReport};
pub use templates::{TemplateContext, TemplateKey, TemplateRenderer};
pub use toolchain::{BuildPlan, ToolInvocation};
pub use workspace::{Launch, Task, WorkspaceManager};

/// CLI version - used for template compatibility checking
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
