//! VS Code workspace descriptor
//!
//! Accumulates folders, build tasks and debug launches, then writes them as
//! `<root>/<root name>.code-workspace`.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Extension of workspace descriptor files
pub const WORKSPACE_EXTENSION: &str = "code-workspace";

/// Editor extensions recommended in every workspace
pub const RECOMMENDED_EXTENSIONS: &[&str] =
    &["ms-vscode.cpptools", "ms-vscode.cmake-tools", "twxs.cmake"];

const FILE_ASSOCIATIONS: &[(&str, &str)] = &[
    ("*.ush", "hlsl"),
    ("*.usf", "hlsl"),
    ("string", "cpp"),
    ("iostream", "cpp"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    pub path: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub reveal: String,
    pub panel: String,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            reveal: "always".to_string(),
            panel: "shared".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub label: String,
    pub command: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub args: Vec<String>,
    pub problem_matcher: Vec<String>,
    pub presentation: Presentation,
    pub group: String,
}

impl Task {
    /// Shell build task with the gcc problem matcher
    pub fn new(label: impl Into<String>, command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            label: label.into(),
            command: command.into(),
            task_type: "shell".to_string(),
            args,
            problem_matcher: vec!["$gcc".to_string()],
            presentation: Presentation::default(),
            group: "build".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

impl EnvironmentVariable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Launch {
    pub name: String,
    #[serde(rename = "type")]
    pub launch_type: String,
    pub request: String,
    pub program: String,
    pub args: Vec<String>,
    pub stop_at_entry: bool,
    pub cwd: String,
    pub environment: Vec<EnvironmentVariable>,
    pub external_console: bool,
    #[serde(rename = "MIMode")]
    pub mi_mode: String,
    pub pre_launch_task: String,
}

impl Launch {
    /// cppdbg launch of `program` debugged through lldb
    pub fn new(name: impl Into<String>, program: &Path, cwd: &Path) -> Self {
        Self {
            name: name.into(),
            launch_type: "cppdbg".to_string(),
            request: "launch".to_string(),
            program: path_string(program),
            args: Vec::new(),
            stop_at_entry: false,
            cwd: path_string(cwd),
            environment: Vec::new(),
            external_console: false,
            mi_mode: "lldb".to_string(),
            pre_launch_task: String::new(),
        }
    }

    pub fn with_environment(mut self, environment: Vec<EnvironmentVariable>) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_pre_launch_task(mut self, task: impl Into<String>) -> Self {
        self.pre_launch_task = task.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    #[serde(rename = "files.associations")]
    pub files_associations: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            files_associations: FILE_ASSOCIATIONS
                .iter()
                .map(|(pattern, language)| (pattern.to_string(), language.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extensions {
    pub recommendations: Vec<String>,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            recommendations: RECOMMENDED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Serialized workspace document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkspaceDocument {
    pub folders: Vec<Folder>,
    pub settings: Settings,
    pub tasks: Vec<Task>,
    pub launch: Vec<Launch>,
    pub extensions: Extensions,
}

/// Builder for a workspace descriptor rooted at a directory
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    workspace_path: PathBuf,
    document: WorkspaceDocument,
}

impl WorkspaceManager {
    pub fn new(workspace_root: &Path) -> Self {
        Self {
            workspace_path: workspace_file_path(workspace_root),
            document: WorkspaceDocument::default(),
        }
    }

    /// Where [`save`](Self::save) writes the descriptor
    pub fn workspace_path(&self) -> &Path {
        &self.workspace_path
    }

    pub fn document(&self) -> &WorkspaceDocument {
        &self.document
    }

    /// Prepend a folder; the most recently added folder is listed first
    pub fn add_folder(&mut self, folder_path: &Path) -> &mut Self {
        let name = folder_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_string(folder_path));
        self.document.folders.insert(
            0,
            Folder {
                path: path_string(folder_path),
                name,
            },
        );
        self
    }

    /// Prepend a build task
    pub fn add_task(&mut self, task: Task) -> &mut Self {
        self.document.tasks.insert(0, task);
        self
    }

    /// Prepend a debug launch
    pub fn add_launch(&mut self, launch: Launch) -> &mut Self {
        self.document.launch.insert(0, launch);
        self
    }

    /// Serialize the document with four-space indentation
    pub fn to_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.document
            .serialize(&mut serializer)
            .map_err(|e| Error::serialization(&self.workspace_path, e))?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the descriptor, creating parent directories as needed
    pub fn save(&self) -> Result<PathBuf> {
        let json = self.to_json()?;
        if let Some(parent) = self.workspace_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::fs(parent, e))?;
        }
        std::fs::write(&self.workspace_path, json)
            .map_err(|e| Error::fs(&self.workspace_path, e))?;
        tracing::debug!("Wrote workspace {}", self.workspace_path.display());
        Ok(self.workspace_path.clone())
    }
}

/// `<root>/<root name>.code-workspace`
pub fn workspace_file_path(workspace_root: &Path) -> PathBuf {
    let name = workspace_root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workspace".to_string());
    workspace_root.join(format!("{}.{}", name, WORKSPACE_EXTENSION))
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_workspace_file_path() {
        assert_eq!(
            workspace_file_path(Path::new("/work/WEng")),
            PathBuf::from("/work/WEng/WEng.code-workspace")
        );
        assert_eq!(
            workspace_file_path(Path::new("/work/Game/")),
            PathBuf::from("/work/Game/Game.code-workspace")
        );
    }

    #[test]
    fn test_add_folder_prepends() {
        let mut manager = WorkspaceManager::new(Path::new("/work/Game"));
        manager
            .add_folder(Path::new("/work/WEng"))
            .add_folder(Path::new("/work/Game"));

        let names: Vec<&str> = manager
            .document()
            .folders
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Game", "WEng"]);
        assert_eq!(manager.document().folders[1].path, "/work/WEng");
    }

    #[test]
    fn test_tasks_and_launches_prepend() {
        let mut manager = WorkspaceManager::new(Path::new("/work/Game"));
        manager
            .add_task(Task::new("first", "wcli", vec![]))
            .add_task(Task::new("second", "wcli", vec![]));
        manager
            .add_launch(Launch::new("a", Path::new("/bin/a"), Path::new("/")))
            .add_launch(Launch::new("b", Path::new("/bin/b"), Path::new("/")));

        assert_eq!(manager.document().tasks[0].label, "second");
        assert_eq!(manager.document().launch[0].name, "b");
    }

    #[test]
    fn test_json_keys() {
        let mut manager = WorkspaceManager::new(Path::new("/work/Game"));
        manager.add_task(Task::new(
            "Build X86_64 Debug",
            "wcli",
            vec!["Build".to_string()],
        ));
        manager.add_launch(
            Launch::new("Game", Path::new("/i/bin/Game"), Path::new("/i"))
                .with_environment(vec![EnvironmentVariable::new("PATH", "/i/bin")])
                .with_pre_launch_task("Build X86_64 Debug"),
        );

        let json = manager.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(json.contains("\n    \"folders\""));
        let task = &value["tasks"][0];
        assert_eq!(task["type"], "shell");
        assert_eq!(task["problemMatcher"][0], "$gcc");
        assert_eq!(task["group"], "build");
        assert_eq!(task["presentation"]["reveal"], "always");

        let launch = &value["launch"][0];
        assert_eq!(launch["type"], "cppdbg");
        assert_eq!(launch["request"], "launch");
        assert_eq!(launch["MIMode"], "lldb");
        assert_eq!(launch["stopAtEntry"], false);
        assert_eq!(launch["externalConsole"], false);
        assert_eq!(launch["preLaunchTask"], "Build X86_64 Debug");
        assert_eq!(launch["environment"][0]["name"], "PATH");

        assert_eq!(value["settings"]["files.associations"]["*.ush"], "hlsl");
        assert_eq!(
            value["extensions"]["recommendations"][0],
            "ms-vscode.cpptools"
        );
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested/Game");

        let mut manager = WorkspaceManager::new(&root);
        manager.add_folder(&root);
        let written = manager.save().unwrap();

        assert_eq!(written, root.join("Game.code-workspace"));
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(value["folders"][0]["name"], "Game");
    }
}
