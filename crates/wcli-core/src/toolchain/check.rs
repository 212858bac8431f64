//! Toolchain detection for cmake, generators and compilers

use crate::config::Settings;
use crate::error::{Error, Result};
use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub version: Option<String>,
    pub available: bool,
}

/// Probe a tool with `--version`; the first output line is its version
pub fn check_tool(program: &str) -> ToolInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            let version = stdout
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string);
            ToolInfo {
                name: program.to_string(),
                version,
                available: true,
            }
        }
        _ => ToolInfo {
            name: program.to_string(),
            version: None,
            available: false,
        },
    }
}

/// Program backing a CMake generator, when it is a separate executable
pub fn generator_program(generator: &str) -> Option<&'static str> {
    match generator {
        "Ninja" | "Ninja Multi-Config" => Some("ninja"),
        "Unix Makefiles" => Some("make"),
        _ => None,
    }
}

/// Programs a build with these settings needs
pub fn required_programs(settings: &Settings) -> Vec<String> {
    let mut programs = vec![settings.cmake.clone()];
    if let Some(program) = generator_program(&settings.generator) {
        programs.push(program.to_string());
    }
    programs.push(settings.cxx_compiler.clone());
    programs
}

/// Fail with [`Error::ToolNotFound`] naming the first missing program
pub fn require_tools(programs: &[String]) -> Result<Vec<ToolInfo>> {
    let mut found = Vec::with_capacity(programs.len());
    for program in programs {
        let info = check_tool(program);
        if !info.available {
            return Err(Error::ToolNotFound {
                tool: program.clone(),
            });
        }
        found.push(info);
    }
    Ok(found)
}
