//! External toolchain detection and invocation
//!
//! This module provides:
//! - Detection of cmake, the generator backend and the C++ compiler
//! - The configure/build/install plan and its sequential runner

pub mod check;
pub mod cmake;

pub use check::{check_tool, require_tools, required_programs, ToolInfo};
pub use cmake::{run_step, run_steps, BuildPlan, ToolInvocation};
