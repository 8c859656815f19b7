//! File system and toolchain collaborators of the compiler.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::CompileError;

/// Reads a whole source file.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, CompileError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|err| CompileError::io(path, err))
}

/// Writes the generated code, replacing any existing file.
pub fn write_output(path: impl AsRef<Path>, text: &str) -> Result<(), CompileError> {
    let path = path.as_ref();
    fs::write(path, text).map_err(|err| CompileError::io(path, err))
}

/// Default output path: `input` with a `.rs` extension.
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("rs")
}

/// Path of the executable `rustc` produces for `path`.
pub fn executable_path(path: &Path) -> PathBuf {
    path.with_extension(std::env::consts::EXE_EXTENSION)
}

/// Formats `path` in place with `rustfmt`.
pub fn format_file(rustfmt: &str, path: &Path) -> Result<(), CompileError> {
    let status = spawn(Command::new(rustfmt).arg("--edition").arg("2021").arg(path), rustfmt)?;
    check(rustfmt, status)
}

/// Compiles `path` with `rustc`, then runs the executable and returns its exit status.
pub fn build_and_run(rustc: &str, path: &Path) -> Result<ExitStatus, CompileError> {
    let executable = executable_path(path);
    let status = spawn(
        Command::new(rustc)
            .arg("--edition")
            .arg("2021")
            .arg("-o")
            .arg(&executable)
            .arg(path),
        rustc,
    )?;
    check(rustc, status)?;

    let program = executable.display().to_string();
    spawn(&mut Command::new(runnable(&executable)), &program)
}

/// `Command` looks bare names up in `PATH`, so a file in the current directory needs a `./`.
fn runnable(path: &Path) -> PathBuf {
    let bare = path
        .parent()
        .map_or(true, |parent| parent.as_os_str().is_empty());
    if path.is_relative() && bare {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    }
}

/// Maps a child exit code to a process exit code. Codes outside `0..=255` and deaths by
/// signal become `1`.
pub fn exit_code(code: Option<i32>) -> u8 {
    code.and_then(|code| u8::try_from(code).ok()).unwrap_or(1)
}

fn spawn(command: &mut Command, program: &str) -> Result<ExitStatus, CompileError> {
    command.status().map_err(|err| CompileError::io(program, err))
}

fn check(program: &str, status: ExitStatus) -> Result<(), CompileError> {
    if status.success() {
        Ok(())
    } else {
        Err(CompileError::Toolchain {
            program: program.to_string(),
            status,
        })
    }
}
