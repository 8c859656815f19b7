use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use adam_codegen::RenderError;
use adam_source::SyntaxError;
use thiserror::Error;

/// Anything that can stop the pipeline from source file to compiled program.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("cannot render {}: {0}", .0.node_kind())]
    Render(#[from] RenderError),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` failed with {status}")]
    Toolchain { program: String, status: ExitStatus },
}

impl CompileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CompileError::Io {
            path: path.into(),
            source,
        }
    }
}
