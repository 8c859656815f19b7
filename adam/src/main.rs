use std::path::{Path, PathBuf};
use std::process::ExitCode;

use adam::driver::{
    build_and_run, default_output, exit_code, format_file, read_source, write_output,
};
use adam::{generate, parse, CompileError, CompileOptions};
use clap::Parser;
use console::style;

#[derive(Parser)]
#[command(name = "adam")]
#[command(about = "Compile adam source files to Rust", version)]
struct Cli {
    /// Input file path
    input: PathBuf,

    /// Output file path (defaults to the input with a `.rs` extension)
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print the generated code instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Do not emit the `Object` runtime type
    #[arg(long)]
    no_prelude: bool,

    /// Dump the parsed AST to stderr
    #[arg(long)]
    ast_debug: bool,

    /// Run rustfmt on the output file
    #[arg(long, conflicts_with = "stdout")]
    fmt: bool,

    /// Compile the output file with rustc and run it
    #[arg(long, conflicts_with = "stdout")]
    run: bool,

    #[arg(long, value_name = "PATH", default_value = "rustc")]
    rustc: String,

    #[arg(long, value_name = "PATH", default_value = "rustfmt")]
    rustfmt: String,

    /// Print each pipeline stage
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn log(&self, message: impl AsRef<str>) {
        if self.verbose {
            eprintln!("{} {}", style("::").cyan(), message.as_ref());
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {}", style("error:").red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, CompileError> {
    let source = read_source(&cli.input)?;
    cli.log(format!("read {}", cli.input.display()));

    let program = parse(&source)?;
    cli.log(format!("parsed {} functions", program.len()));
    if cli.ast_debug {
        eprintln!("{:#?}", program);
    }

    let options = CompileOptions {
        include_prelude: !cli.no_prelude,
    };
    let code = generate(&program, &options)?;
    cli.log("rendered");

    if cli.stdout {
        print!("{}", code);
        return Ok(ExitCode::SUCCESS);
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));
    if same_file(&cli.input, &output) {
        return Err(CompileError::Io {
            path: output,
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "refusing to overwrite the input file",
            ),
        });
    }
    write_output(&output, &code)?;
    cli.log(format!("wrote {}", output.display()));

    if cli.fmt {
        cli.log(format!("running {}", cli.rustfmt));
        format_file(&cli.rustfmt, &output)?;
    }

    eprintln!(
        "{} {} -> {}",
        style("Compiled").green().bold(),
        cli.input.display(),
        output.display()
    );

    if cli.run {
        cli.log(format!("running {}", cli.rustc));
        let status = build_and_run(&cli.rustc, &output)?;
        return Ok(ExitCode::from(exit_code(status.code())));
    }
    Ok(ExitCode::SUCCESS)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
