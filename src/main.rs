use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use qdev::adb::AdbBridge;
use qdev::cancel;
use qdev::context::{AppState, BuildContext, BuildMode};
use qdev::pipeline::{self, ProcessRunner, RunOptions};
use qdev::{Error, Result};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "qdev")]
#[command(version = VERSION)]
#[command(about = "Build, package, deploy, and run a Quest mod")]
struct Cli {
    /// Remove the build output directory before building
    #[arg(long)]
    clean: bool,

    /// Build mode: debug or release
    #[arg(long, short = 't', default_value = "debug")]
    build_type: String,

    /// Stop after packaging; skip deploy, launch, and log tail
    #[arg(long)]
    build_only: bool,

    /// Project root directory (defaults to the current directory)
    #[arg(long)]
    project_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[qdev] [error] {}", err);
            if let Error::Tool { output, .. } = &err {
                if !output.is_empty() {
                    eprintln!("{}", output);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let build_mode = BuildMode::parse(&cli.build_type)?;
    let project_root = resolve_project_dir(cli.project_dir.as_deref())?;
    let context = BuildContext::new(project_root, build_mode);

    let state = AppState::new();
    cancel::install(state.clone())?;

    let options = RunOptions {
        clean: cli.clean,
        build_only: cli.build_only,
    };

    pipeline::run(&context, &options, &ProcessRunner, &AdbBridge, &state)
}

fn resolve_project_dir(flag: Option<&str>) -> Result<PathBuf> {
    match flag {
        Some(raw) => {
            let expanded = shellexpand::tilde(raw).to_string();
            let path = PathBuf::from(&expanded);
            if !path.is_dir() {
                return Err(Error::Config(format!(
                    "Project directory not found: {}",
                    expanded
                )));
            }
            Ok(path)
        }
        None => std::env::current_dir().map_err(Error::from),
    }
}
