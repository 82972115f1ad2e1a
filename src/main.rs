//! `gmsh-mtc` command line converter.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use gmsh_mtc::io::stl::is_stl;
use gmsh_mtc::prelude::*;

/// Convert a Gmsh (.msh, format 2 or 4) or STL mesh into an MTC .t mesh
#[derive(Parser, Debug)]
#[command(name = "gmsh-mtc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// Input mesh (.msh or .stl)
    input: PathBuf,

    /// Output .t file
    output: PathBuf,

    /// Handling of facets shared by more than two elements
    #[arg(long, value_enum, default_value_t = NonManifoldArg::Error)]
    non_manifold: NonManifoldArg,

    /// gmsh executable used to remesh STL inputs
    #[arg(long, default_value = "gmsh")]
    gmsh: PathBuf,

    /// Write a JSON conversion report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides RUST_LOG
    #[arg(short, long)]
    log_level: Option<String>,

    /// Wait for Enter before exiting on failure
    #[arg(long)]
    pause_on_error: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NonManifoldArg {
    Error,
    Warn,
}

impl From<NonManifoldArg> for NonManifoldHandling {
    fn from(arg: NonManifoldArg) -> Self {
        match arg {
            NonManifoldArg::Error => NonManifoldHandling::Error,
            NonManifoldArg::Warn => NonManifoldHandling::Warn,
        }
    }
}

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.format_target(false).init();
}

fn read_input(cli: &Cli) -> anyhow::Result<RawMesh> {
    let msh = if is_stl(&cli.input) {
        StlRemesher::new(&cli.gmsh)
            .remesh(&cli.input)
            .with_context(|| format!("remeshing {}", cli.input.display()))?
    } else {
        cli.input.clone()
    };
    log::info!("reading {}", msh.display());
    GmshReader
        .read_file(&msh)
        .with_context(|| format!("reading {}", msh.display()))
}

fn write_report(path: &Path, report: &ConversionReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("writing report {}", path.display()))
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let raw = read_input(cli)?;
    let options = ConvertOptions {
        non_manifold: cli.non_manifold.into(),
    };
    let Conversion { mesh, report } = convert(raw, &options).context("conversion failed")?;

    log::info!("writing {}", cli.output.display());
    MtcWriter
        .write_file(&cli.output, &mesh)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    log::info!(
        "done: {} nodes ({} dropped), {} elements",
        report.output_nodes,
        report.dropped_nodes,
        mesh.element_count()
    );

    if let Some(path) = &cli.report {
        write_report(path, &report)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            if cli.pause_on_error {
                eprintln!("Press enter to close...");
                let mut line = String::new();
                let _ = std::io::stdin().lock().read_line(&mut line);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "gmsh-mtc",
            "in.msh",
            "out.t",
            "--non-manifold",
            "warn",
            "--pause-on-error",
        ])
        .unwrap();
        assert!(matches!(cli.non_manifold, NonManifoldArg::Warn));
        assert!(cli.pause_on_error);
        assert_eq!(cli.gmsh, PathBuf::from("gmsh"));
    }

    #[test]
    fn failed_run_reports_an_error_value() {
        let cli = Cli::try_parse_from(["gmsh-mtc", "/nonexistent/in.msh", "out.t"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/in.msh"));
    }
}
