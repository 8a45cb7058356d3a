use anyhow::{bail, Context};
use brdmill::menu::{self, NO_LAYERS_MESSAGE};
use brdmill::{
    init_logging, job_parameters, open_board, parse_board, report, sink, Board, Config,
    MillJobGenerator, BUILD_DATE, VERSION,
};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

#[derive(Parser)]
#[command(name = "brdmill")]
#[command(about = "Convert XML circuit board layouts into RML mill jobs", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing exactly one board file
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    dir: PathBuf,

    /// Configuration file (.toml or .json)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a layer into a mill job, choosing interactively unless --layer is given
    Mill {
        /// Layer number to mill
        #[arg(short, long)]
        layer: Option<i32>,

        /// Output file, relative to the current directory
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the job to stdout without writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Print a report of every entity on the board
    Info,

    /// List the layers that carry routes
    Layers,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging() {
        eprintln!("Failed to initialize logging: {err}");
    }
    debug!("brdmill {} built {}", VERSION, BUILD_DATE);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let board = load_board(&cli.dir, &config)?;

    match cli.command {
        Commands::Mill {
            layer,
            output,
            stdout,
        } => {
            let generator = MillJobGenerator::new(job_parameters(&config))?;
            let output = output.unwrap_or_else(|| cli.dir.join(&config.job.output_file));
            match layer {
                Some(layer) => mill_layer(&board, &generator, layer, &output, stdout),
                None => {
                    let stdin = io::stdin();
                    let mut input = stdin.lock();
                    let mut out = io::stdout().lock();
                    menu::run_session(&board, &generator, &output, &mut input, &mut out)?;
                    Ok(())
                }
            }
        }
        Commands::Info => {
            print!("{}", report::board_report(&board)?);
            Ok(())
        }
        Commands::Layers => {
            if board.non_empty_layers().is_empty() {
                println!("{NO_LAYERS_MESSAGE}");
            } else {
                print!("{}", report::layer_summary(&board)?);
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            Err(err) => {
                debug!("{err}; using default config");
                Ok(Config::default())
            }
        },
    }
}

fn load_board(dir: &Path, config: &Config) -> anyhow::Result<Board> {
    let (path, file) = open_board(dir, config.board_extension())?;
    parse_board(file).with_context(|| format!("Failed to parse {}", path.display()))
}

fn mill_layer(
    board: &Board,
    generator: &MillJobGenerator,
    layer: i32,
    output: &Path,
    stdout: bool,
) -> anyhow::Result<()> {
    if !board.non_empty_layers().contains(&layer) {
        bail!(
            "Layer {layer} has nothing to mill; available layers: {:?}",
            board.non_empty_layers()
        );
    }

    let job = generator
        .generate_job(layer, board)
        .with_context(|| format!("Failed to compile layer {layer}"))?;

    let mut out = io::stdout().lock();
    writeln!(out, "{job}")?;
    if !stdout {
        sink::write_job(output, &job)
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }
    Ok(())
}
