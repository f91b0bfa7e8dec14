use clap::Parser;
use derive_more::{Display, Error, From};
use human_panic::setup_panic;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// A submodule that provides the value types shared by the whole program
mod types;

/// A submodule that handles reading the unit tables.
/// The SYLK tables and the function text file are parsed into [Record](parser::Record) tables keyed by unit id.
mod parser;
use parser::{LoaderError, UnitDataLoader};

/// A submodule that provides the objects which are serialized into the output.
mod structures;
use structures::{UnitNode, UnitSummary};

/// A submodule that joins the tables and builds the builder forest.
mod tree;
use tree::{find_builders, TreeError, UnitState};

/// A submodule that handles writing JSON files.
mod output;
use output::{write_json, OutputError};

/// The submodule responsible for parsing the command line.
mod args;
use args::Args;

/// The exit code for input files that can't be read or parsed
const EXIT_LOAD_FAILURE: u8 = 10;
/// The exit code for a builds/upgrade graph with a cycle in it
const EXIT_TREE_FAILURE: u8 = 11;
/// The exit code for output that can't be serialized or written
const EXIT_OUTPUT_FAILURE: u8 = 12;

/// The filter used when `RUST_LOG` isn't set
const DEFAULT_LOG_FILTER: &str = "unit_tree_extractor=info";

const BAR_TEMPLATE: &str = "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Any error that ends the conversion early
#[derive(Debug, From, Display, Error)]
enum ExtractError {
    Load(LoaderError),
    Tree(TreeError),
    Output(OutputError),
}

impl ExtractError {
    fn exit_code(&self) -> u8 {
        match self {
            ExtractError::Load(_) => EXIT_LOAD_FAILURE,
            ExtractError::Tree(_) => EXIT_TREE_FAILURE,
            ExtractError::Output(_) => EXIT_OUTPUT_FAILURE,
        }
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}

/// Run the whole conversion.
///
/// # Process
///
/// 1. Reads the six input files through a [UnitDataLoader]
/// 2. Joins the SLK tables into a [UnitState]
/// 3. If asked to, dumps the joined units
/// 4. Finds the builders and resolves their build and upgrade trees
/// 5. Writes the forest, or its [UnitSummary] version, to the output path
fn run(args: &Args, progress: &ProgressBar) -> Result<(), ExtractError> {
    let tables = UnitDataLoader::new(&args.input).load(progress)?;
    let state = UnitState::new(tables);
    info!("Joined {} units", state.units().len());
    if let Some(dump) = &args.dump {
        write_json(dump, state.units())?;
        info!("Dumped the unit table to {}", dump.display());
    }
    let builders = find_builders(&state)?;
    info!(
        "Found {} builders, {} nodes in total",
        builders.len(),
        builders.iter().map(UnitNode::node_count).sum::<usize>()
    );
    if args.summary {
        let summaries: Vec<UnitSummary> = builders.iter().map(UnitSummary::from).collect();
        write_json(&args.output, &summaries)?;
    } else {
        write_json(&args.output, &builders)?;
    }
    info!("Wrote {}", args.output.display());
    Ok(())
}

/// Main function. This is the entry point of the program.
///
/// # Arguments
///
/// 1. `input` - The folder holding `UnitAbilities.slk`, `UnitData.slk`, `UnitUI.slk`, `UnitWeapons.slk`, `UnitBalance.slk` and `CampaignUnitFunc.txt`.
/// 2. `output` - The JSON file to write the builder forest to.
/// 3. `--summary` - A flag that tells the program to write the condensed trees.
/// 4. `--dump` - A flag that tells the program to dump the joined unit table to a json file.
///
/// Any other argument shape is rejected with a usage message and exit code 2.
fn main() -> ExitCode {
    setup_panic!();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    let args = Args::parse();
    let progress = progress_bar();
    match run(&args, &progress) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            progress.abandon();
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
