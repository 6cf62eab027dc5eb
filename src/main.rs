use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tabgraph::config::{CliExportConfig, CliGenerateConfig, ExportConfig, GenerateConfig};
use tabgraph::graph_catalog::resolve_node_specs;
use tabgraph::graph_export::{write_rows_atomically, DataSet};
use tabgraph::synthetic::{generate_people, write_people, CorpusFaker};

/// Tabgraph - convert tabular records to bulk graph-import CSVs
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML settings file (otherwise TABGRAPH_* environment variables are used)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert CSV records to node and relationship CSVs
    #[command(alias = "csv2graph")]
    Convert(ConvertArgs),

    /// Generate random person records grouped in households
    #[command(alias = "randp")]
    Generate(GenerateArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Input CSV file with a header row
    csvfile: PathBuf,

    /// Schema file (JSON or YAML) or predefined schema name. Node specs must
    /// keep the default `valname` of `value`; any other valname fails the export
    #[arg(short, long)]
    schema: Option<String>,

    /// Prefix of the generated `.nodes` and `.relationships` files
    #[arg(short, long)]
    output_prefix: Option<String>,

    /// Label of the per-record nodes
    #[arg(long)]
    record_type: Option<String>,

    /// Field delimiter
    #[arg(long)]
    delimiter: Option<char>,
}

#[derive(Args)]
struct GenerateArgs {
    /// Output file, or `-` for stdout
    output: PathBuf,

    /// Number of households to generate
    #[arg(short, long)]
    num: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Field delimiter
    #[arg(long)]
    delimiter: Option<char>,
}

impl From<ConvertArgs> for CliExportConfig {
    fn from(args: ConvertArgs) -> Self {
        CliExportConfig {
            output_prefix: args.output_prefix,
            record_type: args.record_type,
            schema: args.schema,
            delimiter: args.delimiter,
        }
    }
}

impl From<GenerateArgs> for CliGenerateConfig {
    fn from(args: GenerateArgs) -> Self {
        CliGenerateConfig {
            households: args.num,
            seed: args.seed,
            delimiter: args.delimiter,
        }
    }
}

fn convert(settings: Option<PathBuf>, args: ConvertArgs) -> Result<()> {
    let base = match settings {
        Some(path) => ExportConfig::from_yaml_file(path)?,
        None => ExportConfig::from_env()?,
    };
    let csvfile = args.csvfile.clone();
    let config = base.merge_cli(args.into())?;

    let node_specs = resolve_node_specs(&config.schema)?;
    let input = File::open(&csvfile)
        .with_context(|| format!("Failed to open {}", csvfile.display()))?;
    let dataset = DataSet::from_csv(
        BufReader::new(input),
        config.delimiter_byte(),
        &node_specs,
        &config.record_type,
    )?;
    dataset.to_graph_csv(&config.output_prefix, config.delimiter_byte())?;
    Ok(())
}

fn generate(settings: Option<PathBuf>, args: GenerateArgs) -> Result<()> {
    let base = match settings {
        Some(path) => GenerateConfig::from_yaml_file(path)?,
        None => GenerateConfig::from_env()?,
    };
    let output = args.output.clone();
    let config = base.merge_cli(args.into())?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let people = generate_people(rng, CorpusFaker, config.households);

    let written = if output.as_os_str() == "-" {
        write_people(BufWriter::new(io::stdout().lock()), people, config.delimiter_byte())?
    } else {
        write_rows_atomically(&output, people, config.delimiter_byte())?
    };
    info!(
        "Generated {} people in {} households",
        written, config.households
    );
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Convert(args) => convert(cli.config, args),
        Command::Generate(args) => generate(cli.config, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
