use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use degree_assortativity::{
    Analysis, AnalysisConfig, DuplicatePolicy, ObservationWeight, OutputFormat, SourceFormat,
    export::export_degree_csv,
    report::write_report,
};

#[derive(Parser, Debug)]
#[command(
    name = "assortativity",
    version,
    about = "Weighted degree statistics and degree assortativity of a directed edge list"
)]
struct Cli {
    /// Edge list to analyze (.parquet or .csv)
    input: PathBuf,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input format (default: from the file extension)
    #[arg(long)]
    input_format: Option<SourceFormat>,

    /// Source identifier column
    #[arg(long)]
    source_column: Option<String>,

    /// Target identifier column
    #[arg(long)]
    target_column: Option<String>,

    /// Edge weight column
    #[arg(long)]
    weight_column: Option<String>,

    /// Repeated (source, target) pairs: overwrite, accumulate, keep-first, reject
    #[arg(long)]
    duplicates: Option<DuplicatePolicy>,

    /// Observation weighting: edge-weight or uniform
    #[arg(long)]
    weighting: Option<ObservationWeight>,

    /// List the N highest-degree nodes per degree kind
    #[arg(long)]
    top: Option<usize>,

    /// Report format: text or json
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Also write the per-node degree table to this CSV file
    #[arg(long)]
    degrees_out: Option<PathBuf>,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn analysis_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AnalysisConfig::default(),
        };

        if let Some(format) = self.input_format {
            config.format = Some(format);
        }
        if let Some(col) = &self.source_column {
            config.schema.source = col.clone();
        }
        if let Some(col) = &self.target_column {
            config.schema.target = col.clone();
        }
        if let Some(col) = &self.weight_column {
            config.schema.weight = col.clone();
        }
        if let Some(policy) = self.duplicates {
            config.duplicates = policy;
        }
        if let Some(weighting) = self.weighting {
            config.weighting = weighting;
        }
        if let Some(top) = self.top {
            config.top = top;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.analysis_config()?;
    let analysis = Analysis::new(config).context("invalid analysis configuration")?;
    let report = analysis
        .run(&cli.input)
        .with_context(|| format!("analyzing {}", cli.input.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&report, cli.format, &mut out)?;
    out.flush()?;

    if let Some(path) = &cli.degrees_out {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        export_degree_csv(&report.graph, &report.degrees, &mut writer)?;
        tracing::info!(path = %path.display(), nodes = report.graph.node_count(), "wrote degree table");
    }

    Ok(())
}
