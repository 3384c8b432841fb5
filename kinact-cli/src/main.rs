//! # kinact CLI - Kinase/Phosphatase-Substrate Matrices
//!
//! A command-line interface for building signed adjacency matrices from
//! curated PTM databases and NetworKIN predictions.
//!
//! ## Usage
//!
//! ```bash
//! # Curated matrix from PhosphoSitePlus records
//! kinact curated -i ptm_interactions.tsv -t identifiers.csv -o curated.tsv
//!
//! # Curated matrix from several databases
//! kinact curated -i ptm_interactions.tsv -t identifiers.csv -s PhosphoSite,Signor,DEPOD
//!
//! # NetworKIN predictions merged with curated evidence
//! kinact networkin -i networkin_results.tsv -c ptm_interactions.tsv -t identifiers.csv
//!
//! # Input files for a NetworKIN run
//! kinact prepare -s sites.txt --fasta uniprot_sprot.fasta -d networkin_files
//!
//! # Fold changes from a time-course dataset
//! kinact fold-change -i dataset.csv -o fold_changes.tsv --p-values p_values.tsv
//! ```
//!
//! ## Global Options
//!
//! - `-q, --quiet`: Only report errors
//! - `-j, --threads <N>`: Worker threads (default: one per core)
//!
//! Log verbosity otherwise follows `RUST_LOG` (default: `info`).
//!
//! ## Matrix Options
//!
//! - `-o, --output <FILE>`: Output file (default: stdout)
//! - `-f, --format <FORMAT>`: Output format: tsv, long (default: tsv)
//! - `-t, --table <FILE>`: Identifier table used to label enzymes by gene symbol

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use kinact_core::config::{KinactConfig, MatrixFormat};
use kinact_core::curated::SourceSelection;
use kinact_core::dataset::read_phospho_dataset;
use kinact_core::io::read_site_list;
use kinact_core::networkin::{SequenceLibrary, prepare_networkin_files};
use kinact_core::output::{write_matrix, write_time_course};
use kinact_core::prediction::DuplicatePolicy;
use kinact_core::translator::IdentifierTable;
use kinact_core::{KinactAnalyzer, KinactError};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::{EnvFilter, fmt};

fn output_args() -> [Arg; 3] {
    [
        Arg::new("output")
            .short('o')
            .long("output")
            .value_name("FILE")
            .help("Output file (default: stdout)"),
        Arg::new("format")
            .short('f')
            .long("format")
            .value_name("FORMAT")
            .help("Output format: tsv, long")
            .value_parser(["tsv", "long"])
            .default_value("tsv"),
        Arg::new("table")
            .short('t')
            .long("table")
            .value_name("FILE")
            .help("Identifier table (accession, gene symbol, node id)"),
    ]
}

fn build_cli() -> Command {
    Command::new("kinact")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Kinase/phosphatase-substrate adjacency matrices")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only report errors"),
        )
        .arg(
            Arg::new("threads")
                .short('j')
                .long("threads")
                .value_name("N")
                .global(true)
                .value_parser(value_parser!(usize))
                .help("Number of worker threads"),
        )
        .subcommand(
            Command::new("curated")
                .about("Build a matrix from curated PTM records")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .required(true)
                        .help("Curated PTM export (tab-separated)"),
                )
                .arg(
                    Arg::new("sources")
                        .short('s')
                        .long("sources")
                        .value_name("LIST")
                        .default_value("PhosphoSite")
                        .help("Comma-separated source databases, or 'all'"),
                )
                .args(output_args()),
        )
        .subcommand(
            Command::new("networkin")
                .about("Build a matrix from NetworKIN predictions")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .required(true)
                        .help("NetworKIN result file"),
                )
                .arg(
                    Arg::new("curated")
                        .short('c')
                        .long("curated")
                        .value_name("FILE")
                        .help("Curated PTM export merged into the predictions"),
                )
                .arg(
                    Arg::new("cutoff")
                        .long("cutoff")
                        .value_name("SCORE")
                        .value_parser(value_parser!(f64))
                        .default_value("0.5")
                        .help("Discard scores at or below this value"),
                )
                .arg(
                    Arg::new("normalize")
                        .long("normalize")
                        .action(ArgAction::SetTrue)
                        .help("Scale scores by each site's best score instead of binarizing"),
                )
                .arg(
                    Arg::new("duplicates")
                        .long("duplicates")
                        .value_name("POLICY")
                        .value_parser(["last", "max"])
                        .default_value("last")
                        .help("Repeated predictions: keep the last or the highest score"),
                )
                .arg(
                    Arg::new("no-curated")
                        .long("no-curated")
                        .action(ArgAction::SetTrue)
                        .help("Skip merging curated evidence"),
                )
                .args(output_args()),
        )
        .subcommand(
            Command::new("prepare")
                .about("Write the site and FASTA files for a NetworKIN run")
                .arg(
                    Arg::new("sites")
                        .short('s')
                        .long("sites")
                        .value_name("FILE")
                        .required(true)
                        .help("Phospho-site identifiers, one per line"),
                )
                .arg(
                    Arg::new("fasta")
                        .long("fasta")
                        .value_name("FILE")
                        .required_unless_present("uniprot")
                        .conflicts_with("uniprot")
                        .help("Protein sequences in FASTA format"),
                )
                .arg(
                    Arg::new("uniprot")
                        .long("uniprot")
                        .value_name("FILE")
                        .help("UniProt tab export with a Sequence column"),
                )
                .arg(
                    Arg::new("output-dir")
                        .short('d')
                        .long("output-dir")
                        .value_name("DIR")
                        .required(true)
                        .help("Directory receiving the generated files"),
                ),
        )
        .subcommand(
            Command::new("fold-change")
                .about("Convert a time-course dataset to fold changes")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .required(true)
                        .help("Comma-separated time-course dataset"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Fold-change output file (default: stdout)"),
                )
                .arg(
                    Arg::new("p-values")
                        .long("p-values")
                        .value_name("FILE")
                        .help("Write -log10 p-values to this file"),
                ),
        )
}

fn init_logging(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn open_output(path: Option<&String>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String, String> {
    matches
        .get_one::<String>(id)
        .ok_or_else(|| format!("missing required argument '{id}'"))
}

fn load_table(matches: &ArgMatches) -> Result<IdentifierTable, KinactError> {
    match matches.get_one::<String>("table") {
        Some(path) => IdentifierTable::from_csv(path),
        None => {
            tracing::warn!("no identifier table given, curated enzymes stay unlabeled");
            Ok(IdentifierTable::default())
        }
    }
}

fn matrix_format(matches: &ArgMatches) -> MatrixFormat {
    match matches.get_one::<String>("format").map(String::as_str) {
        Some("long") => MatrixFormat::Long,
        _ => MatrixFormat::Tsv,
    }
}

fn run_curated(
    matches: &ArgMatches,
    num_threads: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let sources: SourceSelection = required(matches, "sources")?.parse()?;
    let config = KinactConfig {
        sources,
        output_format: matrix_format(matches),
        num_threads,
        ..Default::default()
    };

    let analyzer = KinactAnalyzer::new(config, load_table(matches)?)?;
    let matrix = analyzer.curated_matrix_from_file(required(matches, "input")?)?;

    let mut writer = open_output(matches.get_one::<String>("output"))?;
    write_matrix(&mut writer, &matrix, analyzer.config.output_format)?;
    writer.flush()?;
    Ok(())
}

fn run_networkin(
    matches: &ArgMatches,
    num_threads: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let duplicate_policy = match matches.get_one::<String>("duplicates").map(String::as_str) {
        Some("max") => DuplicatePolicy::MaxScore,
        _ => DuplicatePolicy::LastSeen,
    };
    let config = KinactConfig {
        score_cutoff: matches
            .get_one::<f64>("cutoff")
            .copied()
            .unwrap_or(kinact_core::constants::DEFAULT_SCORE_CUTOFF),
        binarize: !matches.get_flag("normalize"),
        duplicate_policy,
        add_curated: !matches.get_flag("no-curated"),
        output_format: matrix_format(matches),
        num_threads,
        ..Default::default()
    };

    let analyzer = KinactAnalyzer::new(config, load_table(matches)?)?;
    let matrix = analyzer.networkin_matrix_from_files(
        required(matches, "input")?,
        matches.get_one::<String>("curated"),
    )?;

    let mut writer = open_output(matches.get_one::<String>("output"))?;
    write_matrix(&mut writer, &matrix, analyzer.config.output_format)?;
    writer.flush()?;
    Ok(())
}

fn run_prepare(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let sites = read_site_list(required(matches, "sites")?)?;
    let library = match matches.get_one::<String>("fasta") {
        Some(path) => SequenceLibrary::from_fasta(path)?,
        None => SequenceLibrary::from_uniprot_table(required(matches, "uniprot")?)?,
    };

    let summary = prepare_networkin_files(&sites, &library, required(matches, "output-dir")?)?;
    for protein in &summary.missing_sequences {
        tracing::debug!(protein = %protein, "no sequence found");
    }
    Ok(())
}

fn run_fold_change(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = read_phospho_dataset(required(matches, "input")?)?;
    let (fold_changes, p_values) = dataset.into_fold_changes()?;
    tracing::info!(
        sites = fold_changes.sites().len(),
        time_points = fold_changes.time_points().len(),
        "computed fold changes"
    );

    let mut writer = open_output(matches.get_one::<String>("output"))?;
    write_time_course(&mut writer, &fold_changes)?;
    writer.flush()?;

    if let Some(path) = matches.get_one::<String>("p-values") {
        let mut writer = BufWriter::new(File::create(path)?);
        write_time_course(&mut writer, &p_values)?;
        writer.flush()?;
    }
    Ok(())
}

/// Main entry point for the kinact CLI application.
///
/// Parses command-line arguments, sets up logging and dispatches to the
/// requested subcommand.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = build_cli().get_matches();

    init_logging(matches.get_flag("quiet"));
    let num_threads = matches.get_one::<usize>("threads").copied();

    match matches.subcommand() {
        Some(("curated", sub)) => run_curated(sub, num_threads),
        Some(("networkin", sub)) => run_networkin(sub, num_threads),
        Some(("prepare", sub)) => run_prepare(sub),
        Some(("fold-change", sub)) => run_fold_change(sub),
        _ => Err("Unknown subcommand".into()),
    }
}
