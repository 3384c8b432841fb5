//! # kinact - Kinase/Phosphatase-Substrate Adjacency Matrices
//!
//! Builds signed adjacency matrices linking phosphorylation sites to the
//! kinases and phosphatases that act on them, from curated interaction
//! databases and from NetworKIN sequence-based predictions.
//!
//! ## Overview
//!
//! Rows are phospho-sites (`{protein}_{residue}{position}`), columns are
//! regulatory enzymes. A cell holds a positive value for a kinase, a
//! negative value for a phosphatase and nothing when there is no evidence.
//! Curated evidence always takes precedence over predictions.
//!
//! ## Features
//!
//! - **Curated Matrices**: filter interaction records by source database and
//!   label enzymes by gene symbol
//! - **Prediction Matrices**: score cutoff with binarized or row-normalized
//!   values
//! - **Merging**: overlay curated evidence on a prediction matrix
//! - **NetworKIN Input**: site and FASTA files for a prediction run
//! - **Time Courses**: fold changes and -log10 p-values from raw datasets
//! - **Parallel Processing**: curated and predicted matrices built
//!   concurrently using Rayon
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kinact_core::{KinactAnalyzer, config::KinactConfig};
//! use kinact_core::io::{read_interaction_records, read_prediction_records};
//! use kinact_core::translator::IdentifierTable;
//!
//! let table = IdentifierTable::from_csv("identifiers.tsv")?;
//! let analyzer = KinactAnalyzer::new(KinactConfig::default(), table)?;
//!
//! let predictions = read_prediction_records("networkin_results.tsv")?;
//! let curated = read_interaction_records("ptm_interactions.tsv")?;
//! let matrix = analyzer.networkin_matrix(&predictions, &curated)?;
//!
//! println!("{} sites, {} enzymes", matrix.n_rows(), matrix.n_columns());
//! # Ok::<(), kinact_core::types::KinactError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Configuration options for matrix construction
//! - [`engine`]: High-level analyzer
//! - [`types`]: Records, phospho-sites and errors
//! - [`matrix`]: Sparse adjacency matrix and its builder
//! - [`translator`]: Identifier translation between namespaces
//! - [`curated`]: Curated matrix builder and source selection
//! - [`prediction`]: Prediction matrix builder
//! - [`merge`]: Overlay of curated evidence on predictions
//! - [`io`]: Readers for curated exports, NetworKIN results and site lists
//! - [`networkin`]: Input files for a NetworKIN run
//! - [`dataset`]: Phosphoproteomics time-course preprocessing
//! - [`output`]: Matrix and time-course writers
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, KinactError>`](types::KinactError),
//! covering:
//!
//! - Unknown identifier namespaces or curated sources
//! - Invalid score cutoffs
//! - Missing columns and malformed records in input tables
//! - I/O errors during file operations

pub mod config;
pub mod constants;
pub mod curated;
pub mod dataset;
pub mod engine;
pub mod io;
pub mod matrix;
pub mod merge;
pub mod networkin;
pub mod output;
pub mod prediction;
pub mod translator;
pub mod types;

pub use engine::KinactAnalyzer;
pub use types::KinactError;
