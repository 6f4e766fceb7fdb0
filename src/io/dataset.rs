//! JSON sample datasets and level export
//!
//! A dataset file holds the catalog size and a list of samples:
//!
//! ```json
//! { "catalogSize": 3,
//!   "samples": [ { "name": "intro", "width": 2, "height": 1,
//!                  "tiles": [ { "tileIndex": 0, "blockType": 0 },
//!                             { "tileIndex": 1, "blockType": 1 } ] } ] }
//! ```
//!
//! A file holding a single sample record (the form levels are saved in) and a
//! directory of `*.json` sample files are accepted as well.
//! Tiles are listed row-major with the top row first. Block types are ordinals.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::algorithm::level::GeneratedLevel;
use crate::analysis::ruleset::{Ruleset, RulesetBuilder};
use crate::analysis::samples::Sample;
use crate::io::configuration::DATASET_EXTENSION;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::TileVisual;

/// On-disk form of one sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRecord {
    /// Sample name, defaulting to its position or file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Columns
    pub width: usize,
    /// Rows
    pub height: usize,
    /// Row-major tiles, top row first
    pub tiles: Vec<TileVisual>,
}

impl SampleRecord {
    /// Validate into a [`Sample`], naming it `fallback_name` if unnamed
    ///
    /// # Errors
    ///
    /// Returns `MalformedSample` if the shape does not match the tile count
    pub fn into_sample(self, fallback_name: &str) -> Result<Sample> {
        let name = self.name.unwrap_or_else(|| fallback_name.to_string());
        Sample::new(name, self.width, self.height, self.tiles)
    }
}

/// On-disk form of a whole dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRecord {
    /// Number of tile variants; inferred from the samples when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_size: Option<usize>,
    /// Samples in file order
    pub samples: Vec<SampleRecord>,
}

/// Either form a single dataset file may take
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Dataset(DatasetRecord),
    Sample(SampleRecord),
}

/// Validated samples plus the catalog size they index into
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Number of tile variants
    pub catalog_size: usize,
    /// Samples the ruleset is learned from
    pub samples: Vec<Sample>,
}

impl Dataset {
    /// Assemble a dataset, inferring the catalog size when not given
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if there are no samples
    pub fn new(samples: Vec<Sample>, catalog_size: Option<usize>) -> Result<Self> {
        if samples.is_empty() {
            return Err(invalid_parameter(
                "samples",
                &0,
                &"dataset contains no samples",
            ));
        }

        let inferred = samples
            .iter()
            .filter_map(Sample::max_tile_index)
            .max()
            .map_or(0, |max_index| max_index + 1);

        Ok(Self {
            catalog_size: catalog_size.unwrap_or(inferred),
            samples,
        })
    }

    /// Parse a dataset, or a single sample, from JSON text
    ///
    /// Unnamed samples are named by position; a lone sample takes the file stem
    /// of `origin`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or a sample is malformed
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self> {
        let file: DatasetFile =
            serde_json::from_str(json).map_err(|e| AlgorithmError::Dataset {
                path: origin.to_path_buf(),
                source: e,
            })?;

        match file {
            DatasetFile::Dataset(record) => {
                let samples = record
                    .samples
                    .into_iter()
                    .enumerate()
                    .map(|(index, sample)| sample.into_sample(&format!("sample {index}")))
                    .collect::<Result<Vec<_>>>()?;
                Self::new(samples, record.catalog_size)
            }
            DatasetFile::Sample(record) => {
                let sample = record.into_sample(&file_stem(origin))?;
                Self::new(vec![sample], None)
            }
        }
    }

    /// Load a dataset file or a directory of sample files
    ///
    /// `catalog_size` overrides the size declared in (or inferred from) the data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path cannot be read
    /// - Any file is not valid JSON for its expected shape
    /// - A sample is malformed or the directory holds no samples
    pub fn load(path: &Path, catalog_size: Option<usize>) -> Result<Self> {
        let mut dataset = if path.is_dir() {
            Self::load_directory(path)?
        } else {
            let json = read_file(path)?;
            Self::from_json_str(&json, path)?
        };

        if let Some(catalog_size) = catalog_size {
            dataset.catalog_size = catalog_size;
        }

        info!(
            path = %path.display(),
            samples = dataset.samples.len(),
            catalog_size = dataset.catalog_size,
            "dataset loaded"
        );
        Ok(dataset)
    }

    fn load_directory(dir: &Path) -> Result<Self> {
        let mut files: Vec<PathBuf> = Vec::new();
        let entries = fs::read_dir(dir).map_err(|e| AlgorithmError::FileSystem {
            path: dir.to_path_buf(),
            operation: "read directory",
            source: e,
        })?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some(DATASET_EXTENSION) {
                files.push(path);
            }
        }
        files.sort();

        let mut samples = Vec::with_capacity(files.len());
        for file in &files {
            let json = read_file(file)?;
            let record: SampleRecord =
                serde_json::from_str(&json).map_err(|e| AlgorithmError::Dataset {
                    path: file.clone(),
                    source: e,
                })?;
            debug!(file = %file.display(), "sample file read");
            samples.push(record.into_sample(&file_stem(file))?);
        }

        Self::new(samples, None)
    }

    /// Learn the adjacency ruleset for this dataset
    ///
    /// # Errors
    ///
    /// Propagates ruleset build errors
    pub fn ruleset(&self) -> Result<Ruleset> {
        RulesetBuilder::new(self.catalog_size).build(&self.samples)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "read",
        source: e,
    })
}

/// Convert a level into its on-disk sample form
pub fn level_record(level: &GeneratedLevel, name: &str) -> SampleRecord {
    SampleRecord {
        name: Some(name.to_string()),
        width: level.width(),
        height: level.height(),
        tiles: level.tiles.iter().copied().collect(),
    }
}

/// Write a level as a sample JSON file
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - Serialization or writing fails
pub fn save_level(level: &GeneratedLevel, name: &str, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(&level_record(level, name)).map_err(|e| {
        AlgorithmError::Dataset {
            path: output_path.to_path_buf(),
            source: e,
        }
    })?;

    fs::write(output_path, json).map_err(|e| AlgorithmError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write",
        source: e,
    })
}
