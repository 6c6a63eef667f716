//! CSV format dataset loading
//!
//! Supports delimited text files where:
//! - The last column is the integer class label
//! - All other columns are numeric features
//! - First row can be headers (automatically detected)
//! - Blank lines and lines starting with `#` are skipped

use crate::core::{ClassifyError, Dataset, Result};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Options controlling how delimited text is parsed
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    /// Field separator
    pub delimiter: char,
    /// Skip the first row if it looks like column names
    pub auto_detect_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            auto_detect_header: true,
        }
    }
}

/// Loader producing a [`Dataset`] from CSV text
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvDataset;

impl CsvDataset {
    /// Load a dataset from a comma separated file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        Self::from_file_with_options(path, &CsvOptions::default())
    }

    /// Load a dataset from a file with explicit options
    pub fn from_file_with_options<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader_with_options(BufReader::new(file), options)?;
        info!(
            "Loaded {} samples with {} features from {path:?}",
            dataset.len(),
            dataset.dim()
        );
        Ok(dataset)
    }

    /// Load a comma separated dataset from a reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Dataset> {
        Self::from_reader_with_options(reader, &CsvOptions::default())
    }

    /// Load a dataset from a reader with explicit options
    pub fn from_reader_with_options<R: BufRead>(reader: R, options: &CsvOptions) -> Result<Dataset> {
        let mut features: Vec<Vec<f64>> = Vec::new();
        let mut labels = Vec::new();
        let mut header_checked = !options.auto_detect_header;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if !header_checked {
                header_checked = true;
                if Self::is_header_line(line, options.delimiter) {
                    continue;
                }
            }

            let (row, label) = Self::parse_data_line(line, options.delimiter)
                .map_err(|e| ClassifyError::ParseError(format!("line {}: {e}", line_no + 1)))?;

            if let Some(first) = features.first() {
                if first.len() != row.len() {
                    return Err(ClassifyError::ParseError(format!(
                        "line {}: expected {} features, found {}",
                        line_no + 1,
                        first.len(),
                        row.len()
                    )));
                }
            }

            features.push(row);
            labels.push(label);
        }

        if features.is_empty() {
            return Err(ClassifyError::EmptyDataset);
        }

        Ok(Dataset::from_parts(features, labels))
    }

    /// Check if a line appears to be a header
    fn is_header_line(line: &str, delimiter: char) -> bool {
        let fields: Vec<&str> = line.split(delimiter).collect();

        if fields.len() < 2 {
            return false;
        }

        // Most feature columns non-numeric means column names
        let n_features = fields.len() - 1;
        let non_numeric_count = fields
            .iter()
            .take(n_features)
            .filter(|field| field.trim().parse::<f64>().is_err())
            .count();

        non_numeric_count * 2 > n_features
    }

    /// Parse one data line into a feature row and its label
    fn parse_data_line(line: &str, delimiter: char) -> std::result::Result<(Vec<f64>, i64), String> {
        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        if fields.len() < 2 {
            return Err(format!("too few fields: {line}"));
        }

        let (label_field, feature_fields) = match fields.split_last() {
            Some(parts) => parts,
            None => return Err(format!("too few fields: {line}")),
        };

        let label = Self::parse_label(label_field)?;

        let row = feature_fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                field
                    .parse::<f64>()
                    .map_err(|_| format!("invalid feature value at column {}: {field}", idx + 1))
            })
            .collect::<std::result::Result<Vec<f64>, String>>()?;

        Ok((row, label))
    }

    /// Integer label; integral floats such as `3.0` are accepted
    fn parse_label(field: &str) -> std::result::Result<i64, String> {
        if let Ok(label) = field.parse::<i64>() {
            return Ok(label);
        }
        match field.parse::<f64>() {
            Ok(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => Ok(value as i64),
            _ => Err(format!("invalid label: {field}")),
        }
    }
}
