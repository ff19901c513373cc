//! Road-segment records and edge-list loading.
//!
//! Upstream preprocessing delivers road segments as a flat table with travel
//! time and accident risk already attached. This module reads that table from
//! CSV and exposes it as [`EdgeRecord`] values for [`crate::graph::build_graph`].

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::NodeId;

/// A single road segment as delivered by upstream preprocessing.
///
/// Endpoints are optional so that rows with a missing `from`/`to` value can be
/// carried through loading and rejected with a precise error at graph build time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeRecord {
    pub from: Option<NodeId>,
    pub to: Option<NodeId>,
    /// Travel time along the segment (minutes in the reference dataset).
    pub time: f64,
    /// `false` allows traversal in both directions with the same weights.
    pub oneway: bool,
    /// Accumulated safety-incident score for the segment.
    pub risk: f64,
}

impl EdgeRecord {
    /// Segment that may only be traversed from `from` to `to`.
    pub fn oneway(from: NodeId, to: NodeId, time: f64, risk: f64) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            time,
            oneway: true,
            risk,
        }
    }

    /// Segment that may be traversed in both directions.
    pub fn twoway(from: NodeId, to: NodeId, time: f64, risk: f64) -> Self {
        Self {
            oneway: false,
            ..Self::oneway(from, to, time, risk)
        }
    }
}

/// Edge records loaded from a CSV file or reader.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    records: Vec<EdgeRecord>,
    source: Option<PathBuf>,
}

impl EdgeList {
    /// Wrap already-validated records.
    pub fn new(records: Vec<EdgeRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    /// Load an edge list from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut list = Self::from_reader(file)?;
        list.source = Some(path.to_path_buf());
        debug!(
            "loaded {} edge records from {}",
            list.records.len(),
            path.display()
        );
        Ok(list)
    }

    /// Load an edge list from any CSV reader. Columns that are not part of the
    /// edge schema are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::EdgeData {
                message: format!("failed to read edge list headers: {err}"),
            })?
            .clone();
        let columns = ColumnMap::resolve(&headers)?;

        let mut records = Vec::new();
        let mut blank_oneway = 0usize;
        // Header occupies line 1.
        let mut row: usize = 1;
        for result in csv_reader.records() {
            row += 1;
            let record = result.map_err(|err| Error::EdgeData {
                message: err.to_string(),
            })?;
            let parsed = columns.parse_row(&record, row)?;
            if parsed.oneway_missing {
                blank_oneway += 1;
            }
            records.push(parsed.record);
        }

        if blank_oneway > 0 {
            warn!(
                "{} edge records have an empty oneway flag; treating them as one-way",
                blank_oneway
            );
        }

        Ok(Self {
            records,
            source: None,
        })
    }

    pub fn records(&self) -> &[EdgeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File the records were read from, when loaded via [`EdgeList::from_path`].
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn into_records(self) -> Vec<EdgeRecord> {
        self.records
    }
}

const SYNONYMS: &[(&str, &[&str])] = &[
    ("from", &["from", "u", "source", "from_node"]),
    ("to", &["to", "v", "target", "to_node"]),
    ("time", &["time", "travel_time", "minutes"]),
    ("oneway", &["oneway", "one_way"]),
    ("risk", &["risk", "humrat_teu", "accidents"]),
];

const REQUIRED: &[&str] = &["from", "to", "time", "oneway"];

fn normalize(header: &str) -> String {
    header
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Canonical field name -> column index.
struct ColumnMap {
    index: BTreeMap<&'static str, usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize).collect();
        let mut index = BTreeMap::new();

        for (canon, alternatives) in SYNONYMS {
            if let Some(position) = alternatives
                .iter()
                .find_map(|alt| normalized.iter().position(|h| h == alt))
            {
                index.insert(*canon, position);
            }
        }

        let missing: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|field| !index.contains_key(field))
            .collect();
        if !missing.is_empty() {
            return Err(Error::EdgeData {
                message: format!(
                    "edge list missing required columns: {}. Available: {}",
                    missing.join(", "),
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            });
        }

        if !index.contains_key("risk") {
            warn!("edge list has no risk column; every segment is assigned zero risk");
        }

        Ok(Self { index })
    }

    fn get<'r>(&self, record: &'r StringRecord, field: &str) -> Option<&'r str> {
        self.index
            .get(field)
            .and_then(|&i| record.get(i))
            .filter(|value| !value.is_empty())
    }

    fn parse_row(&self, record: &StringRecord, row: usize) -> Result<ParsedRow> {
        let from = self
            .get(record, "from")
            .map(|value| parse_node(value, "from", row))
            .transpose()?;
        let to = self
            .get(record, "to")
            .map(|value| parse_node(value, "to", row))
            .transpose()?;

        let time = self
            .get(record, "time")
            .ok_or_else(|| Error::EdgeData {
                message: format!("missing time at row {row}"),
            })
            .and_then(|value| parse_weight(value, "time", row))?;

        let risk = match self.get(record, "risk") {
            Some(value) => parse_weight(value, "risk", row)?,
            None if self.index.contains_key("risk") => {
                return Err(Error::EdgeData {
                    message: format!("missing risk at row {row}"),
                })
            }
            None => 0.0,
        };

        // Only an explicit false flag opens the reverse direction.
        let flag = self
            .get(record, "oneway")
            .map(|value| parse_flag(value, row))
            .transpose()?;

        Ok(ParsedRow {
            record: EdgeRecord {
                from,
                to,
                time,
                oneway: flag.unwrap_or(true),
                risk,
            },
            oneway_missing: flag.is_none(),
        })
    }
}

struct ParsedRow {
    record: EdgeRecord,
    oneway_missing: bool,
}

fn parse_node(value: &str, field: &str, row: usize) -> Result<NodeId> {
    if let Ok(id) = value.parse::<NodeId>() {
        return Ok(id);
    }
    // Tabular exports sometimes widen integer keys to floats ("1234.0").
    match value.parse::<f64>() {
        Ok(float) if float.fract() == 0.0 && fits_node_id(float) => Ok(float as NodeId),
        _ => Err(Error::EdgeData {
            message: format!("invalid {field} node id '{value}' at row {row}"),
        }),
    }
}

fn fits_node_id(value: f64) -> bool {
    // i64::MAX is not representable as f64; 2^63 is the first value out of range.
    value.is_finite() && value >= i64::MIN as f64 && value < -(i64::MIN as f64)
}

fn parse_weight(value: &str, field: &str, row: usize) -> Result<f64> {
    value.parse::<f64>().map_err(|err| Error::EdgeData {
        message: format!("invalid {field} '{value}' at row {row}: {err}"),
    })
}

fn parse_flag(value: &str, row: usize) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "t" | "yes" | "y" => Ok(true),
        "0" | "0.0" | "false" | "f" | "no" | "n" => Ok(false),
        _ => Err(Error::EdgeData {
            message: format!("invalid oneway flag '{value}' at row {row}"),
        }),
    }
}
