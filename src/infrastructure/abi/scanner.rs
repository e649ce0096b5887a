//! ABI file scanner - discovers and loads contract ABI files from the filesystem

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::abi::{ContractAbi, ValidationOptions};

/// An ABI loaded from disk
#[derive(Debug, Clone)]
pub struct ScannedAbi {
    /// File the ABI was read from
    pub path: PathBuf,
    pub abi: ContractAbi,
}

/// Result of scanning one or more directories
#[derive(Debug, Default, Clone)]
pub struct ScanReport {
    pub contracts: Vec<ScannedAbi>,
    /// Number of JSON files examined
    pub scanned_files: usize,
    /// Per-file load errors
    pub errors: Vec<String>,
    /// Scan duration in milliseconds
    pub scan_ms: u128,
}

impl ScanReport {
    fn merge(&mut self, other: Self) {
        self.scanned_files = self.scanned_files.saturating_add(other.scanned_files);
        self.contracts.extend(other.contracts);
        self.errors.extend(other.errors);
    }
}

/// Read a contract ABI file
///
/// The file may hold the ABI object itself or nest it under an `abi` key.
pub fn load_abi_file(path: &Path, options: ValidationOptions) -> Result<ContractAbi> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("parse {}", path.display()))?;
    let raw = extract_abi(&value).unwrap_or(&value);
    let abi = ContractAbi::with_options(raw, options)
        .with_context(|| format!("load {}", path.display()))?;
    Ok(abi)
}

/// Find the ABI object inside a JSON document, if it has one
fn extract_abi(value: &Value) -> Option<&Value> {
    if looks_like_abi(value) {
        return Some(value);
    }
    value.get("abi").filter(|abi| looks_like_abi(abi))
}

fn looks_like_abi(value: &Value) -> bool {
    value.get("deploy").is_some() && value.get("messages").is_some()
}

/// ABI file scanner
pub struct AbiScanner {
    options: ValidationOptions,
}

impl AbiScanner {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Scan a single root directory for ABI files
    pub fn scan(&self, root: impl AsRef<Path>) -> ScanReport {
        let started = Instant::now();
        let root = root.as_ref();
        let mut report = ScanReport::default();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !Self::is_ignored_dir(e.path()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    report.errors.push(err.to_string());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // Skip files larger than 5MB
            let metadata = match entry.metadata() {
                Ok(meta) => meta,
                Err(err) => {
                    report.errors.push(format!("{}: {}", path.display(), err));
                    continue;
                }
            };
            if metadata.len() > 5 * 1024 * 1024 {
                continue;
            }

            report.scanned_files += 1;

            match self.load_if_abi(path) {
                Ok(Some(abi)) => report.contracts.push(ScannedAbi {
                    path: path.to_path_buf(),
                    abi,
                }),
                Ok(None) => {}
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping ABI file");
                    report.errors.push(format!("{}: {:#}", path.display(), err));
                }
            }
        }

        report.scan_ms = started.elapsed().as_millis();
        debug!(
            root = %root.display(),
            contracts = report.contracts.len(),
            scanned = report.scanned_files,
            "scanned for ABI files"
        );

        report
    }

    /// Scan multiple root directories
    pub fn scan_roots(&self, roots: &[PathBuf]) -> ScanReport {
        let started = Instant::now();
        let mut report = ScanReport::default();

        for root in roots {
            report.merge(self.scan(root));
        }

        report.scan_ms = started.elapsed().as_millis();
        report
    }

    /// Load a JSON file when it holds an ABI; other JSON is skipped silently
    fn load_if_abi(&self, path: &Path) -> Result<Option<ContractAbi>> {
        let content = fs::read_to_string(path)?;
        let value: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(_) => return Ok(None),
        };

        let Some(raw) = extract_abi(&value) else {
            return Ok(None);
        };

        Ok(Some(ContractAbi::with_options(raw, self.options)?))
    }

    /// Check if a path should be ignored
    fn is_ignored_dir(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| matches!(name, ".git" | "target" | "node_modules"))
            .unwrap_or(false)
    }
}

impl Default for AbiScanner {
    fn default() -> Self {
        Self::new(ValidationOptions::default())
    }
}
