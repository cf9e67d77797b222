use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::classify_filename;
use crate::domain::EvidenceUnit;
use crate::error::{AppError, ValidationWarning};
use crate::ingest::{controller_log, pcap_csv};

/// Transient output of a corpus build. Ownership of the units passes to the
/// index; the warnings are surfaced once by the shell and dropped.
#[derive(Debug, Clone)]
pub struct CorpusBuild {
    pub units: Vec<EvidenceUnit>,
    pub warnings: Vec<ValidationWarning>,
}

/// Walk `dir` (non-recursive) and load every recognized artifact.
///
/// `.log` files go through the controller-log loader, `.csv` files through
/// the packet-capture loader, everything else is ignored. A file that fails
/// to load is skipped with a warning; only a directory that cannot be
/// enumerated at all is an error. A missing or empty directory yields an
/// empty corpus — the caller must refuse to index one.
///
/// Entries are visited in file-name order so repeated builds over the same
/// directory produce the same unit ordering; nothing downstream depends on
/// it beyond retrieval tie-breaking.
pub fn build_corpus(dir: &Path) -> Result<CorpusBuild, AppError> {
    let mut units = Vec::new();
    let mut warnings = Vec::new();

    if !dir.is_dir() {
        warnings.push(
            ValidationWarning::new("INGEST_DIR_MISSING", "Artifact directory does not exist")
                .with_details(format!("path={}", dir.display())),
        );
        return Ok(CorpusBuild { units, warnings });
    }

    let rd = fs::read_dir(dir).map_err(|e| {
        AppError::new("INGEST_DIR_READ_FAILED", "Failed to enumerate artifact directory")
            .with_details(format!("path={}; err={}", dir.display(), e))
    })?;

    let mut entries: Vec<PathBuf> = Vec::new();
    for entry in rd {
        let entry = entry.map_err(|e| {
            AppError::new("INGEST_DIR_READ_FAILED", "Failed to enumerate artifact directory")
                .with_details(format!("path={}; err={}", dir.display(), e))
        })?;
        let path = entry.path();
        if path.is_file() {
            entries.push(path);
        }
    }
    entries.sort();

    for path in entries {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        // One category per file; every unit the file yields shares it.
        let attack = classify_filename(name);

        match ext.as_deref() {
            Some("log") => match controller_log::load(&path, attack) {
                Ok(mut loaded) => units.append(&mut loaded),
                Err(e) => warnings.push(
                    ValidationWarning::new(
                        "INGEST_ARTIFACT_SKIPPED",
                        "Skipped unreadable controller log",
                    )
                    .with_details(format!("path={}; err={}", path.display(), e)),
                ),
            },
            Some("csv") => match pcap_csv::load(&path, attack) {
                Ok(mut loaded) => {
                    units.append(&mut loaded.units);
                    warnings.append(&mut loaded.warnings);
                }
                Err(e) => warnings.push(
                    ValidationWarning::new(
                        "INGEST_ARTIFACT_SKIPPED",
                        "Skipped unparsable packet capture export",
                    )
                    .with_details(format!("path={}; err={}", path.display(), e)),
                ),
            },
            _ => {}
        }
    }

    Ok(CorpusBuild { units, warnings })
}
