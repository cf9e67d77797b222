use std::fs;
use std::path::Path;

use crate::chunking::{split_lines, DEFAULT_MAX_CHUNK_CHARS};
use crate::domain::{AttackCategory, EvidenceMeta, EvidenceUnit, Plane, SourceKind};
use crate::error::AppError;

/// Load a line-oriented controller log into tagged evidence units.
///
/// Each non-blank line is rendered through the fixed evidence template and
/// chunked; all units from one file share the attack category derived from
/// its name. Decode errors never fail a load: the file is read as bytes and
/// decoded lossily, so a stray non-UTF-8 byte degrades to a replacement
/// character instead of dropping the artifact.
pub fn load(path: &Path, attack: AttackCategory) -> Result<Vec<EvidenceUnit>, AppError> {
    let bytes = fs::read(path).map_err(|e| {
        AppError::new("INGEST_LOG_READ_FAILED", "Failed to read controller log")
            .with_details(format!("path={}; err={}", path.display(), e))
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let meta = EvidenceMeta {
        attack,
        plane: Plane::Control,
        source: SourceKind::ControllerLog,
    };

    let mut units = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let rendered = format!(
            "ATTACK: {attack}\nPLANE: CONTROL\nSOURCE: controller_log\nLOG: {line}"
        );
        for chunk in split_lines(&rendered, DEFAULT_MAX_CHUNK_CHARS) {
            units.push(EvidenceUnit {
                content: chunk,
                meta,
            });
        }
    }

    Ok(units)
}
