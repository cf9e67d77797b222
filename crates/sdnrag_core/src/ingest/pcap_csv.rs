use std::path::Path;

use crate::chunking::{split_lines, DEFAULT_MAX_CHUNK_CHARS};
use crate::domain::{AttackCategory, EvidenceMeta, EvidenceUnit, Plane, SourceKind};
use crate::error::{AppError, ValidationWarning};

#[derive(Debug, Clone)]
pub struct PcapLoad {
    pub units: Vec<EvidenceUnit>,
    pub warnings: Vec<ValidationWarning>,
}

/// Load a delimited packet-capture export into tagged evidence units.
///
/// One row becomes one rendered evidence record: the fixed template header
/// followed by every column as `name: value` in the file's column order.
/// A row that fails to parse is skipped with a warning; a file whose header
/// cannot be read at all is an error, which the corpus builder downgrades to
/// a per-file warning.
pub fn load(path: &Path, attack: AttackCategory) -> Result<PcapLoad, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            AppError::new("INGEST_PCAP_OPEN_FAILED", "Failed to open packet capture export")
                .with_details(format!("path={}; err={}", path.display(), e))
        })?;

    let headers = rdr
        .headers()
        .map_err(|e| {
            AppError::new(
                "INGEST_PCAP_HEADERS_FAILED",
                "Failed to read packet capture header row",
            )
            .with_details(format!("path={}; err={}", path.display(), e))
        })?
        .clone();

    let meta = EvidenceMeta {
        attack,
        plane: Plane::Data,
        source: SourceKind::PcapRow,
    };

    let mut units = Vec::new();
    let mut warnings = Vec::new();

    for (row_idx, result) in rdr.records().enumerate() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warnings.push(
                    ValidationWarning::new(
                        "INGEST_PCAP_ROW_PARSE_FAILED",
                        "Failed to parse packet capture row",
                    )
                    .with_details(format!("path={}; row={row_idx}; err={e}", path.display())),
                );
                continue;
            }
        };

        let mut rendered = format!("ATTACK: {attack}\nPLANE: DATA\nSOURCE: pcap_row");
        for (header, value) in headers.iter().zip(row.iter()) {
            rendered.push('\n');
            rendered.push_str(header);
            rendered.push_str(": ");
            rendered.push_str(value.trim());
        }

        for chunk in split_lines(&rendered, DEFAULT_MAX_CHUNK_CHARS) {
            units.push(EvidenceUnit {
                content: chunk,
                meta,
            });
        }
    }

    Ok(PcapLoad { units, warnings })
}
