use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// Coarse classification of the attack scenario a source artifact captures.
///
/// Derived once per file from the file name (see `classify`); every unit
/// produced from that file shares the category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttackCategory {
    Dos,
    ArpSpoofing,
    FlowRulePoisoning,
    Unknown,
}

impl AttackCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackCategory::Dos => "dos",
            AttackCategory::ArpSpoofing => "arp_spoofing",
            AttackCategory::FlowRulePoisoning => "flow_rule_poisoning",
            AttackCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AttackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Network-architecture axis of a piece of evidence: controller-origin
/// (`control`) or packet/traffic-origin (`data`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Plane {
    Control,
    Data,
}

impl Plane {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plane::Control => "control",
            Plane::Data => "data",
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    ControllerLog,
    PcapRow,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::ControllerLog => "controller_log",
            SourceKind::PcapRow => "pcap_row",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed metadata triple every evidence unit carries. Assigned once at
/// load time and immutable thereafter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvidenceMeta {
    pub attack: AttackCategory,
    pub plane: Plane,
    pub source: SourceKind,
}

impl EvidenceMeta {
    /// Render the triple as an ordered string map for index payloads.
    pub fn as_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("attack".to_string(), self.attack.as_str().to_string()),
            ("plane".to_string(), self.plane.as_str().to_string()),
            ("source".to_string(), self.source.as_str().to_string()),
        ])
    }
}

/// The atomic indexed record: one bounded-size chunk of rendered evidence
/// text plus its metadata. `content` is never empty or whitespace-only;
/// the chunker guarantees this for everything the loaders produce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvidenceUnit {
    pub content: String,
    pub meta: EvidenceMeta,
}

impl EvidenceUnit {
    /// Stable content-derived identity used as the index key. `ordinal` is
    /// the unit's position in the corpus, so identical chunks from repeated
    /// lines still get distinct ids.
    pub fn unit_id(&self, ordinal: usize) -> String {
        let text_sha256 = sha256_hex(self.content.as_bytes());
        let id_input = format!(
            "v1|{}|{}|{}|{}|{}",
            self.meta.attack.as_str(),
            self.meta.plane.as_str(),
            self.meta.source.as_str(),
            ordinal,
            text_sha256
        );
        sha256_hex(id_input.as_bytes())
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_map_uses_fixed_keys() {
        let meta = EvidenceMeta {
            attack: AttackCategory::FlowRulePoisoning,
            plane: Plane::Data,
            source: SourceKind::PcapRow,
        };
        let map = meta.as_map();
        assert_eq!(map.get("attack").map(String::as_str), Some("flow_rule_poisoning"));
        assert_eq!(map.get("plane").map(String::as_str), Some("data"));
        assert_eq!(map.get("source").map(String::as_str), Some("pcap_row"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn unit_ids_are_stable_and_ordinal_scoped() {
        let meta = EvidenceMeta {
            attack: AttackCategory::Dos,
            plane: Plane::Control,
            source: SourceKind::ControllerLog,
        };
        let unit = EvidenceUnit {
            content: "LOG: flood".to_string(),
            meta,
        };
        assert_eq!(unit.unit_id(0), unit.unit_id(0));
        assert_ne!(unit.unit_id(0), unit.unit_id(1));
    }
}
