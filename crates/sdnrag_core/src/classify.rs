use crate::domain::AttackCategory;

/// Derive the attack category from a source file's name.
///
/// Capture files in this corpus encode the experiment scenario in the file
/// name; matching is a fixed-priority substring test over the lowercased
/// name, first match wins. This is a best-effort heuristic, not content
/// inspection: a misnamed or mixed-scenario file mis-tags every unit it
/// produces.
pub fn classify_filename(name: &str) -> AttackCategory {
    let name = name.to_lowercase();
    if name.contains("dos") {
        AttackCategory::Dos
    } else if name.contains("arp") {
        AttackCategory::ArpSpoofing
    } else if name.contains("flow") {
        AttackCategory::FlowRulePoisoning
    } else {
        AttackCategory::Unknown
    }
}
