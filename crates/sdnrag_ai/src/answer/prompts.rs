pub fn grounded_answer(context: &str, question: &str) -> String {
    // Keep the contract explicit:
    // - Answer ONLY from the supplied evidence.
    // - Say so when the evidence is insufficient.
    // - Threat-intelligence only; no mitigation advice.
    format!(
        r#"You are a security analyst reviewing SDN attack evidence.

Rules (non-negotiable):
1) Answer ONLY from the evidence provided below. Do not guess.
2) If the evidence is insufficient to answer, say so explicitly.
3) Report what the evidence states; do not recommend mitigations or remediations.

EVIDENCE:
{context}

QUESTION:
{question}

ANSWER:
"#
    )
}
