//! Prompt construction for the extraction workflows
//!
//! Each workflow sends one fixed instructional prompt embedding the
//! caller's text. The instructions pin the exact JSON shape the
//! normalizers expect; the normalizers still treat whatever comes back
//! as untrusted.

use procura_domain::{NormalizedProposal, RfpStructure};

const RFP_STRUCTURE_INSTRUCTIONS: &str = r#"Convert the following procurement request into JSON with keys:
{
  "title": string,
  "items": [{"name": string, "quantity": integer, "specs": string}],
  "total_budget": number,
  "delivery_days": integer,
  "payment_terms": string,
  "warranty_months": integer,
  "notes": string
}
ONLY output valid JSON (no leading explanation)."#;

const PROPOSAL_EXTRACTION_INSTRUCTIONS: &str = r#"You are a parser. Given a vendor email reply, extract a JSON object with keys:
{
  "vendor_name": string,
  "line_items": [{"name":string,"qty":int,"unit_price":number,"total_price":number,"notes":string}],
  "total_price": number,
  "delivery_days": int,
  "warranty_months": int,
  "payment_terms": string,
  "missing_information": [string]
}
ONLY output valid JSON (no extra commentary)."#;

const COMPARISON_INSTRUCTIONS: &str = r#"For each proposal, compute:
- price_total (number),
- spec_match_score (0-100),
- delivery_risk ("low"/"medium"/"high"),
- overall_score (0-100).
Return JSON:
{
  "evaluations": [
    {"proposal_id": "...", "vendor_id": "...", "price_total": number, "spec_match_score": number, "delivery_risk": "...", "overall_score": number, "notes": "..."}
  ],
  "recommended_proposal_id": "...",
  "explanation": "short human-readable reason (1-3 sentences)"
}
ONLY output JSON."#;

/// Build the RFP structuring prompt around a procurement request
pub(crate) fn rfp_structure_prompt(natural_text: &str) -> String {
    format!("{RFP_STRUCTURE_INSTRUCTIONS}\n\nInput: {natural_text}")
}

/// Build the proposal extraction prompt around a vendor reply
pub(crate) fn proposal_extraction_prompt(email_text: &str) -> String {
    format!("{PROPOSAL_EXTRACTION_INSTRUCTIONS}\n\nEmail: {email_text}")
}

/// Build the comparison prompt around an RFP and its candidate proposals
pub(crate) fn comparison_prompt(rfp: &RfpStructure, proposals: &[NormalizedProposal]) -> String {
    let rfp_json = serde_json::to_string(rfp).unwrap_or_default();
    let proposals_json = serde_json::to_string(proposals).unwrap_or_default();
    format!(
        "You are an evaluator. Given this RFP: {rfp_json}\nand these proposals: {proposals_json}\n{COMPARISON_INSTRUCTIONS}"
    )
}

/// Clip text to at most `max` characters on a char boundary
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_domain::RfpItem;

    #[test]
    fn test_rfp_prompt_embeds_input() {
        let prompt = rfp_structure_prompt("40 laptops, 32GB RAM, within 45 days");
        assert!(prompt.contains("40 laptops, 32GB RAM, within 45 days"));
        assert!(prompt.contains("\"total_budget\""));
        assert!(prompt.contains("ONLY output valid JSON"));
    }

    #[test]
    fn test_proposal_prompt_embeds_email() {
        let prompt = proposal_extraction_prompt("We can supply the goods for $5k.");
        assert!(prompt.contains("We can supply the goods for $5k."));
        assert!(prompt.contains("\"missing_information\""));
    }

    #[test]
    fn test_comparison_prompt_embeds_both_sides() {
        let rfp = RfpStructure {
            title: "Chairs".to_string(),
            items: vec![RfpItem {
                name: "Chair".to_string(),
                quantity: 10,
                specs: String::new(),
            }],
            ..Default::default()
        };
        let proposals = vec![NormalizedProposal {
            vendor_name: Some("Acme".to_string()),
            ..Default::default()
        }];

        let prompt = comparison_prompt(&rfp, &proposals);
        assert!(prompt.contains("\"Chairs\""));
        assert!(prompt.contains("\"Acme\""));
        assert!(prompt.contains("recommended_proposal_id"));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // Multi-byte boundary safety
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }
}
