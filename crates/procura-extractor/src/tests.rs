//! Integration tests for the extraction workflows

#[cfg(test)]
mod tests {
    use crate::{Extractor, ExtractorConfig};
    use procura_domain::{ComparisonOutcome, NormalizedProposal, RfpStructure};
    use procura_llm::MockGenerator;
    use serde_json::json;

    fn extractor(generator: MockGenerator) -> Extractor<MockGenerator> {
        Extractor::new(generator, ExtractorConfig::default())
    }

    fn sample_rfp() -> RfpStructure {
        RfpStructure {
            title: "Chairs".to_string(),
            ..Default::default()
        }
    }

    fn sample_proposals() -> Vec<NormalizedProposal> {
        vec![NormalizedProposal {
            vendor_name: Some("Acme".to_string()),
            total_price: Some(100.0),
            ..Default::default()
        }]
    }

    #[tokio::test]
    async fn test_structure_rfp_from_fenced_response() {
        let generator = MockGenerator::new(
            "```json\n{\"title\": \"Laptops\", \"items\": [{\"name\": \"14in laptop\", \
             \"quantity\": 40, \"specs\": \"32GB\"}], \"total_budget\": \"60,000\"}\n```",
        );
        let ex = extractor(generator);

        let rfp = ex.structure_rfp("we need 40 laptops", "fallback").await;
        assert_eq!(rfp.title, "Laptops");
        assert_eq!(rfp.items.len(), 1);
        assert_eq!(rfp.items[0].quantity, 40);
        assert_eq!(rfp.total_budget, Some(60_000.0));
    }

    #[tokio::test]
    async fn test_structure_rfp_degrades_on_generator_failure() {
        let ex = extractor(MockGenerator::failing());

        let rfp = ex
            .structure_rfp("two hundred reams of A4 paper", "Paper order")
            .await;
        assert_eq!(rfp.title, "Paper order");
        assert_eq!(rfp.notes, "two hundred reams of A4 paper");
        assert!(rfp.items.is_empty());
    }

    #[tokio::test]
    async fn test_structure_rfp_degrades_to_default_title() {
        // A response with nothing extractable degrades the same way as a
        // failed call
        let ex = extractor(MockGenerator::new("I would rather write a poem."));

        let rfp = ex.structure_rfp("anything", "").await;
        assert_eq!(rfp.title, "Untitled RFP");
        assert_eq!(rfp.notes, "anything");
    }

    #[tokio::test]
    async fn test_parse_proposal_locally_without_generation() {
        let generator = MockGenerator::failing();
        let ex = extractor(generator.clone());

        let reply = r#"Thanks for the RFP! {"vendor": "Acme", "items": [{"item": "Widget", "quantity": "3", "rate": "10"}], "delivery_days": 14, "payment_terms": "net 30"}"#;
        let proposal = ex.parse_proposal(reply).await;

        assert_eq!(proposal.vendor_name.as_deref(), Some("Acme"));
        assert_eq!(proposal.total_price, Some(30.0));
        assert_eq!(proposal.delivery_days, Some(14));
        assert!(proposal.missing_information.is_empty());
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_parse_proposal_consults_generation_for_prose() {
        let mut generator = MockGenerator::new("{}");
        generator.add_response(
            "vendor email",
            r#"{"vendor_name": "Globex", "total_price": "$4,500", "warranty_months": "12"}"#,
        );
        let ex = extractor(generator.clone());

        let proposal = ex
            .parse_proposal("Hi, Globex here, we quote 4500 dollars all-in.")
            .await;
        assert_eq!(proposal.vendor_name.as_deref(), Some("Globex"));
        assert_eq!(proposal.total_price, Some(4500.0));
        assert_eq!(proposal.warranty_months, Some(12));
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_parse_proposal_total_failure_keeps_raw() {
        let ex = extractor(MockGenerator::failing());

        let text = "not json at all and no AI available";
        let proposal = ex.parse_proposal(text).await;

        assert_eq!(proposal.raw.as_deref(), Some(text));
        assert_eq!(
            proposal.missing_information,
            vec![
                "vendor_name",
                "line_items",
                "total_price",
                "delivery_days",
                "payment_terms"
            ]
        );
    }

    #[tokio::test]
    async fn test_parse_proposal_structured_input_is_direct() {
        let generator = MockGenerator::failing();
        let ex = extractor(generator.clone());

        let value = json!({"supplier": "Initech", "total": 1200});
        let proposal = ex.parse_proposal(value).await;

        assert_eq!(proposal.vendor_name.as_deref(), Some("Initech"));
        assert_eq!(proposal.total_price, Some(1200.0));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_compare_proposals_recovers_fenced_output() {
        let response = "```json\n{\"evaluations\": [{\"proposal_id\": \"p1\", \"vendor_id\": \"v1\", \
             \"price_total\": \"12,000\", \"spec_match_score\": 88.5, \"delivery_risk\": \"Low\", \
             \"overall_score\": \"91\", \"notes\": \"solid\"}], \
             \"recommended_proposal_id\": \"p1\", \"explanation\": \"best value\"}\n```";
        let ex = extractor(MockGenerator::new(response));

        let outcome = ex.compare_proposals(&sample_rfp(), &sample_proposals()).await;
        let report = outcome.report().expect("expected a report");
        assert_eq!(report.evaluations.len(), 1);
        assert_eq!(report.evaluations[0].price_total, Some(12_000.0));
        assert_eq!(report.evaluations[0].spec_match_score, Some(88.5));
        assert_eq!(report.evaluations[0].delivery_risk.as_deref(), Some("low"));
        assert_eq!(report.recommended_proposal_id.as_deref(), Some("p1"));
        assert_eq!(report.explanation.as_deref(), Some("best value"));
    }

    #[tokio::test]
    async fn test_compare_proposals_unparseable_output_is_explicit_failure() {
        let ex = extractor(MockGenerator::new("I am unable to rank these."));

        let outcome = ex.compare_proposals(&sample_rfp(), &sample_proposals()).await;
        match outcome {
            ComparisonOutcome::Failed { error, raw } => {
                assert_eq!(error, "failed to parse AI output");
                assert_eq!(raw, "I am unable to rank these.");
            }
            ComparisonOutcome::Report(_) => panic!("expected explicit failure"),
        }
    }

    #[tokio::test]
    async fn test_compare_proposals_generator_failure() {
        let ex = extractor(MockGenerator::failing());

        let outcome = ex.compare_proposals(&sample_rfp(), &sample_proposals()).await;
        match outcome {
            ComparisonOutcome::Failed { error, raw } => {
                assert!(error.contains("generation failed"));
                assert!(raw.is_empty());
            }
            ComparisonOutcome::Report(_) => panic!("expected explicit failure"),
        }
    }

    #[tokio::test]
    async fn test_compare_proposals_batch_limit() {
        let mut config = ExtractorConfig::default();
        config.max_compared_proposals = 1;
        let ex = Extractor::new(
            MockGenerator::new(r#"{"evaluations": []}"#),
            config,
        );

        let proposals = vec![
            NormalizedProposal {
                vendor_name: Some("A".to_string()),
                ..Default::default()
            },
            NormalizedProposal {
                vendor_name: Some("B".to_string()),
                ..Default::default()
            },
        ];

        let outcome = ex.compare_proposals(&sample_rfp(), &proposals).await;
        assert!(outcome.report().is_some());
    }
}
