//! Pipeline contract tests for the Analyzer

#[cfg(test)]
mod tests {
    use crate::{
        AnalyzerConfig, AnalyzerError, AssessNovelty, AssessNoveltyInput, ClaimsResult, ExtractClaims,
        ExtractClaimsInput, GenerateSummary, GenerateSummaryInput, NoveltyResult, PaperAnalyzer, Signature,
        Stage, SummaryResult,
    };
    use claimscope_domain::PaperText;
    use claimscope_llm::MockProvider;
    use std::sync::{Arc, Mutex};

    /// Stage double that records its inputs and returns a canned reply
    struct FakeStage<S: Signature> {
        inputs: Arc<Mutex<Vec<S::Input>>>,
        reply: Result<S::Output, String>,
    }

    impl<S: Signature> FakeStage<S> {
        fn returning(output: S::Output) -> Self {
            Self {
                inputs: Arc::new(Mutex::new(Vec::new())),
                reply: Ok(output),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                inputs: Arc::new(Mutex::new(Vec::new())),
                reply: Err(message.to_string()),
            }
        }

        fn recorder(&self) -> Arc<Mutex<Vec<S::Input>>> {
            Arc::clone(&self.inputs)
        }
    }

    impl<S: Signature> Stage<S> for FakeStage<S>
    where
        S::Output: Clone + Sync,
    {
        async fn run(&self, input: S::Input) -> Result<S::Output, AnalyzerError> {
            self.inputs.lock().unwrap().push(input);
            self.reply.clone().map_err(AnalyzerError::Llm)
        }
    }

    fn claims(items: &[&str]) -> ClaimsResult {
        ClaimsResult {
            rationale: None,
            claims: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn novelty(score: i64, reasoning: &str) -> NoveltyResult {
        NoveltyResult {
            rationale: None,
            novelty_score: score,
            reasoning: reasoning.to_string(),
        }
    }

    fn summary(text: &str) -> SummaryResult {
        SummaryResult {
            rationale: None,
            summary: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_assessor_receives_extracted_claims() {
        let extract = FakeStage::<ExtractClaims>::returning(claims(&["A", "B"]));
        let assess = FakeStage::<AssessNovelty>::returning(novelty(5, "r"));
        let summarize = FakeStage::<GenerateSummary>::returning(summary("s"));
        let assessed = assess.recorder();

        PaperAnalyzer::from_stages(extract, assess, summarize)
            .analyze(&PaperText::new("paper"))
            .await
            .unwrap();

        assert_eq!(
            *assessed.lock().unwrap(),
            vec![AssessNoveltyInput {
                claims: vec!["A".to_string(), "B".to_string()]
            }]
        );
    }

    #[tokio::test]
    async fn test_summarizer_receives_claims_and_score() {
        let extract = FakeStage::<ExtractClaims>::returning(claims(&["A", "B"]));
        let assess = FakeStage::<AssessNovelty>::returning(novelty(7, "x"));
        let summarize = FakeStage::<GenerateSummary>::returning(summary("s"));
        let summarized = summarize.recorder();

        PaperAnalyzer::from_stages(extract, assess, summarize)
            .analyze(&PaperText::new("paper"))
            .await
            .unwrap();

        assert_eq!(
            *summarized.lock().unwrap(),
            vec![GenerateSummaryInput {
                claims: vec!["A".to_string(), "B".to_string()],
                novelty_score: 7,
            }]
        );
    }

    #[tokio::test]
    async fn test_extractor_receives_paper_verbatim() {
        let extract = FakeStage::<ExtractClaims>::returning(claims(&[]));
        let extracted = extract.recorder();
        let raw = "\n  Title\n\nBody with  double  spaces.\n";

        PaperAnalyzer::from_stages(
            extract,
            FakeStage::<AssessNovelty>::returning(novelty(1, "r")),
            FakeStage::<GenerateSummary>::returning(summary("s")),
        )
        .analyze(&PaperText::new(raw))
        .await
        .unwrap();

        assert_eq!(
            *extracted.lock().unwrap(),
            vec![ExtractClaimsInput {
                paper_text: raw.to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_bundle_fields_are_untransformed() {
        let analyzer = PaperAnalyzer::from_stages(
            FakeStage::<ExtractClaims>::returning(claims(&["  spaced claim  ", "second"])),
            FakeStage::<AssessNovelty>::returning(novelty(3, "  reasoning kept as-is ")),
            FakeStage::<GenerateSummary>::returning(summary("Summary.\n")),
        );

        let bundle = analyzer.analyze(&PaperText::new("paper")).await.unwrap();

        assert_eq!(bundle.claims, vec!["  spaced claim  ", "second"]);
        assert_eq!(bundle.novelty_score, 3);
        assert_eq!(bundle.reasoning, "  reasoning kept as-is ");
        assert_eq!(bundle.summary, "Summary.\n");
    }

    #[tokio::test]
    async fn test_extractor_failure_skips_later_stages() {
        let assess = FakeStage::<AssessNovelty>::returning(novelty(5, "r"));
        let summarize = FakeStage::<GenerateSummary>::returning(summary("s"));
        let assessed = assess.recorder();
        let summarized = summarize.recorder();

        let result = PaperAnalyzer::from_stages(FakeStage::<ExtractClaims>::failing("no route"), assess, summarize)
            .analyze(&PaperText::new("paper"))
            .await;

        assert!(matches!(result, Err(AnalyzerError::Llm(ref m)) if m == "no route"));
        assert!(assessed.lock().unwrap().is_empty());
        assert!(summarized.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assessor_failure_skips_summarizer() {
        let summarize = FakeStage::<GenerateSummary>::returning(summary("s"));
        let summarized = summarize.recorder();

        let result = PaperAnalyzer::from_stages(
            FakeStage::<ExtractClaims>::returning(claims(&["A"])),
            FakeStage::<AssessNovelty>::failing("quota"),
            summarize,
        )
        .analyze(&PaperText::new("paper"))
        .await;

        assert!(matches!(result, Err(AnalyzerError::Llm(ref m)) if m == "quota"));
        assert!(summarized.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summarizer_failure_propagates() {
        let result = PaperAnalyzer::from_stages(
            FakeStage::<ExtractClaims>::returning(claims(&["A"])),
            FakeStage::<AssessNovelty>::returning(novelty(5, "r")),
            FakeStage::<GenerateSummary>::failing("timeout upstream"),
        )
        .analyze(&PaperText::new("paper"))
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_claims_and_out_of_range_score_pass_through() {
        let summarize = FakeStage::<GenerateSummary>::returning(summary("Nothing to report."));
        let summarized = summarize.recorder();

        let bundle = PaperAnalyzer::from_stages(
            FakeStage::<ExtractClaims>::returning(claims(&[])),
            FakeStage::<AssessNovelty>::returning(novelty(42, "off the scale")),
            summarize,
        )
        .analyze(&PaperText::new("paper"))
        .await
        .unwrap();

        assert!(bundle.claims.is_empty());
        assert_eq!(bundle.novelty_score, 42);
        assert_eq!(summarized.lock().unwrap()[0].novelty_score, 42);
    }

    #[tokio::test]
    async fn test_transformer_paper_end_to_end_with_mock_provider() {
        let llm = MockProvider::scripted([
            r#"{"rationale": "The text replaces RNNs with attention.", "claims": ["attention replaces recurrence"]}"#,
            r#"{"rationale": "No prior model drops recurrence entirely.", "novelty_score": 8, "reasoning": "novel architecture"}"#,
            r#"{"rationale": "Summarize briefly.", "summary": "..."}"#,
        ]);
        let analyzer = PaperAnalyzer::new(Arc::new(llm.clone()), AnalyzerConfig::default());

        let trace = analyzer.trace(&PaperText::sample()).await.unwrap();

        assert_eq!(trace.rationales().len(), 3);
        let bundle = trace.into_bundle();
        assert_eq!(bundle.claims, vec!["attention replaces recurrence"]);
        assert_eq!(bundle.novelty_score, 8);
        assert_eq!(bundle.reasoning, "novel architecture");
        assert_eq!(bundle.summary, "...");

        let calls = llm.calls();
        assert!(calls[0].prompt.contains("Transformer"));
        assert!(calls[1].prompt.contains(r#"["attention replaces recurrence"]"#));
        assert!(calls[2].prompt.contains("novelty_score:\n---\n8\n---"));
    }

    #[tokio::test]
    async fn test_malformed_middle_response_stops_pipeline() {
        let llm = MockProvider::scripted([r#"{"claims": ["A"]}"#, "not json at all"]);
        let analyzer = PaperAnalyzer::new(Arc::new(llm.clone()), AnalyzerConfig::default());

        let result = analyzer.analyze(&PaperText::new("paper")).await;

        assert!(matches!(result, Err(AnalyzerError::InvalidFormat(_))));
        assert_eq!(llm.call_count(), 2);
    }
}
