use std::sync::Arc;

use super::*;
use crate::constants::{VERDICT_CLEAN_MESSAGE, VERDICT_PLAGIARISED_MESSAGE};
use crate::embedding::SentenceEncoder;
use crate::sections::Section;
use crate::storage::{DocumentId, DocumentStore, MockDocumentStore, NewDocument};

const TEXT: &str = "text/plain";

const GNN_INTRO: &str = "Introduction:\nWe study graph neural networks for molecular property prediction \
     and compare message passing variants on benchmark datasets.\n";

fn detector(store: &MockDocumentStore) -> PlagiarismDetector<MockDocumentStore> {
    PlagiarismDetector::new(Arc::new(store.clone()), Arc::new(SentenceEncoder::stub()))
}

fn row(score: f64) -> SectionComparisonResult {
    SectionComparisonResult {
        section: Section::Abstract,
        file_id: DocumentId::new(),
        similarity_score: score,
        result: SimilarityLabel::classify(score, 80.0),
    }
}

fn sweep_of(scores: &[f64]) -> ComparisonSweep {
    let mut sweep = ComparisonSweep::default();
    for score in scores {
        sweep.push(row(*score));
    }
    sweep
}

mod aggregator_tests {
    use super::*;

    #[test]
    fn test_empty_sweep_averages_zero() {
        let agg = VerdictAggregator::new(80.0);
        assert_eq!(agg.average(&ComparisonSweep::default()), 0.0);
    }

    #[test]
    fn test_average_rounds_to_hundredths() {
        let agg = VerdictAggregator::new(80.0);
        assert_eq!(agg.average(&sweep_of(&[50.0, 51.0, 60.0])), 53.67);
    }

    #[test]
    fn test_average_clipped_at_hundred() {
        let agg = VerdictAggregator::new(80.0);
        let sweep = ComparisonSweep {
            total: 250.0,
            count: 2,
            ..Default::default()
        };
        assert_eq!(agg.average(&sweep), 100.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let agg = VerdictAggregator::new(80.0);
        assert!(agg.is_plagiarised(80.0));
        assert!(!agg.is_plagiarised(79.99));
    }

    #[test]
    fn test_label_threshold_is_inclusive() {
        assert_eq!(SimilarityLabel::classify(80.0, 80.0), SimilarityLabel::High);
        assert_eq!(SimilarityLabel::classify(79.99, 80.0), SimilarityLabel::Low);
        assert_eq!(SimilarityLabel::High.as_str(), "High similarity");
    }

    #[tokio::test]
    async fn test_exactly_eighty_flags_and_deletes() {
        let store = MockDocumentStore::new();
        let target = store.insert_text("t.txt", TEXT, "abstract: x");

        let verdict = VerdictAggregator::new(80.0)
            .conclude(&store, &target.id, sweep_of(&[80.0]))
            .await;

        assert_eq!(verdict.avg_similarity_score, 80.0);
        assert!(verdict.plagiarised);
        assert!(verdict.deleted);
        assert_eq!(verdict.message, VERDICT_PLAGIARISED_MESSAGE);
        assert!(!store.contains(&target.id));
    }

    #[tokio::test]
    async fn test_clean_verdict_keeps_target() {
        let store = MockDocumentStore::new();
        let target = store.insert_text("t.txt", TEXT, "abstract: x");

        let verdict = VerdictAggregator::new(80.0)
            .conclude(&store, &target.id, sweep_of(&[40.0, 60.0]))
            .await;

        assert_eq!(verdict.avg_similarity_score, 50.0);
        assert!(!verdict.plagiarised);
        assert!(!verdict.deleted);
        assert_eq!(verdict.message, VERDICT_CLEAN_MESSAGE);
        assert_eq!(verdict.detailed_results.len(), 2);
        assert!(store.contains(&target.id));
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_verdict() {
        let store = MockDocumentStore::new();
        let target = store.insert_text("t.txt", TEXT, "abstract: x");
        store.fail_delete(true);

        let verdict = VerdictAggregator::new(80.0)
            .conclude(&store, &target.id, sweep_of(&[95.0]))
            .await;

        assert!(verdict.plagiarised);
        assert!(!verdict.deleted);
        assert_eq!(verdict.message, VERDICT_PLAGIARISED_MESSAGE);
        assert!(store.contains(&target.id));
    }

    #[test]
    fn test_verdict_json_shape() {
        let verdict = Verdict {
            avg_similarity_score: 12.5,
            plagiarised: false,
            detailed_results: vec![row(12.5)],
            message: VERDICT_CLEAN_MESSAGE.to_string(),
            deleted: false,
        };
        let json = serde_json::to_value(&verdict).unwrap();

        assert_eq!(json["avg_similarity_score"], 12.5);
        assert_eq!(json["plagiarised"], false);
        assert_eq!(json["message"], VERDICT_CLEAN_MESSAGE);
        let first = &json["detailedResults"][0];
        assert_eq!(first["section"], "abstract");
        assert_eq!(first["similarity_score"], 12.5);
        assert_eq!(first["result"], "Low similarity");
        assert_eq!(first["fileId"], verdict.detailed_results[0].file_id.to_string());
    }
}

mod detector_tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_identifier_rejected() {
        let store = MockDocumentStore::new();
        store.insert_text("a.txt", TEXT, GNN_INTRO);

        let err = detector(&store).check("not-an-id").await.unwrap_err();

        assert!(matches!(err, DetectionError::InvalidIdentifier { ref value } if value == "not-an-id"));
        assert_eq!(err.kind(), "invalid_identifier");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_target_not_found() {
        let store = MockDocumentStore::new();
        let err = detector(&store)
            .check(&DocumentId::new().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DetectionError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_ineligible_target_not_found() {
        let store = MockDocumentStore::new();
        let image = store.insert(NewDocument::new("a.png", "image/png", vec![1u8, 2, 3]));

        let err = detector(&store).check(&image.id.to_string()).await.unwrap_err();
        assert!(matches!(err, DetectionError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_target_fetch_fault_is_unexpected() {
        let store = MockDocumentStore::new();
        let target = store.insert_text("a.txt", TEXT, GNN_INTRO);
        store.fail_fetch(target.id);

        let err = detector(&store).check_id(&target.id).await.unwrap_err();
        assert!(matches!(err, DetectionError::Unexpected(_)));
    }

    #[tokio::test]
    async fn test_listing_fault_is_unexpected() {
        let store = MockDocumentStore::new();
        let target = store.insert_text("a.txt", TEXT, GNN_INTRO);
        store.fail_list(true);

        let err = detector(&store).check_id(&target.id).await.unwrap_err();
        assert!(matches!(err, DetectionError::Unexpected(_)));
    }

    #[tokio::test]
    async fn test_lone_document_is_clean() {
        let store = MockDocumentStore::new();
        let target = store.insert_text("a.txt", TEXT, GNN_INTRO);

        let verdict = detector(&store).check_id(&target.id).await.unwrap();

        assert_eq!(verdict.avg_similarity_score, 0.0);
        assert!(!verdict.plagiarised);
        assert!(verdict.detailed_results.is_empty());
        assert_eq!(verdict.message, VERDICT_CLEAN_MESSAGE);
    }

    #[tokio::test]
    async fn test_identical_introduction_flags_and_deletes() {
        let store = MockDocumentStore::new();
        let other = store.insert_text("earlier.txt", TEXT, GNN_INTRO);
        let target = store.insert_text("copy.txt", TEXT, GNN_INTRO);

        let verdict = detector(&store).check(&target.id.to_string()).await.unwrap();

        assert_eq!(verdict.detailed_results.len(), 1);
        let intro = &verdict.detailed_results[0];
        assert_eq!(intro.section, Section::Introduction);
        assert_eq!(intro.file_id, other.id);
        assert!(intro.similarity_score >= 80.0, "got {}", intro.similarity_score);
        assert_eq!(intro.result, SimilarityLabel::High);

        assert!(verdict.avg_similarity_score >= 80.0);
        assert!(verdict.plagiarised);
        assert!(verdict.deleted);
        assert_eq!(verdict.message, VERDICT_PLAGIARISED_MESSAGE);
        assert!(!store.contains(&target.id));
        assert!(store.contains(&other.id));
    }

    #[tokio::test]
    async fn test_no_shared_sections_is_clean() {
        let store = MockDocumentStore::new();
        store.insert_text(
            "other.txt",
            TEXT,
            "Conclusion:\nBaroque violin repertoire favours gut strings.",
        );
        let target = store.insert_text(
            "target.txt",
            TEXT,
            "Abstract:\nQuantum annealing hardware benchmarks.",
        );

        let verdict = detector(&store).check_id(&target.id).await.unwrap();

        assert!(verdict.detailed_results.is_empty());
        assert_eq!(verdict.avg_similarity_score, 0.0);
        assert!(!verdict.plagiarised);
        assert_eq!(verdict.message, VERDICT_CLEAN_MESSAGE);
        assert!(store.contains(&target.id));
    }

    #[tokio::test]
    async fn test_faulty_corpus_document_is_skipped() {
        let store = MockDocumentStore::new();
        let broken = store.insert_text("broken.txt", TEXT, GNN_INTRO);
        let good = store.insert_text("good.txt", TEXT, GNN_INTRO);
        let target = store.insert_text("target.txt", TEXT, GNN_INTRO);
        store.fail_fetch(broken.id);

        let verdict = detector(&store).check_id(&target.id).await.unwrap();

        assert_eq!(verdict.detailed_results.len(), 1);
        assert_eq!(verdict.detailed_results[0].file_id, good.id);
        assert!(verdict.plagiarised);
    }

    #[tokio::test]
    async fn test_ineligible_corpus_documents_ignored() {
        let store = MockDocumentStore::new();
        store.insert_text("copy.md", "text/markdown", GNN_INTRO);
        let target = store.insert_text("target.txt", TEXT, GNN_INTRO);

        let verdict = detector(&store).check_id(&target.id).await.unwrap();

        assert!(verdict.detailed_results.is_empty());
        assert!(!verdict.plagiarised);
    }

    #[tokio::test]
    async fn test_results_ordered_by_corpus_then_section() {
        let store = MockDocumentStore::new();
        let body = "Abstract:\nSparse attention for long documents.\n\
                    Introduction:\nTransformers struggle with long inputs.\n";
        let b = store.insert_text("b.txt", TEXT, body);
        let c = store.insert_text("c.txt", TEXT, body);
        let target = store.insert_text(
            "t.txt",
            TEXT,
            "Abstract:\nCompiler optimisation passes.\nIntroduction:\nRegister allocation heuristics.\n",
        );

        let verdict = detector(&store)
            .with_threshold(101.0)
            .check_id(&target.id)
            .await
            .unwrap();

        let order: Vec<_> = verdict
            .detailed_results
            .iter()
            .map(|r| (r.file_id, r.section))
            .collect();
        assert_eq!(
            order,
            vec![
                (b.id, Section::Abstract),
                (b.id, Section::Introduction),
                (c.id, Section::Abstract),
                (c.id, Section::Introduction),
            ]
        );
        assert!(verdict.detailed_results.iter().all(|r| r.file_id != target.id));
        assert!((0.0..=100.0).contains(&verdict.avg_similarity_score));
    }

    #[tokio::test]
    async fn test_custom_content_type() {
        let store = MockDocumentStore::new();
        store.insert_text("a.md", "text/markdown", GNN_INTRO);
        let target = store.insert_text("b.md", "text/markdown", GNN_INTRO);

        let verdict = detector(&store)
            .with_eligible_content_type("text/markdown")
            .check_id(&target.id)
            .await
            .unwrap();

        assert_eq!(verdict.detailed_results.len(), 1);
    }

    #[tokio::test]
    async fn test_find_duplicates_by_hash() {
        let store = MockDocumentStore::new();
        let a = store.insert_text("a.txt", TEXT, GNN_INTRO);
        let b = store.insert_text("b.txt", TEXT, GNN_INTRO);
        store.insert_text("c.txt", TEXT, "Abstract:\nSomething else entirely.");
        store.insert_text("d.md", "text/markdown", GNN_INTRO);

        let dups = detector(&store).find_duplicates(&a.id).await.unwrap();
        assert_eq!(dups, vec![b.id]);
    }

    #[tokio::test]
    async fn test_detector_store_is_shared() {
        let store = MockDocumentStore::new();
        let d = detector(&store);
        d.store().put(NewDocument::new("x.txt", TEXT, b"abstract: x".to_vec())).await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_sweep_completes_on_single_worker_runtime() {
        let store = MockDocumentStore::new();
        for i in 0..5 {
            store.insert_text(&format!("earlier-{i}.txt"), TEXT, GNN_INTRO);
        }
        let target = store.insert_text("copy.txt", TEXT, GNN_INTRO);

        let d = detector(&store);
        let check = tokio::spawn(async move { d.check_id(&target.id).await });
        let ping = tokio::spawn(async { tokio::task::yield_now().await });

        ping.await.unwrap();
        let verdict = check.await.unwrap().unwrap();
        assert_eq!(verdict.detailed_results.len(), 5);
        assert!(verdict.plagiarised);
    }
}
