use sdnrag_ai::embeddings::Embedder;
use sdnrag_ai::index::{IndexBuildInput, VectorIndex};
use sdnrag_core::domain::{AttackCategory, EvidenceMeta, EvidenceUnit, Plane, SourceKind};
use sdnrag_core::error::AppError;

/// Two-dimensional embedding counting 'a' and 'b' occurrences; deterministic
/// and cheap, good enough to exercise ranking.
struct CountAbEmbedder;

impl Embedder for CountAbEmbedder {
    fn embed(&self, _model: &str, input: &str) -> Result<Vec<f32>, AppError> {
        let a = input.matches('a').count() as f32;
        let b = input.matches('b').count() as f32;
        Ok(vec![a, b])
    }
}

fn unit(content: &str) -> EvidenceUnit {
    EvidenceUnit {
        content: content.to_string(),
        meta: EvidenceMeta {
            attack: AttackCategory::Dos,
            plane: Plane::Control,
            source: SourceKind::ControllerLog,
        },
    }
}

fn build_input() -> IndexBuildInput {
    IndexBuildInput {
        model: "mock".to_string(),
        updated_at: "2026-08-07T00:00:00Z".to_string(),
    }
}

#[test]
fn build_persists_records_and_status() {
    let dir = tempfile::tempdir().expect("tempdir");
    let index = VectorIndex::open(dir.path().to_path_buf(), "attack_knowledge".to_string(), 5);

    let status = index
        .build(&[unit("aaa"), unit("bbb")], &CountAbEmbedder, build_input())
        .expect("build");
    assert!(status.ready);
    assert_eq!(status.dims, Some(2));
    assert_eq!(status.record_count, 2);
    assert_eq!(status.updated_at.as_deref(), Some("2026-08-07T00:00:00Z"));

    // Visible through a fresh handle on the same collection.
    let reopened = VectorIndex::open(dir.path().to_path_buf(), "attack_knowledge".to_string(), 5);
    let status = reopened.status().expect("status");
    assert!(status.ready);
    assert_eq!(status.record_count, 2);
}

#[test]
fn rebuild_replaces_prior_collection_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let index = VectorIndex::open(dir.path().to_path_buf(), "attack_knowledge".to_string(), 10);

    index
        .build(
            &[unit("aaa"), unit("aab"), unit("abb")],
            &CountAbEmbedder,
            build_input(),
        )
        .expect("first build");
    index
        .build(&[unit("bbb")], &CountAbEmbedder, build_input())
        .expect("rebuild");

    let hits = index.retrieve(&CountAbEmbedder, "b").expect("retrieve");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].content, "bbb");
}

#[test]
fn zero_units_refuse_to_build() {
    let dir = tempfile::tempdir().expect("tempdir");
    let index = VectorIndex::open(dir.path().to_path_buf(), "attack_knowledge".to_string(), 5);
    let err = index
        .build(&[], &CountAbEmbedder, build_input())
        .expect_err("should error");
    assert_eq!(err.code, "INDEX_EMPTY_CORPUS");
}

#[test]
fn inconsistent_embedding_dims_fail_the_build() {
    struct RaggedEmbedder;
    impl Embedder for RaggedEmbedder {
        fn embed(&self, _model: &str, input: &str) -> Result<Vec<f32>, AppError> {
            Ok(vec![1.0; input.len() % 2 + 1])
        }
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let index = VectorIndex::open(dir.path().to_path_buf(), "attack_knowledge".to_string(), 5);
    let err = index
        .build(&[unit("a"), unit("ab")], &RaggedEmbedder, build_input())
        .expect_err("should error");
    assert_eq!(err.code, "INDEX_BUILD_FAILED");
}

#[test]
fn embedder_failure_aborts_build_without_persisting() {
    struct FailingEmbedder;
    impl Embedder for FailingEmbedder {
        fn embed(&self, _model: &str, _input: &str) -> Result<Vec<f32>, AppError> {
            Err(AppError::new("EMBEDDINGS_FAILED", "endpoint down").with_retryable(true))
        }
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let index = VectorIndex::open(dir.path().to_path_buf(), "attack_knowledge".to_string(), 5);
    let err = index
        .build(&[unit("aaa")], &FailingEmbedder, build_input())
        .expect_err("should error");
    assert_eq!(err.code, "INDEX_BUILD_FAILED");
    assert!(err.retryable);

    let status = index.status().expect("status");
    assert!(!status.ready);
}
