//! End-to-end pipeline behavior over a real SQLite store

mod common;

use common::{fixture, unavailable_store_pipeline, TEENCODE};
use vietsent::{HistoryStore, MockModel, PipelineError, Sentiment, ValidationError};

#[tokio::test]
async fn negative_review_is_normalized_classified_and_recorded() {
    let fx = fixture(&[("k", "không")], MockModel::returning("NEG", 0.9));

    let analysis = fx.pipeline.handle(Some("Sản phẩm k tốt lắm")).await.unwrap();

    assert_eq!(analysis.text, "Sản phẩm k tốt lắm");
    assert_eq!(analysis.clean_text, "sản phẩm không tốt lắm");
    assert_eq!(analysis.sentiment, Sentiment::Negative);

    // The classifier sees the normalized text, the store keeps the original
    assert_eq!(fx.model.last_input().as_deref(), Some("sản phẩm không tốt lắm"));
    let records = fx.store.list_recent(10).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text_input, "Sản phẩm k tốt lắm");
    assert_eq!(records[0].sentiment_label, Sentiment::Negative);
}

#[tokio::test]
async fn too_short_text_is_rejected_without_recording() {
    let fx = fixture(TEENCODE, MockModel::returning("POS", 0.99));

    let err = fx.pipeline.handle(Some("ok")).await.unwrap_err();

    assert!(matches!(err, PipelineError::Validation(ValidationError::TooShort)));
    assert_eq!(fx.store.count().unwrap(), 0);
    assert_eq!(fx.model.calls(), 0, "model must not run for rejected input");
}

#[tokio::test]
async fn short_inputs_never_create_records() {
    let fx = fixture(TEENCODE, MockModel::returning("POS", 0.99));

    for text in ["", "    ", "abcd", "  k k ", "\n tốt \t"] {
        let err = fx.pipeline.handle(Some(text)).await.unwrap_err();
        assert!(
            matches!(err, PipelineError::Validation(ValidationError::TooShort)),
            "input {text:?}"
        );
    }
    assert_eq!(fx.store.count().unwrap(), 0);
}

#[tokio::test]
async fn missing_text_is_rejected_without_recording() {
    let fx = fixture(TEENCODE, MockModel::returning("POS", 0.99));

    let err = fx.pipeline.handle(None).await.unwrap_err();

    assert!(matches!(err, PipelineError::Validation(ValidationError::MissingField)));
    assert_eq!(fx.store.count().unwrap(), 0);
}

#[tokio::test]
async fn model_failure_still_records_neutral() {
    let fx = fixture(TEENCODE, MockModel::failing("connection refused"));

    let analysis = fx.pipeline.handle(Some("Giao hàng nhanh, đóng gói kỹ")).await.unwrap();

    assert_eq!(analysis.sentiment, Sentiment::Neutral);
    let records = fx.store.list_recent(10).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sentiment_label, Sentiment::Neutral);
    assert_eq!(records[0].sentiment_label.as_str(), "NEUTRAL");
}

#[tokio::test]
async fn low_confidence_prediction_is_recorded_as_neutral() {
    let fx = fixture(TEENCODE, MockModel::returning("POS", 0.3));

    let analysis = fx.pipeline.handle(Some("Hàng dc, giá hơi cao")).await.unwrap();

    assert_eq!(analysis.clean_text, "hàng dc, giá hơi cao");
    assert_eq!(analysis.sentiment, Sentiment::Neutral);
    assert_eq!(fx.store.list_recent(1).unwrap()[0].sentiment_label, Sentiment::Neutral);
}

#[tokio::test]
async fn every_success_appends_exactly_one_record() {
    let fx = fixture(TEENCODE, MockModel::returning("POS", 0.8));

    for i in 0..5 {
        fx.pipeline.handle(Some(&format!("đánh giá số {i}"))).await.unwrap();
        assert_eq!(fx.store.count().unwrap(), i + 1);
    }

    let history = fx.pipeline.history().await.unwrap();
    let texts: Vec<&str> = history.iter().map(|r| r.text_input.as_str()).collect();
    assert_eq!(texts.first(), Some(&"đánh giá số 4"));
    assert_eq!(texts.last(), Some(&"đánh giá số 0"));
}

#[tokio::test]
async fn history_is_capped_at_limit() {
    let fx = fixture(TEENCODE, MockModel::returning("NEU", 0.9));
    for i in 0..55 {
        fx.store.record(&format!("seeded review {i}"), Sentiment::Neutral).unwrap();
    }

    assert_eq!(fx.pipeline.history_limit(), 50);
    assert_eq!(fx.pipeline.history().await.unwrap().len(), 50);
    assert_eq!(fx.pipeline.recent(3).await.unwrap().len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_each_record_once() {
    let fx = fixture(TEENCODE, MockModel::returning("POS", 0.95));

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..32 {
        let pipeline = fx.pipeline.clone();
        tasks.spawn(async move { pipeline.handle(Some(&format!("sản phẩm tốt {i}"))).await });
    }
    while let Some(result) = tasks.join_next().await {
        assert_eq!(result.unwrap().unwrap().sentiment, Sentiment::Positive);
    }

    assert_eq!(fx.store.count().unwrap(), 32);
    assert_eq!(fx.model.calls(), 32);
}

#[tokio::test]
async fn storage_failure_after_classification_is_an_error() {
    let (pipeline, model) = unavailable_store_pipeline(MockModel::returning("POS", 0.9));

    let err = pipeline.handle(Some("Sản phẩm dùng rất thích")).await.unwrap_err();

    assert!(matches!(err, PipelineError::Storage(_)), "got {err:?}");
    assert_eq!(model.calls(), 1, "classification runs before the write");

    let err = pipeline.history().await.unwrap_err();
    assert!(matches!(err, PipelineError::Storage(_)), "got {err:?}");
}
