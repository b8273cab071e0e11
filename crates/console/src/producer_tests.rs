use super::*;
use flagline_core::JobState;
use flagline_storage::InMemoryStateStore;
use tempfile::tempdir;

fn producer(layout: NasLayout) -> (FlagProducer, Arc<InMemoryStateStore>) {
    let store = Arc::new(InMemoryStateStore::new());
    (FlagProducer::new(layout, store.clone()), store)
}

#[tokio::test]
async fn create_supervisor_flag_inserts_job_row_and_writes_flag() {
    let dir = tempdir().unwrap();
    let layout = NasLayout::new(dir.path());
    layout.ensure_created().unwrap();
    let (producer, store) = producer(layout.clone());

    let created = producer
        .create_supervisor_flag(
            "operator-1",
            "pause_watcher",
            "watcher-1",
            serde_json::json!({}),
            Some("maintenance"),
        )
        .await
        .unwrap();

    assert!(created.flag_path.is_file());
    let job = store
        .fetch_one_job_by_task_id(&created.task_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.job_type, "supervisor_control");
    assert_eq!(job.target_ref, "pause_watcher:watcher-1");
    assert_eq!(job.state, JobState::Queued);
    assert_eq!(store.audit_entries().len(), 1);
    assert_eq!(store.audit_entries()[0].action, "CREATE_FLAG");
}

#[tokio::test]
async fn create_supervisor_flag_rejects_unknown_handler() {
    let dir = tempdir().unwrap();
    let layout = NasLayout::new(dir.path());
    layout.ensure_created().unwrap();
    let (producer, _store) = producer(layout);

    let err = producer
        .create_supervisor_flag("operator-1", "not_a_handler", "watcher-1", serde_json::json!({}), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)));
}

#[tokio::test]
async fn create_supervisor_flag_rejects_empty_worker_id() {
    let dir = tempdir().unwrap();
    let layout = NasLayout::new(dir.path());
    layout.ensure_created().unwrap();
    let (producer, _store) = producer(layout);

    let err = producer
        .create_supervisor_flag("operator-1", "pause_watcher", "", serde_json::json!({}), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::EmptyWorkerId));
}

#[tokio::test]
async fn create_supervisor_flag_rejects_invalid_label() {
    let dir = tempdir().unwrap();
    let layout = NasLayout::new(dir.path());
    layout.ensure_created().unwrap();
    let (producer, _store) = producer(layout);

    let err = producer
        .create_supervisor_flag(
            "operator-1",
            "pause_watcher",
            "watcher-1",
            serde_json::json!({}),
            Some("bad:label"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)));
}

#[tokio::test]
async fn create_job_flag_uses_params_summary_as_target_ref() {
    let dir = tempdir().unwrap();
    let layout = NasLayout::new(dir.path());
    layout.ensure_created().unwrap();
    let (producer, store) = producer(layout.clone());

    let created = producer
        .create_job_flag("operator-1", "acquire_source", serde_json::json!({"source": "s3://bucket/key"}), None)
        .await
        .unwrap();

    let job = store
        .fetch_one_job_by_task_id(&created.task_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(job.job_type, "acquire_source");
    assert!(job.target_ref.contains("bucket"));
    assert!(created.task_id.starts_with("job_"));
}

#[tokio::test]
async fn create_job_flag_rejects_unknown_handler() {
    let dir = tempdir().unwrap();
    let layout = NasLayout::new(dir.path());
    layout.ensure_created().unwrap();
    let (producer, _store) = producer(layout);

    let err = producer
        .create_job_flag("operator-1", "not_a_job_handler", serde_json::json!({}), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)));
}
