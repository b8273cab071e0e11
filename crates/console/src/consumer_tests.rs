use super::*;
use flagline_core::{generate_task_id_at, TaskIdKind};
use flagline_storage::InMemoryStateStore;
use tempfile::tempdir;

fn write_result(layout: &NasLayout, name: &str, payload: &ResultPayload) {
    let path = layout.results().join(name);
    let body = serde_json::to_vec_pretty(payload).unwrap();
    std::fs::write(path, body).unwrap();
}

#[tokio::test]
async fn job_result_advances_queued_job_to_succeeded() {
    let dir = tempdir().unwrap();
    let layout = NasLayout::new(dir.path());
    layout.ensure_created().unwrap();
    let store = Arc::new(InMemoryStateStore::new());
    let job = store
        .insert_job("job_20260205_215837_a7k2", "acquire_source", "source-42", None)
        .await
        .unwrap();

    let payload = ResultPayload {
        task_id: Some(job.task_id.clone()),
        supervisor_id: None,
        worker_id: None,
        success: true,
        error: None,
        result: Some(serde_json::json!({"bytes": 1024})),
        actions: None,
        completed_at: Utc::now(),
    };
    write_result(&layout, "job_20260205_215837_a7k2.result.json", &payload);

    let consumer = ResultConsumer::new(layout.clone(), store.clone(), CleanupPolicy::Delete);
    let processed = consumer.process_pending_results().await.unwrap();

    assert_eq!(processed.len(), 1);
    assert!(matches!(processed[0].outcome, ResultOutcome::Job { success: true, .. }));
    let updated = store.fetch_one_job_by_task_id(&job.task_id).await.unwrap().unwrap();
    assert_eq!(updated.state, flagline_core::JobState::Succeeded);
    assert!(!layout.results().join("job_20260205_215837_a7k2.result.json").exists());
}

#[tokio::test]
async fn job_result_with_no_matching_row_is_ignored_not_errored() {
    let dir = tempdir().unwrap();
    let layout = NasLayout::new(dir.path());
    layout.ensure_created().unwrap();
    let store = Arc::new(InMemoryStateStore::new());

    let payload = ResultPayload {
        task_id: Some("job_20260205_215837_zzzz".to_string()),
        supervisor_id: None,
        worker_id: None,
        success: true,
        error: None,
        result: None,
        actions: None,
        completed_at: Utc::now(),
    };
    write_result(&layout, "job_20260205_215837_zzzz.result.json", &payload);

    let consumer = ResultConsumer::new(layout, store, CleanupPolicy::Delete);
    let processed = consumer.process_pending_results().await.unwrap();
    assert!(matches!(processed[0].outcome, ResultOutcome::Ignored { .. }));
}

#[tokio::test]
async fn supervisor_result_correlates_each_action_to_its_own_job() {
    let dir = tempdir().unwrap();
    let layout = NasLayout::new(dir.path());
    layout.ensure_created().unwrap();
    let store = Arc::new(InMemoryStateStore::new());
    let pause_job = store
        .insert_job(
            &generate_task_id_at(TaskIdKind::Task, Utc::now()),
            "supervisor_control",
            "pause_watcher:watcher-1",
            None,
        )
        .await
        .unwrap();
    let rollback_job = store
        .insert_job(
            &generate_task_id_at(TaskIdKind::Task, Utc::now()),
            "supervisor_control",
            "rollback_code:watcher-1",
            None,
        )
        .await
        .unwrap();

    let payload = ResultPayload {
        task_id: None,
        supervisor_id: Some(generate_task_id_at(TaskIdKind::Task, Utc::now())),
        worker_id: Some("watcher-1".to_string()),
        success: true,
        error: None,
        result: None,
        actions: Some(vec!["rollback_code".to_string(), "pause_watcher (maintenance)".to_string()]),
        completed_at: Utc::now(),
    };
    write_result(&layout, "sup_pass.result.json", &payload);

    let consumer = ResultConsumer::new(layout, store.clone(), CleanupPolicy::Delete);
    let processed = consumer.process_pending_results().await.unwrap();
    match &processed[0].outcome {
        ResultOutcome::Supervisor { actions_applied, .. } => assert_eq!(*actions_applied, 2),
        other => panic!("expected Supervisor outcome, got {other:?}"),
    }

    let pause_after = store
        .fetch_one_job_by_task_id(&pause_job.task_id)
        .await
        .unwrap()
        .unwrap();
    let rollback_after = store
        .fetch_one_job_by_task_id(&rollback_job.task_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pause_after.state, flagline_core::JobState::Succeeded);
    assert_eq!(rollback_after.state, flagline_core::JobState::Succeeded);
}

#[tokio::test]
async fn malformed_result_file_is_skipped_without_aborting_the_batch() {
    let dir = tempdir().unwrap();
    let layout = NasLayout::new(dir.path());
    layout.ensure_created().unwrap();
    std::fs::write(layout.results().join("broken.result.json"), b"not json").unwrap();
    let store = Arc::new(InMemoryStateStore::new());

    let consumer = ResultConsumer::new(layout, store, CleanupPolicy::Delete);
    let processed = consumer.process_pending_results().await.unwrap();
    assert_eq!(processed.len(), 1);
    assert!(matches!(processed[0].outcome, ResultOutcome::Ignored { .. }));
}

#[tokio::test]
async fn archive_policy_moves_processed_files_instead_of_deleting() {
    let dir = tempdir().unwrap();
    let layout = NasLayout::new(dir.path());
    layout.ensure_created().unwrap();
    let store = Arc::new(InMemoryStateStore::new());
    let job = store
        .insert_job("job_20260205_215837_a7k2", "acquire_source", "source-42", None)
        .await
        .unwrap();
    let payload = ResultPayload {
        task_id: Some(job.task_id.clone()),
        supervisor_id: None,
        worker_id: None,
        success: false,
        error: Some("boom".to_string()),
        result: None,
        actions: None,
        completed_at: Utc::now(),
    };
    write_result(&layout, "job_20260205_215837_a7k2.error.json", &payload);

    let archive_dir = dir.path().join("archive");
    let consumer = ResultConsumer::new(layout.clone(), store.clone(), CleanupPolicy::Archive(archive_dir.clone()));
    consumer.process_pending_results().await.unwrap();

    assert!(!layout.results().join("job_20260205_215837_a7k2.error.json").exists());
    assert!(archive_dir.join("job_20260205_215837_a7k2.error.json").is_file());
    let updated = store.fetch_one_job_by_task_id(&job.task_id).await.unwrap().unwrap();
    assert_eq!(updated.state, flagline_core::JobState::Failed);
    assert_eq!(updated.last_error.as_deref(), Some("boom"));
}
