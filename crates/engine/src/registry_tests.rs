use super::*;
use flagline_adapters::test_support::FakeProcessControl;
use std::sync::Arc;

fn job_ctx() -> JobContext {
    JobContext {
        task_id: "job_20260205_215837_a7k2".to_string(),
        target_ref: "source-42".to_string(),
        label: None,
        params: serde_json::json!({}),
        dry_run: false,
    }
}

fn supervisor_ctx() -> SupervisorContext {
    SupervisorContext {
        task_id: "task_20260205_215837_a7k2".to_string(),
        worker_id: "watcher-1".to_string(),
        params: serde_json::json!({}),
        watcher_pid: Some(1234),
        process_control: Arc::new(FakeProcessControl::new()),
        dry_run: false,
    }
}

#[tokio::test]
async fn registered_job_handler_is_found_and_runs() {
    let mut registry = JobHandlerRegistry::new();
    registry.register(
        "acquire_source",
        Arc::new(|_ctx: JobContext| async move { HandlerOutcome::ok(serde_json::json!({"ok": true})) }),
    );

    let handler = registry.get("acquire_source").expect("registered");
    let outcome = handler.run(&job_ctx()).await;
    assert!(outcome.success);
}

#[tokio::test]
async fn unregistered_job_handler_returns_none() {
    let registry = JobHandlerRegistry::new();
    assert!(registry.get("acquire_source").is_none());
}

#[tokio::test]
async fn registered_supervisor_handler_sees_its_context() {
    let mut registry = SupervisorHandlerRegistry::new();
    registry.register(
        "pause_watcher",
        Arc::new(|ctx: SupervisorContext| async move {
            if ctx.watcher_pid.is_some() {
                HandlerOutcome::ok(serde_json::json!({}))
            } else {
                HandlerOutcome::failed("no pid")
            }
        }),
    );

    let handler = registry.get("pause_watcher").expect("registered");
    let outcome = handler.run(&supervisor_ctx()).await;
    assert!(outcome.success);
}
