use super::*;
use flagline_adapters::test_support::FakeProcessControl;

fn ctx_with(pid: Option<u32>, params: serde_json::Value, control: Arc<FakeProcessControl>) -> SupervisorContext {
    SupervisorContext {
        task_id: "task_20260205_215837_a7k2".to_string(),
        worker_id: "watcher-1".to_string(),
        params,
        watcher_pid: pid,
        process_control: control,
        dry_run: false,
    }
}

#[tokio::test]
async fn pause_watcher_signals_the_pid() {
    let control = Arc::new(FakeProcessControl::new());
    control.mark_alive(100);
    let registry = default_supervisor_handlers();
    let handler = registry.get("pause_watcher").unwrap();

    let outcome = handler
        .run(&ctx_with(Some(100), serde_json::json!({}), control.clone()))
        .await;

    assert!(outcome.success);
    assert_eq!(
        control.signals_sent(),
        vec![(100, flagline_adapters::ControlSignal::Pause)]
    );
}

#[tokio::test]
async fn pause_watcher_without_known_pid_fails() {
    let control = Arc::new(FakeProcessControl::new());
    let registry = default_supervisor_handlers();
    let handler = registry.get("pause_watcher").unwrap();

    let outcome = handler.run(&ctx_with(None, serde_json::json!({}), control)).await;
    assert!(!outcome.success);
}

#[tokio::test]
async fn restart_watcher_sends_terminate() {
    let control = Arc::new(FakeProcessControl::new());
    control.mark_alive(100);
    let registry = default_supervisor_handlers();
    let handler = registry.get("restart_watcher").unwrap();

    handler
        .run(&ctx_with(Some(100), serde_json::json!({}), control.clone()))
        .await;

    assert_eq!(
        control.signals_sent(),
        vec![(100, flagline_adapters::ControlSignal::Terminate)]
    );
    assert!(!control.is_alive(100));
}

#[tokio::test]
async fn diagnostics_without_command_param_fails_cleanly() {
    let control = Arc::new(FakeProcessControl::new());
    let registry = default_supervisor_handlers();
    let handler = registry.get("diagnostics").unwrap();

    let outcome = handler.run(&ctx_with(None, serde_json::json!({}), control)).await;
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("command"));
}

#[tokio::test]
async fn update_code_runs_the_configured_command() {
    let control = Arc::new(FakeProcessControl::new());
    let registry = default_supervisor_handlers();
    let handler = registry.get("update_code").unwrap();

    let outcome = handler
        .run(&ctx_with(
            None,
            serde_json::json!({"command": "echo ok"}),
            control,
        ))
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.detail["stdout"], "ok\n");
}

#[tokio::test]
async fn failing_command_reports_stderr_as_error() {
    let control = Arc::new(FakeProcessControl::new());
    let registry = default_supervisor_handlers();
    let handler = registry.get("rollback_code").unwrap();

    let outcome = handler
        .run(&ctx_with(
            None,
            serde_json::json!({"command": "false"}),
            control,
        ))
        .await;

    assert!(!outcome.success);
}

#[tokio::test]
async fn dry_run_skips_signaling_but_reports_success() {
    let control = Arc::new(FakeProcessControl::new());
    control.mark_alive(100);
    let registry = default_supervisor_handlers();
    let handler = registry.get("pause_watcher").unwrap();

    let mut ctx = ctx_with(Some(100), serde_json::json!({}), control.clone());
    ctx.dry_run = true;
    let outcome = handler.run(&ctx).await;

    assert!(outcome.success);
    assert!(control.signals_sent().is_empty());
}
