use super::*;
use yare::parameterized;

#[parameterized(
    rollback_code = { SupervisorHandler::RollbackCode, 10 },
    update_code_deps = { SupervisorHandler::UpdateCodeDeps, 11 },
    update_code = { SupervisorHandler::UpdateCode, 12 },
    pause_watcher = { SupervisorHandler::PauseWatcher, 20 },
    resume_watcher = { SupervisorHandler::ResumeWatcher, 21 },
    restart_watcher = { SupervisorHandler::RestartWatcher, 22 },
    diagnostics = { SupervisorHandler::Diagnostics, 30 },
    verify_db = { SupervisorHandler::VerifyDb, 31 },
)]
fn priority_matches_table(handler: SupervisorHandler, expected: u32) {
    assert_eq!(handler.priority(), expected);
}

#[test]
fn parses_every_known_supervisor_handler_name() {
    for h in SupervisorHandler::ALL {
        assert_eq!(h.as_str().parse::<SupervisorHandler>().unwrap(), h);
    }
}

#[test]
fn rejects_unknown_supervisor_handler() {
    assert!("reboot_host".parse::<SupervisorHandler>().is_err());
}

#[test]
fn job_handler_round_trips() {
    for h in JobHandler::ALL {
        assert_eq!(h.as_str().parse::<JobHandler>().unwrap(), h);
    }
    assert!("acquire_nonexistent".parse::<JobHandler>().is_err());
}

#[test]
fn handler_display_delegates_to_inner() {
    assert_eq!(
        Handler::Supervisor(SupervisorHandler::Diagnostics).to_string(),
        "diagnostics"
    );
    assert_eq!(
        Handler::Job(JobHandler::AcquireSource).to_string(),
        "acquire_source"
    );
}
