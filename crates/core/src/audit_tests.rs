use super::*;
use chrono::TimeZone;

#[test]
fn new_populates_all_fields() {
    let ts = Utc.with_ymd_and_hms(2026, 2, 5, 21, 58, 37).unwrap();
    let entry = AuditEntry::new(
        "console",
        "create_job",
        "job",
        "job_20260205_215837_a7k2",
        serde_json::json!({"label": "nightly pull"}),
        ts,
    );
    assert_eq!(entry.actor, "console");
    assert_eq!(entry.action, "create_job");
    assert_eq!(entry.target_type, "job");
    assert_eq!(entry.target_id, "job_20260205_215837_a7k2");
    assert_eq!(entry.ts, ts);
}

#[test]
fn round_trips_through_json() {
    let ts = Utc.with_ymd_and_hms(2026, 2, 5, 21, 58, 37).unwrap();
    let entry = AuditEntry::new("watcher-1", "claim", "task", "task_1", serde_json::json!({}), ts);
    let encoded = serde_json::to_string(&entry).unwrap();
    let decoded: AuditEntry = serde_json::from_str(&encoded).unwrap();
    assert_eq!(entry, decoded);
}
