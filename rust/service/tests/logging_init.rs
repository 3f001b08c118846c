use line98_service::try_init_logging_with;

#[test]
fn json_subscriber_installs_once() {
    try_init_logging_with("debug", true).expect("first install");
    tracing::info!(session_id = "s-1", "session created");

    assert!(try_init_logging_with("warn", false).is_err());
}
