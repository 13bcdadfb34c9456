use super::*;

const TS: &str = "2026-10-16T12:00:00.000Z";

#[test]
fn new_transcript_opens_with_greeting() {
    let state = PlaygroundState::new(TS);
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].sender, Sender::Alith);
    assert_eq!(state.messages[0].content, GREETING);
    assert!(!state.loading);
}

#[test]
fn blank_input_is_not_sent() {
    let mut state = PlaygroundState::new(TS);
    state.input = "   ".to_owned();
    assert!(!state.can_send());
    assert_eq!(state.begin_query(TS), None);
    assert_eq!(state.messages.len(), 1);
}

#[test]
fn begin_query_moves_input_into_transcript() {
    let mut state = PlaygroundState::new(TS);
    state.input = "find a cheap translator".to_owned();
    let req = state.begin_query(TS).unwrap();
    assert_eq!(req.query, "find a cheap translator");
    assert_eq!(req.context, "playground");
    assert_eq!(req.timestamp, TS);
    assert!(state.input.is_empty());
    assert!(state.loading);
    assert_eq!(state.messages.last().map(|m| m.sender), Some(Sender::User));
}

#[test]
fn begin_query_refused_while_loading() {
    let mut state = PlaygroundState::new(TS);
    state.input = "one".to_owned();
    let _ = state.begin_query(TS);
    state.input = "two".to_owned();
    assert_eq!(state.begin_query(TS), None);
    assert_eq!(state.input, "two");
}

#[test]
fn finish_query_appends_reply() {
    let mut state = PlaygroundState::new(TS);
    state.input = "hi".to_owned();
    let _ = state.begin_query(TS);
    state.finish_query(Ok(AlithQueryResponse { response: Some("Hi there".to_owned()) }), TS);
    assert!(!state.loading);
    assert_eq!(state.messages.last().map(|m| m.content.as_str()), Some("Hi there"));
}

#[test]
fn finish_query_without_text_uses_fallback() {
    let mut state = PlaygroundState::new(TS);
    state.finish_query(Ok(AlithQueryResponse::default()), TS);
    assert_eq!(state.messages.last().map(|m| m.content.as_str()), Some(UNPROCESSED_REPLY));
}

#[test]
fn finish_query_failure_appends_apology() {
    let mut state = PlaygroundState::new(TS);
    state.loading = true;
    state.finish_query(Err(ApiError::from_status(500, "alith query")), TS);
    assert!(!state.loading);
    assert_eq!(state.messages.last().map(|m| m.content.as_str()), Some(QUERY_FAILED_REPLY));
}

#[test]
fn execute_success_reports_result() {
    let mut state = PlaygroundState::new(TS);
    let req = state.begin_execute("svc-1").unwrap();
    assert_eq!(req.service_id, "svc-1");
    assert_eq!(req.parameters, serde_json::json!({}));
    state.finish_execute(Ok(AlithExecuteResponse { result: Some("42".to_owned()) }), TS);
    assert_eq!(
        state.messages.last().map(|m| m.content.as_str()),
        Some("Service executed successfully: 42")
    );
}

#[test]
fn execute_without_result_says_completed() {
    let mut state = PlaygroundState::new(TS);
    let _ = state.begin_execute("svc-1");
    state.finish_execute(Ok(AlithExecuteResponse::default()), TS);
    assert_eq!(
        state.messages.last().map(|m| m.content.as_str()),
        Some("Service executed successfully: Service completed")
    );
}

#[test]
fn execute_failure_is_reported_inline() {
    let mut state = PlaygroundState::new(TS);
    let _ = state.begin_execute("svc-1");
    state.finish_execute(Err(ApiError::NotFound), TS);
    assert!(!state.loading);
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.error.as_deref(), Some("Service execution failed: Service not found"));
}

#[test]
fn send_key_is_plain_enter() {
    assert!(is_send_key("Enter", false));
    assert!(!is_send_key("Enter", true));
    assert!(!is_send_key("a", false));
}

#[test]
fn message_ids_are_unique() {
    let mut state = PlaygroundState::new(TS);
    state.input = "x".to_owned();
    let _ = state.begin_query(TS);
    assert_ne!(state.messages[0].id, state.messages[1].id);
}
