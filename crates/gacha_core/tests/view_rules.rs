use gacha_core::{
    update, AppState, Effect, LogLevel, Msg, ScanOutcome, ScanState, StatusTone,
    EMPTY_LOG_PLACEHOLDER, START_LABEL, START_LABEL_BUSY,
};

fn started() -> (AppState, u64) {
    let (state, effects) = update(AppState::new(), Msg::ScanClicked);
    match effects.as_slice() {
        [Effect::RequestScan { scan_id }] => (state, *scan_id),
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn idle_view_shows_placeholder_and_enabled_start() {
    let view = AppState::new().view();

    assert_eq!(view.scan, ScanState::Idle);
    assert_eq!(view.start_label, START_LABEL);
    assert!(view.start_enabled);
    assert_eq!(view.placeholder, Some(EMPTY_LOG_PLACEHOLDER));
    assert_eq!(view.status.tone, StatusTone::Neutral);
    assert!(!view.dirty);
}

#[test]
fn scanning_disables_start() {
    let (state, _) = started();
    let view = state.view();

    assert!(!view.start_enabled);
    assert_eq!(view.start_label, START_LABEL_BUSY);
    assert_eq!(view.status.tone, StatusTone::Busy);
    assert!(view.dirty);
}

#[test]
fn success_view_exposes_url() {
    let (state, scan_id) = started();
    let (state, _) = update(
        state,
        Msg::ScanResolved {
            scan_id,
            outcome: ScanOutcome::Found("https://example.com/gacha?x=1".to_string()),
        },
    );
    let view = state.view();

    assert!(view.start_enabled);
    assert_eq!(view.status.tone, StatusTone::Success);
    assert_eq!(view.status.text, "✓ 链接已复制");
    assert_eq!(
        view.status.url.as_deref(),
        Some("https://example.com/gacha?x=1")
    );
    assert_eq!(view.placeholder, Some(EMPTY_LOG_PLACEHOLDER));
}

#[test]
fn failure_view_returns_to_ready_and_lists_explanation() {
    let (state, scan_id) = started();
    let (state, _) = update(
        state,
        Msg::ScanResolved {
            scan_id,
            outcome: ScanOutcome::Failed("network unreachable".to_string()),
        },
    );
    let view = state.view();

    assert!(view.start_enabled);
    assert_eq!(view.status.tone, StatusTone::Neutral);
    assert_eq!(view.status.url, None);
    assert_eq!(view.placeholder, None);
    assert_eq!(view.logs.len(), 1);
    assert_eq!(view.logs[0].level, LogLevel::Error);
}

#[test]
fn log_rows_carry_their_level() {
    let (state, _) = started();
    let state = ["✅ ok", "⚠️ old", "plain"]
        .into_iter()
        .fold(state, |state, msg| {
            update(state, Msg::LogReceived(msg.to_string())).0
        });

    let levels: Vec<_> = state.view().logs.iter().map(|line| line.level).collect();
    assert_eq!(
        levels,
        vec![LogLevel::Success, LogLevel::Warning, LogLevel::Info]
    );
}
