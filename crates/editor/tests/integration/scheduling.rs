//! Debounce, cancellation, and event loop behavior.

use std::time::Duration;

use glint_editor::{ActiveEditor, DocumentId, EditorId, Event, Settings, Severity};
use pretty_assertions::assert_eq;

use crate::common::*;

const OTHER_EDITOR: EditorId = EditorId(2);
const OTHER_DOC: DocumentId = DocumentId(2);

fn host() -> TestHost {
	TestHost::focused(EDITOR, DOC, 0)
		.with_diagnostics(DOC, vec![diag(2, Severity::Error, "a"), diag(4, Severity::Info, "b")])
		.with_diagnostics(OTHER_DOC, vec![diag(1, Severity::Hint, "c")])
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cursor_burst_coalesces_into_one_render() {
	let mut harness = start(host());
	for line in [1, 2, 3, 4, 2] {
		harness.0.handle(Event::SelectionChanged { editor: EDITOR, line });
		tokio::time::sleep(Duration::from_millis(10)).await;
	}

	assert_eq!(advance_and_pump(&mut harness, Duration::from_millis(50)).await, 1);
	assert_eq!(harness.0.metrics().render_applied_count(), 2);
	assert_eq!(harness.0.render_state().unwrap().cursor_line, 2);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn diagnostics_burst_coalesces_into_one_render() {
	let mut harness = start(host());
	for i in 0..10u32 {
		harness.0.host_mut().diagnostics.insert(DOC, vec![diag(i, Severity::Warning, "moving")]);
		harness.0.handle(Event::DiagnosticsChanged(vec![DOC]));
		tokio::time::sleep(Duration::from_millis(20)).await;
	}

	assert_eq!(harness.0.metrics().render_applied_count(), 1);
	assert_eq!(advance_and_pump(&mut harness, Settings::default().update_debounce()).await, 1);
	assert_eq!(harness.0.metrics().render_applied_count(), 2);
	assert_eq!(harness.0.metrics().aggregation_count(), 11);
	assert_eq!(harness.0.host().painted(EDITOR)[0].line, 9);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn update_debounce_setting_controls_the_delay() {
	let mut harness = start(host());
	harness.0.handle(Event::ConfigurationChanged(Settings {
		update_debounce_ms: 300,
		..Settings::default()
	}));
	let applied = harness.0.metrics().render_applied_count();

	harness.0.host_mut().diagnostics.insert(DOC, vec![diag(7, Severity::Error, "late")]);
	harness.0.handle(Event::DiagnosticsChanged(vec![DOC]));

	assert_eq!(advance_and_pump(&mut harness, Duration::from_millis(150)).await, 0);
	assert_eq!(advance_and_pump(&mut harness, Duration::from_millis(150)).await, 1);
	assert_eq!(harness.0.metrics().render_applied_count(), applied + 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn editor_switch_cancels_pending_and_clears_previous() {
	let mut harness = start(host());
	harness.0.host_mut().diagnostics.insert(DOC, vec![diag(9, Severity::Error, "pending")]);
	harness.0.handle(Event::DiagnosticsChanged(vec![DOC]));
	harness.0.handle(Event::SelectionChanged { editor: EDITOR, line: 4 });
	assert!(harness.0.render_pending());

	harness.0.host_mut().active = Some(ActiveEditor {
		editor: OTHER_EDITOR,
		document: OTHER_DOC,
		cursor_line: 1,
	});
	harness.0.handle(Event::ActiveEditorChanged(Some(OTHER_EDITOR)));
	let old_editor_calls = harness.0.host().calls_for(EDITOR);

	assert!(!harness.0.render_pending());
	assert!(harness.0.host().painted(EDITOR).is_empty());
	assert_eq!(harness.0.host().painted(OTHER_EDITOR)[0].text, "💡 c");

	advance_and_pump(&mut harness, Duration::from_millis(500)).await;
	assert_eq!(harness.0.host().calls_for(EDITOR), old_editor_calls);
	assert_eq!(harness.0.render_state().unwrap().editor, OTHER_EDITOR);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn focus_leaving_all_editors_clears_and_forgets() {
	let mut harness = start(host());
	harness.0.host_mut().active = None;

	harness.0.handle(Event::ActiveEditorChanged(None));

	assert!(harness.0.render_state().is_none());
	assert!(harness.0.host().painted(EDITOR).is_empty());
	assert_eq!(harness.0.metrics().clear_count(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn refresh_event_repaints_unchanged_state() {
	let mut harness = start(host());
	let calls = harness.0.host().set_calls.len();

	harness.0.handle(Event::Refresh);

	assert_eq!(harness.0.host().set_calls.len(), calls + 8);
	assert_eq!(harness.0.metrics().render_skipped_count(), 0);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn run_loop_processes_events_until_shutdown() {
	let (coordinator, rx) = start(host());
	let tx = coordinator.sender();

	let driver = async {
		tx.send(Event::SelectionChanged { editor: EDITOR, line: 4 }).unwrap();
		tokio::time::sleep(Duration::from_millis(200)).await;
		tx.send(Event::Shutdown).unwrap();
	};
	let (coordinator, ()) = tokio::join!(coordinator.run(rx), driver);

	assert!(coordinator.is_disposed());
	assert_eq!(coordinator.metrics().render_applied_count(), 2);
	assert_eq!(coordinator.metrics().clear_count(), 1);
	assert!(tx.send(Event::Refresh).is_err());
}
