//! End-to-end rendering behavior as seen by the user.

use std::time::Duration;

use glint_editor::{DecorationKind, EditorId, Event, Settings, Severity};
use pretty_assertions::assert_eq;

use crate::common::*;

fn two_identical_lines() -> TestHost {
	TestHost::focused(EDITOR, DOC, 5).with_diagnostics(
		DOC,
		vec![
			diag(5, Severity::Error, "expected `u32`, found `&str`"),
			diag(6, Severity::Error, "expected `u32`, found `&str`"),
		],
	)
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cursor_move_swaps_expanded_and_compact_in_one_render() {
	let mut harness = start(two_identical_lines());
	let painted = harness.0.host().painted(EDITOR);
	assert_eq!(painted[0].kind, DecorationKind::Expanded);
	assert_eq!(painted[1].kind, DecorationKind::Compact);

	let calls_before = harness.0.host().calls_for(EDITOR);
	harness.0.handle(Event::SelectionChanged { editor: EDITOR, line: 6 });
	assert_eq!(advance_and_pump(&mut harness, Duration::from_millis(50)).await, 1);

	let (coordinator, _) = &harness;
	assert_eq!(coordinator.metrics().render_applied_count(), 2);
	assert_eq!(coordinator.host().calls_for(EDITOR) - calls_before, 8);
	assert_eq!(
		coordinator.host().painted(EDITOR),
		[
			Painted {
				line: 5,
				kind: DecorationKind::Compact,
				severity: Severity::Error,
				text: "●".into(),
			},
			Painted {
				line: 6,
				kind: DecorationKind::Expanded,
				severity: Severity::Error,
				text: "✖ expected `u32`, found `&str`".into(),
			},
		]
	);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn toggle_off_clears_exactly_once_and_stays_quiet() {
	let mut harness = start(two_identical_lines());
	assert_eq!(harness.0.host().painted(EDITOR).len(), 2);

	harness.0.handle(Event::Toggle);
	let calls_after_clear = harness.0.host().set_calls.len();
	assert!(harness.0.host().painted(EDITOR).is_empty());
	assert_eq!(harness.0.metrics().clear_count(), 1);

	// the host echoes the persisted value back as a settings change
	let echoed = harness.0.settings().clone();
	assert!(!echoed.enabled);
	harness.0.handle(Event::ConfigurationChanged(echoed));
	harness.0.handle(Event::DiagnosticsChanged(vec![DOC]));
	harness.0.handle(Event::SelectionChanged { editor: EDITOR, line: 6 });
	harness.0.handle(Event::ActiveEditorChanged(Some(EditorId(2))));
	advance_and_pump(&mut harness, Duration::from_millis(500)).await;

	assert_eq!(harness.0.host().set_calls.len(), calls_after_clear);
	assert_eq!(harness.0.metrics().clear_count(), 1);

	harness.0.handle(Event::Toggle);
	assert_eq!(harness.0.host().painted(EDITOR).len(), 2);
	let notices: Vec<_> = harness.0.host().notices.iter().map(|(_, m)| m.as_str()).collect();
	assert_eq!(notices, ["Inline diagnostics disabled", "Inline diagnostics enabled"]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn disabling_through_settings_clears_once() {
	let mut harness = start(two_identical_lines());
	let disabled = Settings {
		enabled: false,
		..Settings::default()
	};

	harness.0.handle(Event::ConfigurationChanged(disabled.clone()));
	harness.0.handle(Event::ConfigurationChanged(disabled));
	advance_and_pump(&mut harness, Duration::from_millis(200)).await;

	assert_eq!(harness.0.metrics().clear_count(), 1);
	assert!(harness.0.render_state().is_none());
	assert!(harness.0.store().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn compact_mode_off_shows_only_cursor_line() {
	let mut harness = start(two_identical_lines());

	harness.0.handle(Event::ConfigurationChanged(Settings {
		compact_mode: false,
		..Settings::default()
	}));

	let painted = harness.0.host().painted(EDITOR);
	assert_eq!(painted.len(), 1);
	assert_eq!(painted[0].line, 5);
	assert_eq!(painted[0].kind, DecorationKind::Expanded);
	assert_eq!(advance_and_pump(&mut harness, Duration::from_millis(200)).await, 0);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn vanished_diagnostics_disappear_from_the_editor() {
	let mut harness = start(two_identical_lines());
	harness.0.host_mut().diagnostics.insert(DOC, vec![diag(6, Severity::Warning, "still here")]);

	harness.0.handle(Event::DiagnosticsChanged(vec![DOC]));
	advance_and_pump(&mut harness, Settings::default().update_debounce()).await;

	let painted = harness.0.host().painted(EDITOR);
	assert_eq!(painted.len(), 1);
	assert_eq!(painted[0].line, 6);
	assert_eq!(painted[0].text, "●");
	assert!(harness.0.store().line(DOC, 5).is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn overflowing_line_shows_count_and_merged_message() {
	let diagnostics = (0..5).map(|i| diag(3, Severity::Warning, &format!("warning {i}"))).collect();
	let host = TestHost::focused(EDITOR, DOC, 0).with_diagnostics(DOC, diagnostics);
	let mut harness = start(host);
	assert_eq!(harness.0.host().painted(EDITOR)[0].text, "●●● +2");

	harness.0.handle(Event::SelectionChanged { editor: EDITOR, line: 3 });
	advance_and_pump(&mut harness, Duration::from_millis(50)).await;

	assert_eq!(
		harness.0.host().painted(EDITOR)[0].text,
		"⚠ warning 0 | warning 1 | warning 2 | warning 3 | warning 4"
	);
}
