use super::*;
use crate::input::{InputSource, Signal};

#[test]
fn parses_and_orders_entries() {
    let script = InputScript::from_json_str(
        r#"{
            "entries": [
                { "at_ms": 900, "action": { "color_scheme": { "dark": true } } },
                { "at_ms": 100, "action": { "scroll": { "x": 0, "y": 300 } } },
                { "at_ms": 500, "action": { "extent": { "width": 800, "height": 5000 } } }
            ]
        }"#,
    )
    .unwrap();
    let times: Vec<f64> = script.entries.iter().map(|e| e.at_ms).collect();
    assert_eq!(times, vec![100.0, 500.0, 900.0]);
}

#[test]
fn applies_due_entries_once() {
    let mut script = InputScript::new(vec![
        ScriptEntry {
            at_ms: 0.0,
            action: ScriptAction::Scroll { x: 0.0, y: 50.0 },
        },
        ScriptEntry {
            at_ms: 40.0,
            action: ScriptAction::Resize {
                width: 400.0,
                height: 300.0,
            },
        },
    ])
    .unwrap();
    let mut input = ScriptedInput::fitted(Viewport::new(800.0, 600.0));
    input.subscribe(Signal::Scroll);
    input.subscribe(Signal::Resize);

    assert_eq!(script.apply_due(16.0, &mut input), 1);
    assert_eq!(script.apply_due(16.0, &mut input), 0);
    assert!(!script.is_finished());
    assert_eq!(script.apply_due(48.0, &mut input), 1);
    assert!(script.is_finished());

    assert_eq!(input.pending_events(), 2);
    assert_eq!(input.snapshot().viewport, Viewport::new(400.0, 300.0));
}

#[test]
fn rejects_non_finite_times() {
    let err = InputScript::new(vec![ScriptEntry {
        at_ms: f64::INFINITY,
        action: ScriptAction::ColorScheme { dark: false },
    }])
    .unwrap_err();
    assert!(matches!(err, DotFieldError::Validation(_)));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = InputScript::from_json_str(r#"{ "entries": [ { "at_ms": 1 } ] }"#).unwrap_err();
    assert!(matches!(err, DotFieldError::Serde(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = InputScript::from_path("target/does-not-exist/script.json").unwrap_err();
    assert!(matches!(err, DotFieldError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
}
