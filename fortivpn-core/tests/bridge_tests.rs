// Unit tests for bridge envelope decoding and script discovery

use std::io::Write;
use std::sync::Mutex;

use fortivpn_core::bridge::{decode_envelope, find_bridge_script, BRIDGE_ENV};
use fortivpn_core::error::BridgeError;
use fortivpn_core::types::{Connection, ConnectionKind};

// Serializes the tests that mutate the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_decode_clean_envelope() {
    let envelope = decode_envelope(r#"{"ok":true,"result":{"ssl_state":1}}"#).unwrap();
    assert!(envelope.ok);
    let result = envelope.into_result().unwrap();
    assert_eq!(result["ssl_state"], 1);
}

#[test]
fn test_decode_envelope_round_trips_connection_list() {
    let raw = r#"{"ok":true,"result":[{"connection_name":"prod","type":"ssl"}]}"#;
    let result = decode_envelope(raw).unwrap().into_result().unwrap();
    let connections: Vec<Connection> = serde_json::from_value(result).unwrap();
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].name, "prod");
    assert_eq!(connections[0].kind, ConnectionKind::Ssl);
    assert!(!connections[0].is_default);
}

#[test]
fn test_decode_skips_log_noise_before_envelope() {
    let raw = "FortiClient bridge starting\nloaded plugin\n{\"ok\":true,\"result\":null}\n";
    let envelope = decode_envelope(raw).unwrap();
    assert!(envelope.ok);
}

#[test]
fn test_decode_picks_last_json_line() {
    let raw = "{\"ok\":false,\"error\":\"stale\"}\nsome noise\n{\"ok\":true,\"result\":null}";
    let envelope = decode_envelope(raw).unwrap();
    assert!(envelope.ok);
}

#[test]
fn test_decode_falls_back_to_last_brace_substring() {
    let raw = "warning: something happened {\"ok\":true,\"result\":42}";
    let result = decode_envelope(raw).unwrap().into_result().unwrap();
    assert_eq!(result, 42);
}

#[test]
fn test_decode_rejects_garbage() {
    match decode_envelope("not json at all") {
        Err(BridgeError::InvalidResponse { output }) => {
            assert_eq!(output, "not json at all")
        }
        other => panic!("expected InvalidResponse, got {:?}", other),
    }
}

#[test]
fn test_decode_rejects_empty_output() {
    assert!(matches!(
        decode_envelope("   \n  "),
        Err(BridgeError::InvalidResponse { .. })
    ));
}

#[test]
fn test_failed_call_with_blank_error_gets_generic_message() {
    let envelope = decode_envelope(r#"{"ok":false,"error":"  "}"#).unwrap();
    match envelope.into_result() {
        Err(BridgeError::Call { message }) => assert_eq!(message, "bridge call failed"),
        other => panic!("expected Call error, got {:?}", other),
    }
}

#[test]
fn test_failed_call_surfaces_error_message() {
    let envelope = decode_envelope(r#"{"ok":false,"error":"tunnel is busy"}"#).unwrap();
    match envelope.into_result() {
        Err(BridgeError::Call { message }) => assert_eq!(message, "tunnel is busy"),
        other => panic!("expected Call error, got {:?}", other),
    }
}

#[test]
fn test_failed_call_message_is_surfaced_verbatim() {
    let envelope = decode_envelope(r#"{"ok":false,"error":"  tunnel is busy\n"}"#).unwrap();
    match envelope.into_result() {
        Err(BridgeError::Call { message }) => assert_eq!(message, "  tunnel is busy\n"),
        other => panic!("expected Call error, got {:?}", other),
    }
}

#[test]
fn test_missing_result_decodes_to_null() {
    let result = decode_envelope(r#"{"ok":true}"#).unwrap().into_result().unwrap();
    assert!(result.is_null());
}

#[test]
fn test_env_override_locates_bridge_script() {
    let _guard = ENV_LOCK.lock().unwrap();

    let mut script = tempfile::NamedTempFile::new().unwrap();
    writeln!(script, "// bridge stub").unwrap();
    std::env::set_var(BRIDGE_ENV, script.path());

    let found = find_bridge_script().unwrap();
    assert_eq!(found, script.path());

    std::env::remove_var(BRIDGE_ENV);
}

#[test]
fn test_env_override_pointing_at_missing_file_is_skipped() {
    let _guard = ENV_LOCK.lock().unwrap();

    let dir = tempfile::tempdir().unwrap();
    std::env::set_var(BRIDGE_ENV, dir.path().join("missing.js"));

    // Neither the override nor the executable/cwd fallbacks exist here, so
    // discovery reports the script as not found.
    let result = find_bridge_script();
    std::env::remove_var(BRIDGE_ENV);

    assert!(matches!(result, Err(BridgeError::ScriptNotFound)));
}
