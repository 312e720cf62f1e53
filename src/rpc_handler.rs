//! RPC method handler for the MiniArc JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! Every call that may change the session answers with the current
//! [`ShellSnapshot`](crate::types::session::ShellSnapshot) and the host
//! commands queued while handling it.

use std::sync::Mutex;

use crate::app::App;
use crate::managers::history_manager::HistoryManagerTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::content::ContentHandle;
use crate::types::intent::Intent;

use serde_json::{json, Value};

/// Snapshot plus drained host commands.
fn state_response(app: &mut App) -> Result<Value, String> {
    let state = serde_json::to_value(app.session.snapshot()).map_err(|e| e.to_string())?;
    let commands = app.session.host_mut().drain_commands();
    let commands = serde_json::to_value(commands).map_err(|e| e.to_string())?;
    Ok(json!({"state": state, "commands": commands}))
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// A rejected intent is not an RPC error: the response carries the state
/// and an `error` field.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Session ───
        "session.dispatch" => {
            let intent: Intent = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid intent: {}", e))?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a.dispatch(intent);
            let mut response = state_response(&mut a)?;
            if let Err(e) = outcome {
                response["error"] = json!(e.to_string());
            }
            Ok(response)
        }
        "session.state" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            state_response(&mut a)
        }
        "content.response" => {
            let session = params
                .get("session")
                .and_then(|v| v.as_u64())
                .ok_or("missing session")?;
            let status = params
                .get("status")
                .and_then(|v| v.as_u64())
                .and_then(|v| u16::try_from(v).ok())
                .ok_or("missing status")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let decision = a.session.on_response_received(ContentHandle(session), status);
            Ok(json!({"decision": decision}))
        }

        // ─── History ───
        "history.search" => {
            let query = params.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let a = app.lock().map_err(|e| e.to_string())?;
            let entries = a.session.history().search_history(query);
            serde_json::to_value(entries).map_err(|e| e.to_string())
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let settings = a.settings_engine.get_settings();
            serde_json::to_value(settings).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.update_setting(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
