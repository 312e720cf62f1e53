//! MiniArc RPC server: JSON-RPC over stdin/stdout for a native UI shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"session.dispatch", "params":{"type":"submit_text","text":"..."}}
//! Response: {"id":1, "result":{"state":{...},"commands":[...]}} or {"id":1, "error":"..."}
//!
//! `MINIARC_CONFIG` overrides the settings file path.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use miniarc::app::{configured_log_level, App};
use miniarc::rpc_handler::handle_method;

use serde_json::{json, Value};

fn respond(out: &mut impl Write, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", value)?;
    out.flush()
}

fn main() -> io::Result<()> {
    let config_path = std::env::var("MINIARC_CONFIG").ok();

    // App::new already logs; the logger has to exist first.
    let level = configured_log_level(config_path.clone());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();

    let app = App::new(config_path).unwrap_or_else(|e| {
        log::error!("failed to initialize MiniArc: {}", e);
        eprintln!("Failed to initialize MiniArc: {}", e);
        std::process::exit(1);
    });
    log::info!("miniarc-rpc {} ready", env!("CARGO_PKG_VERSION"));

    let app = Mutex::new(app);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    respond(&mut out, &json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}))?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(&mut out, &json!({"id":null,"error":format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                log::debug!("{} failed: {}", method, err);
                json!({"id": id, "error": err})
            }
        };
        respond(&mut out, &response)?;
    }

    log::info!("stdin closed, shutting down");
    Ok(())
}
