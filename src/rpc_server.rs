//! Docmark RPC Server — JSON-RPC over stdin/stdout.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.create", "params":{"user":"bob","bookmark":{...}}}
//! Response: {"id":1, "status":201, "result":{...}} or {"id":1, "status":400, "error":"..."}
//!
//! Logs go to stderr; stdout carries protocol frames only.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::time::Instant;

use docmark::app::App;
use docmark::rpc_handler::handle_method;
use docmark::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

use serde_json::{json, Value};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Simple rate limiter: max requests per one-second window.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_env("DOCMARK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn emit(out: &mut impl Write, frame: &Value) -> io::Result<()> {
    writeln!(out, "{}", frame)?;
    out.flush()
}

fn main() {
    let mut settings_engine = SettingsEngine::new(None);
    // Settings are loaded before logging starts so the filter can come from them.
    let load_result = settings_engine.load();
    init_tracing(&settings_engine.get_settings().log_filter);
    if let Err(e) = load_result {
        error!(subsystem = "rpc", error = %e, "Failed to load settings");
        std::process::exit(1);
    }
    let rate_limit = settings_engine.get_settings().rate_limit_per_second;

    // `App::new` reuses the settings loaded above.

    let app = match App::new(settings_engine) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            error!(subsystem = "rpc", error = %e, "Failed to initialize Docmark");
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let ready = json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")});
    if emit(&mut out, &ready).is_err() {
        return;
    }

    let mut rate_limiter = RateLimiter::new(rate_limit);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Err(e) => json!({"id": null, "status": 400, "error": format!("parse error: {}", e)}),
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                if !rate_limiter.check() {
                    warn!(subsystem = "rpc", "Rate limit exceeded");
                    json!({"id": id, "status": 429, "error": "rate limit exceeded"})
                } else {
                    let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                    let params = req.get("params").cloned().unwrap_or(json!({}));
                    match handle_method(&app, method, &params) {
                        Ok(reply) => match reply.body {
                            Some(body) => json!({"id": id, "status": reply.status, "result": body}),
                            None => json!({"id": id, "status": reply.status}),
                        },
                        Err(failure) => json!({"id": id, "status": failure.status, "error": failure.message}),
                    }
                }
            }
        };

        if emit(&mut out, &response).is_err() {
            break;
        }
    }
}
