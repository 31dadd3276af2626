use crate::data::import::{ImportError, ImportMode};
use crate::data::session::Session;
use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(method: &str, path: &str, body: &str, session: &mut Session) -> HttpResponse {
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/catalog") => match api::catalog_payload() {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/configs") => match api::configs_payload(session) {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/configs") => match api::save_payload(session, body) {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(400, "Bad Request", &err.to_string()),
        },
        ("POST", "/api/reset") => ok_json(api::reset_payload(session)),
        ("GET", "/api/equipped") => match api::equipped_payload(session) {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/equip") => match api::equip_payload(session, body) {
            Ok(payload) => ok_json(payload),
            Err(err @ api::EquipPayloadError::UnknownId) => {
                error_response(404, "Not Found", &err.to_string())
            }
            Err(err) => error_response(400, "Bad Request", &err.to_string()),
        },
        ("POST", "/api/equipped/clear") => ok_json(api::clear_equipped_payload(session)),
        ("GET", "/api/export") => match api::export_payload(session) {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("DELETE", path) if path.starts_with("/api/configs/") => {
            let id = percent_decode(path.trim_start_matches("/api/configs/"));
            match api::delete_payload(session, &id) {
                Ok(payload) => ok_json(payload),
                Err(err) => error_response(404, "Not Found", &err.to_string()),
            }
        }
        ("DELETE", path) if path.starts_with("/api/equipped/") => {
            let part = path.trim_start_matches("/api/equipped/");
            match api::unequip_payload(session, part) {
                Ok(payload) => ok_json(payload),
                Err(err) => error_response(404, "Not Found", &err.to_string()),
            }
        }
        ("POST", path) if path_without_query(path) == "/api/import" => {
            let Some(mode) = import_mode_from_path(path) else {
                return error_response(400, "Bad Request", "mode must be 'merge' or 'replace'");
            };
            match api::import_payload(session, body, mode) {
                Ok(payload) => ok_json(payload),
                Err(err @ ImportError::Parse(_))
                | Err(err @ ImportError::MissingConfigs)
                | Err(err @ ImportError::NoValidItems) => {
                    error_response(400, "Bad Request", &err.to_string())
                }
                Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
            }
        }
        _ => error_response(404, "Not Found", "no such endpoint"),
    }
}

fn ok_json(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn path_without_query(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

/// Import mode from the query string; merge when absent, `None` for an
/// unrecognized value.
fn import_mode_from_path(path: &str) -> Option<ImportMode> {
    let query = path.split('?').nth(1).unwrap_or("");
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("mode=") {
            return ImportMode::parse(value.trim());
        }
    }
    Some(ImportMode::Merge)
}

/// Minimal %XX decoding for path segments. Configuration ids contain `|`,
/// which browsers send percent-encoded.
fn percent_decode(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' && index + 2 < bytes.len() {
            let byte = std::str::from_utf8(&bytes[index + 1..index + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = byte {
                out.push(byte);
                index += 3;
                continue;
            }
        }
        out.push(bytes[index]);
        index += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Gearsmith API Console</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 900px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    code { background: #f4f4f4; padding: 2px 5px; border-radius: 4px; }
    li { margin: 6px 0; }
  </style>
</head>
<body>
  <h1>Gearsmith Local API</h1>
  <p>Armor-effect authoring backend. The editor UI talks to these endpoints:</p>
  <ul>
    <li><code>GET /api/health</code> - service status</li>
    <li><code>GET /api/catalog</code> - tag sets, availability matrix, effect pool</li>
    <li><code>GET /api/configs</code> - saved configurations in canonical order</li>
    <li><code>POST /api/configs</code> - save a draft (body: configuration JSON)</li>
    <li><code>DELETE /api/configs/{id}</code> - delete one configuration</li>
    <li><code>POST /api/reset</code> - clear everything</li>
    <li><code>GET /api/equipped</code> - resolved slots + aggregated effects</li>
    <li><code>POST /api/equip</code> - equip by id (body: <code>{"id": ...}</code>)</li>
    <li><code>DELETE /api/equipped/{part}</code> - unequip one part</li>
    <li><code>POST /api/equipped/clear</code> - unequip all</li>
    <li><code>POST /api/import?mode=merge|replace</code> - import a document</li>
    <li><code>GET /api/export</code> - export document</li>
  </ul>
</body>
</html>"#
        .to_string()
}
