use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};

use crate::data::session::{load_session, save_session, Session};

pub mod api;
pub mod routes;

/// Hard cap on a single request, generous enough for large import files.
const MAX_REQUEST_BYTES: usize = 8 * 1024 * 1024;

/// Run the API server. Connections are handled sequentially on this thread;
/// the in-memory session is the source of truth, with a best-effort snapshot
/// write after every mutating request.
pub fn run_server(bind_addr: &str, session_path: &str) -> io::Result<()> {
    let mut session = load_session(session_path);
    let listener = TcpListener::bind(bind_addr)?;
    println!("gearsmith server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, &mut session, session_path) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(
    stream: &mut TcpStream,
    session: &mut Session,
    session_path: &str,
) -> io::Result<()> {
    let Some(request) = read_request(stream)? else {
        return Ok(());
    };

    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let body = request
        .split("\r\n\r\n")
        .nth(1)
        .or_else(|| request.split("\n\n").nth(1))
        .unwrap_or("");

    let response = routes::route_request(method, path, body, session).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;

    if method != "GET" {
        save_session(session_path, session);
    }
    Ok(())
}

/// Read a full request: headers, then as many bytes as Content-Length
/// announces. Returns `None` for an empty or oversized connection.
fn read_request(stream: &mut TcpStream) -> io::Result<Option<String>> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = [0_u8; 16_384];

    let header_end = loop {
        let bytes_read = stream.read(&mut chunk)?;
        if bytes_read == 0 {
            if buffer.is_empty() {
                return Ok(None);
            }
            break buffer.len();
        }
        buffer.extend_from_slice(&chunk[..bytes_read]);
        if let Some(end) = find_header_end(&buffer) {
            break end;
        }
        if buffer.len() > MAX_REQUEST_BYTES {
            return Ok(None);
        }
    };

    let headers = String::from_utf8_lossy(&buffer[..header_end]);
    let body_length = content_length(&headers).unwrap_or(0).min(MAX_REQUEST_BYTES);
    let expected = header_end + body_length;
    while buffer.len() < expected {
        let bytes_read = stream.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..bytes_read]);
    }

    Ok(Some(String::from_utf8_lossy(&buffer).into_owned()))
}

/// Offset just past the header/body separator, if the headers are complete.
fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
        .or_else(|| {
            buffer
                .windows(2)
                .position(|window| window == b"\n\n")
                .map(|pos| pos + 2)
        })
}

fn content_length(headers: &str) -> Option<usize> {
    headers.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}
