//! Static file handling for the serve loop

use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::microserver::{self, HttpRequest, HttpResponse};

/// Content type for a file, by extension
pub(super) fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") | Some("map") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        _ => "application/octet-stream",
    }
}

/// Decode `%XX` escapes. Returns None on malformed escapes or non-UTF-8.
fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = input.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Map a request path onto a file below `root`.
///
/// Query strings and fragments are ignored. Returns None when the path is
/// malformed or would leave `root`.
pub(super) fn resolve_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let path = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let decoded = percent_decode(path)?;

    let mut resolved = root.to_path_buf();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if resolved.is_dir() {
        resolved.push("index.html");
    }
    Some(resolved)
}

/// Produce the response for one request
pub(super) fn handle_request(request: &HttpRequest, root: &Path) -> HttpResponse {
    if request.method != "GET" && request.method != "HEAD" {
        return HttpResponse::status_only(405).with_header("Allow", "GET, HEAD");
    }

    let Some(path) = resolve_path(root, &request.path) else {
        return HttpResponse::status_only(403);
    };

    match fs::read(&path) {
        Ok(body) => HttpResponse::new(200, content_type(&path), body),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => HttpResponse::status_only(404),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read file");
            HttpResponse::status_only(500)
        }
    }
}

fn handle_connection(stream: &mut (impl Read + Write), root: &Path) {
    let request = match microserver::read_request(stream) {
        Some(Ok(request)) => request,
        Some(Err(msg)) => {
            tracing::debug!(error = %msg, "bad request");
            microserver::write_response(stream, &HttpResponse::status_only(400), true);
            return;
        }
        None => return,
    };

    let response = handle_request(&request, root);
    tracing::debug!(
        method = %request.method,
        path = %request.path,
        host = request.header("Host").unwrap_or("-"),
        status = response.status,
        "served"
    );
    microserver::write_response(stream, &response, request.method != "HEAD");
}

/// Accept loop: one thread per connection, runs until the listener fails.
pub(super) fn accept_loop(listener: TcpListener, root: Arc<PathBuf>) {
    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                let root = Arc::clone(&root);
                std::thread::spawn(move || {
                    handle_connection(&mut stream, &root);
                    let _ = stream.shutdown(Shutdown::Write);
                });
            }
            Err(e) => tracing::warn!(error = %e, "accept error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("libs")).unwrap();
        fs::write(temp.path().join("index.html"), "<html></html>").unwrap();
        fs::write(temp.path().join("libs/ol.js"), "var ol;").unwrap();
        temp
    }

    fn get(path: &str) -> HttpRequest {
        HttpRequest {
            method: "GET".to_string(),
            path: path.to_string(),
            headers: Vec::new(),
        }
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(
            content_type(Path::new("libs/ol.js")),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(content_type(Path::new("libs/OL.CSS")), "text/css; charset=utf-8");
        assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
    }

    #[test]
    fn test_resolve_root_to_index() {
        let temp = site();
        assert_eq!(
            resolve_path(temp.path(), "/").unwrap(),
            temp.path().join("index.html")
        );
        assert_eq!(
            resolve_path(temp.path(), "/libs/ol.js?v=1#x").unwrap(),
            temp.path().join("libs/ol.js")
        );
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let temp = site();
        assert!(resolve_path(temp.path(), "/../etc/passwd").is_none());
        assert!(resolve_path(temp.path(), "/libs/%2e%2e/%2e%2e/secret").is_none());
        assert!(resolve_path(temp.path(), "/bad%zz").is_none());
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(percent_decode("my%20map.html").unwrap(), "my map.html");
        assert!(percent_decode("%4").is_none());
    }

    #[test]
    fn test_handle_get() {
        let temp = site();
        let resp = handle_request(&get("/libs/ol.js"), temp.path());
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, b"var ol;");

        assert_eq!(handle_request(&get("/missing.js"), temp.path()).status, 404);
        assert_eq!(handle_request(&get("/../x"), temp.path()).status, 403);
    }

    #[test]
    fn test_handle_rejects_post() {
        let temp = site();
        let mut req = get("/");
        req.method = "POST".to_string();
        let resp = handle_request(&req, temp.path());
        assert_eq!(resp.status, 405);
        assert!(resp.headers.iter().any(|(k, v)| k == "Allow" && v == "GET, HEAD"));
    }

    #[test]
    fn test_handle_connection_round_trip() {
        let temp = site();
        let mut stream = Cursor::new(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n".to_vec());
        handle_connection(&mut stream, temp.path());

        let written = stream.into_inner();
        let output = String::from_utf8_lossy(&written);
        assert!(output.contains("HTTP/1.1 200 OK\r\n"));
        assert!(output.ends_with("<html></html>"));
    }
}
