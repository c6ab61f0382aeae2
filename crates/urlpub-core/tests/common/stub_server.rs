//! Minimal HTTP/1.1 server for notify integration tests.
//!
//! Answers every request with a fixed status, records what it received, and
//! reports when the client closes the connection. The response carries no
//! `Connection: close`, so closing the socket is left to the client.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// What the server saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_length: Option<u64>,
    pub body: Vec<u8>,
}

pub struct StubServer {
    /// Base URL, e.g. "http://127.0.0.1:12345/".
    pub url: String,
    requests: Receiver<RecordedRequest>,
    closed: Receiver<()>,
}

impl StubServer {
    /// Next recorded request, waiting up to `timeout`.
    pub fn next_request(&self, timeout: Duration) -> Option<RecordedRequest> {
        self.requests.recv_timeout(timeout).ok()
    }

    /// True once the client has closed one connection, waiting up to `timeout`.
    pub fn wait_closed(&self, timeout: Duration) -> bool {
        self.closed.recv_timeout(timeout).is_ok()
    }
}

/// Starts a server in a background thread that answers with `status`.
/// The server runs until the process exits.
pub fn start(status: u16) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let (req_tx, requests) = mpsc::channel();
    let (closed_tx, closed) = mpsc::channel();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let req_tx = req_tx.clone();
            let closed_tx = closed_tx.clone();
            thread::spawn(move || handle(stream, status, &req_tx, &closed_tx));
        }
    });
    StubServer {
        url: format!("http://127.0.0.1:{}/", port),
        requests,
        closed,
    }
}

/// Starts a server that accepts connections and never answers.
/// Returns the base URL.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || {
                let _held = stream;
                thread::sleep(Duration::from_secs(30));
            });
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

/// Starts a server that sends `status` with `Content-Length: 100` but only
/// three body bytes, then closes the connection. Returns the base URL.
pub fn start_truncated(status: u16) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            thread::spawn(move || {
                let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
                if read_request(&mut stream).is_none() {
                    return;
                }
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Length: 100\r\n\r\nabc",
                    status,
                    reason(status)
                );
                let _ = stream.write_all(response.as_bytes());
            });
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

fn handle(
    mut stream: TcpStream,
    status: u16,
    req_tx: &Sender<RecordedRequest>,
    closed_tx: &Sender<()>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

    let Some(request) = read_request(&mut stream) else {
        return;
    };
    let _ = req_tx.send(request);

    let location = if status == 302 {
        "Location: /elsewhere\r\n"
    } else {
        ""
    };
    let body = reason(status);
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}\r\n{}",
        status,
        reason(status),
        body.len(),
        location,
        body
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }

    // Wait for the client to hang up.
    let mut buf = [0u8; 1024];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => {
                let _ = closed_tx.send(());
                return;
            }
            Ok(_) => continue,
            Err(_) => return,
        }
    }
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        if let Some(pos) = find_header_end(&data) {
            break pos;
        }
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
    };

    let head = std::str::from_utf8(&data[..header_end]).ok()?;
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let mut content_length = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse::<u64>().ok();
            }
        }
    }

    let mut body = data[header_end + 4..].to_vec();
    let wanted = content_length.unwrap_or(0) as usize;
    while body.len() < wanted {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&buf[..n]);
    }

    Some(RecordedRequest {
        method,
        path,
        content_length,
        body,
    })
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n")
}
