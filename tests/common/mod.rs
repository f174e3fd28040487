#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-key-123";

/// One request observed by the stub server.
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or(&self.target)
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match self.target.split_once('?') {
            Some((_, query)) => form_decode(query),
            None => Vec::new(),
        }
    }

    pub fn form_pairs(&self) -> Vec<(String, String)> {
        form_decode(&self.body)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn field_values(&self, name: &str) -> Vec<String> {
        self.form_pairs()
            .into_iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value)
            .collect()
    }
}

pub struct StubResponse {
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Minimal single-threaded HTTP stub: serves the given responses in order,
/// one connection each, recording every request it sees.
pub struct StubServer {
    base_url: String,
    requests: mpsc::Receiver<RecordedRequest>,
}

impl StubServer {
    pub fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server addr");
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            for response in responses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                if let Some(request) = handle_connection(stream, &response) {
                    let _ = sender.send(request);
                }
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            requests: receiver,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn next_request(&self) -> RecordedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(10))
            .expect("stub server saw a request")
    }
}

fn handle_connection(mut stream: TcpStream, response: &StubResponse) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        let (name, value) = line.split_once(':')?;
        let value = value.trim().to_string();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse().ok()?;
        }
        headers.push((name.to_string(), value));
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body).ok()?;
    }

    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason(response.status),
        response.body.len(),
        response.body
    );
    stream.write_all(payload.as_bytes()).ok()?;
    let _ = stream.flush();

    Some(RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// Decodes `application/x-www-form-urlencoded` pairs.
pub fn form_decode(input: &str) -> Vec<(String, String)> {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(value))
        })
        .collect()
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'+' => {
                out.push(b' ');
                index += 1;
            }
            b'%' if index + 2 < bytes.len() => {
                match u8::from_str_radix(&input[index + 1..index + 3], 16) {
                    Ok(byte) => {
                        out.push(byte);
                        index += 3;
                    }
                    Err(_) => {
                        out.push(b'%');
                        index += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                index += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// The server binary speaking NDJSON over stdio.
pub struct McpServerProc {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    next_id: i64,
}

impl McpServerProc {
    pub fn spawn(envs: &[(&str, &str)], remove: &[&str]) -> Self {
        let mut command = Command::new(env!("CARGO_BIN_EXE_mcp-chatppt"));
        command
            .args(["serve", "--stdio"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped());
        for (key, value) in envs {
            command.env(key, value);
        }
        for key in remove {
            command.env_remove(key);
        }
        let mut child = command.spawn().expect("spawn mcp-chatppt");
        let stdin = child.stdin.take().expect("stdin available");
        let stdout = BufReader::new(child.stdout.take().expect("stdout available"));
        Self {
            child,
            stdin,
            stdout,
            next_id: 1,
        }
    }

    /// Spawns against a stub server with the test credential configured.
    pub fn spawn_with_stub(stub: &StubServer) -> Self {
        Self::spawn(
            &[
                ("API_PPT_KEY", TEST_API_KEY),
                ("CHATPPT_API_BASE", stub.base_url()),
            ],
            &[],
        )
    }

    pub fn request(&mut self, method: &str, params: serde_json::Value) -> serde_json::Value {
        let id = self.next_id;
        self.next_id += 1;
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });
        let serialized = serde_json::to_string(&request).expect("serialize request");
        writeln!(self.stdin, "{serialized}").expect("write request");
        self.stdin.flush().expect("flush request");

        let mut line = String::new();
        self.stdout.read_line(&mut line).expect("read response");
        serde_json::from_str(line.trim()).expect("parse response")
    }

    pub fn call_tool(&mut self, name: &str, arguments: serde_json::Value) -> serde_json::Value {
        let response = self.request(
            "tools/call",
            serde_json::json!({"name": name, "arguments": arguments}),
        );
        response.get("result").cloned().expect("tool result")
    }
}

impl Drop for McpServerProc {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

pub fn error_object(result: &serde_json::Value) -> &serde_json::Value {
    assert_eq!(
        result.get("isError").and_then(serde_json::Value::as_bool),
        Some(true),
        "expected an error result: {result}"
    );
    result
        .get("structuredContent")
        .and_then(|value| value.get("error"))
        .expect("error object present")
}

pub fn structured(result: &serde_json::Value) -> &serde_json::Value {
    assert_eq!(
        result.get("isError").and_then(serde_json::Value::as_bool),
        Some(false),
        "expected a success result: {result}"
    );
    result.get("structuredContent").expect("structuredContent")
}
