//! In-process fake backend for integration tests

#![allow(dead_code)]

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde_json::{json, Value};
use tiny_http::{Header, Response, Server, StatusCode};

/// A request as the fake backend saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub body: String,
    pub authorization: Option<String>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// What a route answers
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
    pub headers: Vec<(String, String)>,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Self::status(200, value)
    }

    pub fn status(status: u16, value: Value) -> Self {
        Self {
            status,
            body: value.to_string().into_bytes(),
            headers: vec![("Content-Type".into(), "application/json".into())],
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn file(body: &str, filename: &str) -> Self {
        Self {
            status: 200,
            body: body.as_bytes().to_vec(),
            headers: vec![
                ("Content-Type".into(), "text/csv".into()),
                (
                    "Content-Disposition".into(),
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
        }
    }
}

type Router = dyn Fn(&str, &str, &Value) -> Reply + Send + Sync;

/// Serves `router` on a random local port until dropped
pub struct FakeBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FakeBackend {
    /// `router` receives the method, the path with query (minus the `/api`
    /// prefix), and the parsed body
    pub fn start<F>(router: F) -> Self
    where
        F: Fn(&str, &str, &Value) -> Reply + Send + Sync + 'static,
    {
        let server = Server::http("127.0.0.1:0").expect("http server");
        let base_url = format!("http://{}/api", server.server_addr());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let stop = Arc::new(AtomicBool::new(false));
        let router: Box<Router> = Box::new(router);

        let log = Arc::clone(&requests);
        let stopping = Arc::clone(&stop);
        let base = base_url.clone();
        let handle = thread::spawn(move || {
            while !stopping.load(Ordering::Relaxed) {
                let mut req = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let mut body = String::new();
                let _ = req.as_reader().read_to_string(&mut body);
                let method = req.method().to_string();
                let url = req
                    .url()
                    .strip_prefix("/api")
                    .unwrap_or(req.url())
                    .to_string();
                let authorization = req
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());
                let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

                let reply = router(&method, &url, &parsed);
                log.lock().expect("request log").push(Recorded {
                    method,
                    url,
                    body,
                    authorization,
                });

                // Absolute links such as pagination `next` are written as "{base}/..."
                let body = String::from_utf8_lossy(&reply.body).replace("{base}", &base);
                let mut response =
                    Response::from_data(body.into_bytes()).with_status_code(StatusCode(reply.status));
                for (name, value) in reply.headers {
                    response = response.with_header(
                        Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("header"),
                    );
                }
                let _ = req.respond(response);
            }
        });

        Self {
            base_url,
            requests,
            stop,
            handle: Some(handle),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("request log").clone()
    }

    pub fn requests_to(&self, method: &str, url: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.url == url)
            .collect()
    }

    pub fn count(&self, method: &str, url: &str) -> usize {
        self.requests_to(method, url).len()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn envelope(id: i64, category: &str, budgeted: &str, spent: &str) -> Value {
    json!({
        "id": id,
        "category": id + 100,
        "category_name": category,
        "budgeted_amount": budgeted,
        "spent_amount": spent,
    })
}

pub fn income(total: &str, allocated: &str, available: &str) -> Value {
    json!({
        "total_income": total,
        "total_allocated": allocated,
        "available_income": available,
    })
}

/// Echo a transaction POST back with an id
pub fn created_transaction(id: i64, body: &Value) -> Value {
    let mut txn = body.clone();
    txn["id"] = json!(id);
    txn["user"] = json!("tester");
    txn
}

/// Echo an envelope PUT back onto the stored envelope
pub fn updated_envelope(stored: &Value, body: &Value) -> Value {
    let mut env = stored.clone();
    env["budgeted_amount"] = body["budgeted_amount"].clone();
    env
}

pub fn recurring(id: i64, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "amount": "45.00",
        "category": "Utilities",
        "transaction_type": "expense",
        "frequency": "monthly",
        "start_date": "2025-01-05",
        "next_occurrence": "2025-04-05",
        "status": status,
    })
}

pub fn transaction(id: i64, description: &str, amount: &str) -> Value {
    json!({
        "id": id,
        "user": "tester",
        "date": "2025-04-05",
        "description": description,
        "amount": amount,
        "category": "Utilities",
        "transaction_type": "expense",
    })
}
