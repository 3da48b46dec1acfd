//! Test helpers: record builders and a one-shot HTTP stub.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::client::{CatalogClient, ClientConfig};
use crate::models::{ModelId, ModelRecord};

pub fn model(id: ModelId, name: &str, provider: &str) -> ModelRecord {
    ModelRecord {
        id,
        name: name.to_string(),
        developer: None,
        release_date: None,
        parameter_count: None,
        architecture_type: None,
        training_data_size: None,
        description: None,
        use_cases: None,
        provider_id: None,
        provider_name: provider.to_string(),
        provider_website: None,
        provider_logo: None,
        context_size: None,
        license: None,
    }
}

pub fn sized(
    id: ModelId,
    provider: &str,
    params: Option<u64>,
    context: Option<u64>,
    license: Option<&str>,
) -> ModelRecord {
    ModelRecord {
        parameter_count: params,
        context_size: context,
        license: license.map(str::to_string),
        ..model(id, &format!("model-{}", id), provider)
    }
}

/// Serves exactly one canned HTTP response on an ephemeral local port.
pub struct StubServer {
    pub base_url: String,
    request_rx: mpsc::Receiver<String>,
}

impl StubServer {
    pub fn respond(code: u16, reason: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            code,
            reason,
            body.len(),
            body
        );
        let (tx, request_rx) = mpsc::channel();

        thread::spawn(move || {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream);
            let mut request_line = String::new();
            let _ = reader.read_line(&mut request_line);
            loop {
                let mut header = String::new();
                match reader.read_line(&mut header) {
                    Ok(0) => break,
                    Ok(_) if header == "\r\n" => break,
                    Ok(_) => continue,
                    Err(_) => break,
                }
            }
            let mut stream = reader.into_inner();
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
            let _ = tx.send(request_line.trim_end().to_string());
        });

        Self {
            base_url,
            request_rx,
        }
    }

    /// The request line the stub received, e.g. `GET /api/models HTTP/1.1`.
    pub fn request_line(&self) -> String {
        self.request_rx
            .recv_timeout(Duration::from_secs(5))
            .unwrap_or_default()
    }
}

pub fn client_for(server: &StubServer) -> CatalogClient {
    CatalogClient::new(ClientConfig {
        base_url: server.base_url.clone(),
        timeout: Duration::from_secs(5),
    })
}

/// A URL on which nothing is listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
