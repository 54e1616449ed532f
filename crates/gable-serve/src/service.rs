//! Request routing and the `/predict` handler.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

use gable_model::ModelArtifact;

use crate::http::{format_response, read_request, Request};

#[derive(Debug, Deserialize)]
struct PredictBody {
    features: Vec<f64>,
}

/// Handle the body of a `POST /predict` request.
///
/// Missing, empty, or undecodable input (including an absent `features`
/// vector) is the client's fault: 400 with the fixed message. A prediction
/// failure (e.g. wrong vector length) is reported as 500 with the
/// underlying message.
pub fn handle_predict(artifact: &ModelArtifact, body: &[u8]) -> (u16, String) {
    let parsed: Result<PredictBody, _> = serde_json::from_slice(body);
    let request = match parsed {
        Ok(request) => request,
        Err(_) => {
            return (400, json!({"error": "No input data provided"}).to_string());
        }
    };

    match artifact.predict(&request.features) {
        Ok(prediction) => (200, json!({"prediction": prediction}).to_string()),
        Err(e) => (500, json!({"error": e.to_string()}).to_string()),
    }
}

/// Route a parsed request.
pub fn route(artifact: &ModelArtifact, request: &Request) -> (u16, String) {
    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/predict") => handle_predict(artifact, &request.body),
        _ => (404, json!({"error": "Not found"}).to_string()),
    }
}

async fn handle_connection(mut socket: TcpStream, artifact: Arc<ModelArtifact>) {
    let response = match read_request(&mut socket).await {
        Ok(request) => {
            let (status, body) = route(&artifact, &request);
            tracing::debug!(method = %request.method, path = %request.path, status, "Handled request");
            format_response(status, &body)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read request");
            format_response(400, &json!({"error": "No input data provided"}).to_string())
        }
    };

    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Accept loop. The artifact is shared read-only; nothing per-request
/// mutates it.
pub async fn serve(listener: TcpListener, artifact: Arc<ModelArtifact>) -> std::io::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        tracing::debug!(%peer, "Accepted connection");
        let artifact = Arc::clone(&artifact);
        tokio::spawn(handle_connection(socket, artifact));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gable_types::HyperparamRecord;
    use gable_model::RandomForestRegressor;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn artifact_with_width(width: usize) -> Arc<ModelArtifact> {
        let features: Vec<Vec<f64>> = (0..60)
            .map(|i| (0..width).map(|c| (i * (c + 1)) as f64 / 10.0).collect())
            .collect();
        let target: Vec<f64> = features.iter().map(|r| r.iter().sum()).collect();
        let params = HyperparamRecord {
            n_estimators: 5,
            ..Default::default()
        };
        let forest = RandomForestRegressor::fit(&features, &target, &params, 1337).unwrap();
        let names = (0..width).map(|c| format!("f{c}")).collect();
        Arc::new(ModelArtifact::new(names, forest))
    }

    async fn spawn_server(artifact: Arc<ModelArtifact>) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, artifact));
        addr
    }

    async fn send_raw(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    fn post_predict(body: &str) -> String {
        format!(
            "POST /predict HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        )
    }

    #[tokio::test]
    async fn predict_happy_path_returns_numeric_prediction() {
        let addr = spawn_server(artifact_with_width(8)).await;
        let response = send_raw(addr, &post_predict(r#"{"features":[1,2,3,4,5,6,7,8]}"#)).await;

        assert!(response.starts_with("HTTP/1.1 200 OK"));
        let body = response.split("\r\n\r\n").nth(1).unwrap();
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert!(json["prediction"].is_number());
    }

    #[tokio::test]
    async fn empty_body_is_a_client_error() {
        let addr = spawn_server(artifact_with_width(8)).await;
        let response = send_raw(addr, &post_predict("")).await;

        assert!(response.starts_with("HTTP/1.1 400 Bad Request"));
        assert!(response.contains("No input data provided"));
    }

    #[tokio::test]
    async fn missing_features_key_is_a_client_error() {
        let addr = spawn_server(artifact_with_width(8)).await;
        let response = send_raw(addr, &post_predict(r#"{"rows":[1,2]}"#)).await;
        assert!(response.starts_with("HTTP/1.1 400 Bad Request"));
    }

    #[tokio::test]
    async fn wrong_vector_length_surfaces_a_server_error() {
        let addr = spawn_server(artifact_with_width(8)).await;
        let response = send_raw(addr, &post_predict(r#"{"features":[1,2,3]}"#)).await;

        assert!(response.starts_with("HTTP/1.1 500 Internal Server Error"));
        assert!(response.contains("Feature width mismatch"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let addr = spawn_server(artifact_with_width(2)).await;
        let response = send_raw(
            addr,
            "GET /health HTTP/1.1\r\nHost: localhost\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 404 Not Found"));
    }
}
