//! # Request Handlers
//!
//! Routes incoming HTTP requests and orchestrates validation → inference →
//! response shaping. Every recoverable failure produces a structured JSON
//! error; nothing in this module can mutate the shared artifact.
//!
//! Batch policy is per-item isolation: each element of a batch is validated
//! and scored independently, and the response carries a per-index success or
//! error shape, positionally aligned with the request array. Oversized
//! batches are rejected before any validation or inference work begins.

use crate::artifact::PipelineArtifact;
use crate::config::ServiceConfig;
use crate::error::ValidationError;
use crate::inference::predict_one;
use crate::response::{BatchItem, ErrorResponse, PredictionResponse};
use crate::schema;
use crate::validate::validate;
use bytes::{Buf, Bytes};
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared per-process state: the immutable artifact, the service
/// configuration, and the pre-built interface description.
///
/// Cloning is cheap (`Arc` handles); every connection task gets its own
/// clone and no task ever mutates the shared parts.
#[derive(Clone)]
pub struct AppState {
  artifact: Arc<PipelineArtifact>,
  config: Arc<ServiceConfig>,
  interface_doc: Arc<Value>,
}

impl AppState {
  /// Publishes a loaded artifact and configuration as shared state.
  ///
  /// The interface description is rendered once here, not per request.
  pub fn new(artifact: PipelineArtifact, config: ServiceConfig) -> Self {
    let interface_doc = Arc::new(schema::interface_description(
      config.strict_fields,
      config.max_batch_size,
    ));
    Self {
      artifact: Arc::new(artifact),
      config: Arc::new(config),
      interface_doc,
    }
  }
}

/// Landing page, kept from the original service front door.
const INDEX_HTML: &str = r#"<html>
  <head><title>API Prédiction Entretien d'Embauche</title></head>
  <body>
    <h1>API Prédiction Entretien d'Embauche</h1>
    <p>Service de prédiction du succès d'un entretien d'embauche à partir de données de CV.</p>
    <ul>
      <li><b>POST</b> <code>/predict</code> : prédiction pour un candidat</li>
      <li><b>POST</b> <code>/predict_batch</code> : prédiction pour plusieurs candidats</li>
      <li><b>GET</b> <code>/schema</code> : description de l'interface</li>
      <li><b>GET</b> <code>/health</code> : état du service</li>
    </ul>
  </body>
</html>
"#;

/// Dispatches one request to its handler and shapes the response.
///
/// Generic over the body type so tests can drive it with in-memory bodies
/// while the server drives it with `hyper::body::Incoming`.
pub async fn route<B>(req: Request<B>, state: AppState) -> Response<Full<Bytes>>
where
  B: hyper::body::Body,
  B::Data: Buf,
  B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
  let method = req.method().clone();
  let path = req.uri().path().to_string();
  let response = match (&method, path.as_str()) {
    (&Method::GET, "/") => html_response(INDEX_HTML),
    (&Method::GET, "/health") => json_response(StatusCode::OK, &health_report(&state)),
    (&Method::GET, "/schema") => json_response(StatusCode::OK, state.interface_doc.as_ref()),
    (&Method::POST, "/predict") => {
      match read_body(req.into_body(), state.config.max_body_bytes).await {
        Ok(bytes) => predict_single(&bytes, &state),
        Err((status, error)) => json_response(status, &error),
      }
    }
    (&Method::POST, "/predict_batch") => {
      match read_body(req.into_body(), state.config.max_body_bytes).await {
        Ok(bytes) => predict_batch(&bytes, &state),
        Err((status, error)) => json_response(status, &error),
      }
    }
    _ => json_response(StatusCode::NOT_FOUND, &ErrorResponse::not_found(&path)),
  };
  debug!(method = %method, path = %path, status = %response.status(), "request handled");
  response
}

/// Single-prediction handler: one raw record in, one prediction (or one
/// structured error) out.
fn predict_single(bytes: &[u8], state: &AppState) -> Response<Full<Bytes>> {
  let raw: Value = match serde_json::from_slice(bytes) {
    Ok(raw) => raw,
    Err(err) => {
      return json_response(
        StatusCode::BAD_REQUEST,
        &ErrorResponse::bad_request(format!("invalid JSON: {err}")),
      );
    }
  };
  match validate(&raw, state.config.strict_fields) {
    Ok(record) => match predict_one(&state.artifact, &record) {
      Ok(prediction) => json_response(StatusCode::OK, &PredictionResponse::from(prediction)),
      Err(err) => {
        warn!(field = err.field_name().unwrap_or(""), error = %err, "inference failed");
        json_response(
          StatusCode::INTERNAL_SERVER_ERROR,
          &ErrorResponse::inference(&err),
        )
      }
    },
    Err(err) => {
      debug!(violations = err.violations.len(), "candidate rejected");
      json_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        &ErrorResponse::validation(&err),
      )
    }
  }
}

/// Batch handler: a JSON array of raw records in, a positionally aligned
/// array of per-item results out.
fn predict_batch(bytes: &[u8], state: &AppState) -> Response<Full<Bytes>> {
  let raw: Value = match serde_json::from_slice(bytes) {
    Ok(raw) => raw,
    Err(err) => {
      return json_response(
        StatusCode::BAD_REQUEST,
        &ErrorResponse::bad_request(format!("invalid JSON: {err}")),
      );
    }
  };
  let items = match raw.as_array() {
    Some(items) => items,
    None => {
      return json_response(
        StatusCode::BAD_REQUEST,
        &ErrorResponse::bad_request("expected a JSON array of candidate records"),
      );
    }
  };
  if items.is_empty() {
    let error = ValidationError::single(
      "body",
      Value::Array(Vec::new()),
      "batch must contain at least one record",
    );
    return json_response(
      StatusCode::UNPROCESSABLE_ENTITY,
      &ErrorResponse::validation(&error),
    );
  }
  if items.len() > state.config.max_batch_size {
    return json_response(
      StatusCode::PAYLOAD_TOO_LARGE,
      &ErrorResponse::payload_too_large(format!(
        "batch of {} records exceeds the maximum of {}",
        items.len(),
        state.config.max_batch_size
      )),
    );
  }
  let results: Vec<BatchItem> = items.iter().map(|item| score_item(item, state)).collect();
  let failures = results
    .iter()
    .filter(|item| matches!(item, BatchItem::Error(_)))
    .count();
  debug!(total = results.len(), failures, "batch scored");
  json_response(StatusCode::OK, &results)
}

/// Scores one batch element with exactly the same validate-then-infer
/// orchestration as the single handler.
fn score_item(raw: &Value, state: &AppState) -> BatchItem {
  match validate(raw, state.config.strict_fields) {
    Ok(record) => match predict_one(&state.artifact, &record) {
      Ok(prediction) => BatchItem::Success(PredictionResponse::from(prediction)),
      Err(err) => {
        warn!(field = err.field_name().unwrap_or(""), error = %err, "batch item inference failed");
        BatchItem::Error(ErrorResponse::inference(&err))
      }
    },
    Err(err) => BatchItem::Error(ErrorResponse::validation(&err)),
  }
}

fn health_report(state: &AppState) -> Value {
  json!({
    "status": "ready",
    "model_loaded": true,
    "format_version": state.artifact.format_version,
    "trained_at": state.artifact.trained_at,
    "feature_width": state.artifact.transform.width(),
    "threshold": state.artifact.threshold,
  })
}

/// Buffers a request body, capped at `limit` bytes.
async fn read_body<B>(body: B, limit: usize) -> Result<Bytes, (StatusCode, ErrorResponse)>
where
  B: hyper::body::Body,
  B::Data: Buf,
  B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
  match Limited::new(body, limit).collect().await {
    Ok(collected) => Ok(collected.to_bytes()),
    Err(err) => {
      if err.downcast_ref::<LengthLimitError>().is_some() {
        Err((
          StatusCode::PAYLOAD_TOO_LARGE,
          ErrorResponse::payload_too_large(format!("request body exceeds {limit} bytes")),
        ))
      } else {
        Err((
          StatusCode::BAD_REQUEST,
          ErrorResponse::bad_request(format!("failed to read request body: {err}")),
        ))
      }
    }
  }
}

fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
  let bytes = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
  let mut response = Response::new(Full::new(Bytes::from(bytes)));
  *response.status_mut() = status;
  response
    .headers_mut()
    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
  response
}

fn html_response(body: &'static str) -> Response<Full<Bytes>> {
  let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
  response
    .headers_mut()
    .insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
  response
}
