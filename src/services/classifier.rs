//! Client for the remote mood classification service.
//!
//! Wire contract: `POST <api_url>/mood/<video_id>` with a form-encoded
//! `transcript` field, answered by `{"segments": [{t0, t1, mood, confidence}, ...]}`.
//! A response is accepted or rejected as a whole; a single bad segment
//! fails the entire acquisition.

use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::kernel::event::VideoIdentity;
use crate::kernel::segment::{MalformedSegment, RawSegment, Segment};
use crate::kernel::telemetry::event::FailureKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassificationError {
    #[error("network error: {0}")]
    Network(String),
    #[error("classifier answered with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("malformed segment at index {index}: {source}")]
    MalformedSegment {
        index: usize,
        #[source]
        source: MalformedSegment,
    },
}

impl ClassificationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClassificationError::Network(_) => FailureKind::Network,
            ClassificationError::Status(_) => FailureKind::Status,
            ClassificationError::MalformedResponse(_)
            | ClassificationError::MalformedSegment { .. } => FailureKind::Malformed,
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.kind() == FailureKind::Malformed
    }
}

/// Remote mood classification capability.
///
/// The request targets `identity`, so the service base URL and the video id
/// travel together with the acquisition cycle they belong to.
/// One call is one outbound request. There is no de-duplication: callers
/// must not race two calls for the same video unless they mean to.
pub trait MoodClassifier: Send + Sync + 'static {
    fn classify(
        &self,
        transcript: String,
        identity: VideoIdentity,
    ) -> impl Future<Output = Result<Vec<Segment>, ClassificationError>> + Send;
}

#[derive(Deserialize)]
struct MoodResponse {
    segments: Vec<RawSegment>,
}

/// Decodes and validates a classifier response body.
pub fn parse_response(body: &str) -> Result<Vec<Segment>, ClassificationError> {
    let response: MoodResponse = serde_json::from_str(body)
        .map_err(|e| ClassificationError::MalformedResponse(e.to_string()))?;

    response
        .segments
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            Segment::try_from(raw).map_err(|source| ClassificationError::MalformedSegment { index, source })
        })
        .collect()
}

#[derive(Clone)]
pub struct HttpMoodClassifier {
    client: Client,
}

impl HttpMoodClassifier {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            warn!("HTTP client builder failed ({}), request timeout not applied", e);
            Client::default()
        });
        Self { client }
    }

    /// `<api_url>/mood/<video_id>`, tolerating a trailing slash on the base.
    pub fn endpoint(identity: &VideoIdentity) -> String {
        identity.to_string()
    }
}

impl MoodClassifier for HttpMoodClassifier {
    async fn classify(
        &self,
        transcript: String,
        identity: VideoIdentity,
    ) -> Result<Vec<Segment>, ClassificationError> {
        let url = Self::endpoint(&identity);
        debug!("POST {} ({} transcript bytes)", url, transcript.len());

        let response = self
            .client
            .post(&url)
            .form(&[("transcript", transcript.as_str())])
            .send()
            .await
            .map_err(|e| ClassificationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassificationError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClassificationError::Network(e.to_string()))?;

        parse_response(&body)
    }
}
