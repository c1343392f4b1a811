use std::time::Duration;

use reqwest::Client;
use serde_json::json;

use super::error::ApiError;
use super::request::RequestDocument;
use super::types::{GraphQlError, GraphQlRequest, GraphQlResponse, JobHandle, JobStatus};

const STATUS_QUERY: &str = "query processingStatusWithVerify(
    $messageIds: [ID!]!
    $organizationExternalId: ID!
) {
    processingStatusWithVerify(
        messageIds: $messageIds,
        organizationExternalId: $organizationExternalId
    ) {
        messageId
        importType
        importStatus
        timestamp
        error
        warnings { warning, externalId }
    }
}";

/// The platform operations the pipeline depends on. Implemented by
/// [`HrApiClient`] for real traffic and by hand-rolled fakes in tests.
pub trait ImportApi {
    /// Submits one batch and returns the handle correlating its
    /// asynchronous processing.
    async fn submit(&self, document: &RequestDocument) -> Result<JobHandle, ApiError>;

    /// Fetches the processing status of every given handle in one query.
    async fn statuses(
        &self,
        organization_id: &str,
        handles: &[JobHandle],
    ) -> Result<Vec<JobStatus>, ApiError>;
}

pub struct HrApiClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl HrApiClient {
    /// Builds a client for one connection. Credentials are joined into the
    /// `X-API-key` header value the platform expects.
    pub fn new(server_url: &str, client_id: &str, client_secret: &str) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to build HTTP client");
        Self {
            endpoint: format!("{}/hr", server_url.trim_end_matches('/')),
            api_key: format!("{client_id}:{client_secret}"),
            client,
        }
    }

    /// One POST, one envelope. Classifies the outcome as data, application
    /// error (200 with an `errors` list) or transport failure; the caller
    /// can tell the last two apart because the recovery differs.
    async fn execute(&self, request: &GraphQlRequest) -> Result<serde_json::Value, ApiError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let envelope: GraphQlResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::Malformed(format!("undecodable response body: {e}")))?;

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                return Err(ApiError::Application {
                    message: join_errors(&errors),
                });
            }
        }

        envelope
            .data
            .ok_or_else(|| ApiError::Malformed("response carries neither data nor errors".into()))
    }
}

impl ImportApi for HrApiClient {
    async fn submit(&self, document: &RequestDocument) -> Result<JobHandle, ApiError> {
        let request = GraphQlRequest {
            query: document.query.clone(),
            variables: document.variables.clone(),
        };
        let data = self.execute(&request).await?;
        data.get(document.operation)
            .and_then(|payload| payload.get("messageId"))
            .and_then(|id| id.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ApiError::Malformed(format!("missing {}.messageId in response", document.operation))
            })
    }

    async fn statuses(
        &self,
        organization_id: &str,
        handles: &[JobHandle],
    ) -> Result<Vec<JobStatus>, ApiError> {
        let request = GraphQlRequest {
            query: STATUS_QUERY.to_string(),
            variables: json!({
                "messageIds": handles,
                "organizationExternalId": organization_id,
            }),
        };
        let data = self.execute(&request).await?;
        let records = data
            .get("processingStatusWithVerify")
            .cloned()
            .ok_or_else(|| {
                ApiError::Malformed("missing processingStatusWithVerify in response".into())
            })?;
        serde_json::from_value(records)
            .map_err(|e| ApiError::Malformed(format!("undecodable status records: {e}")))
    }
}

/// Renders every error entry with its source locations ("row R, column C"),
/// one entry per line, so remote validation errors stay traceable to the
/// offending request field.
fn join_errors(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|entry| {
            if entry.locations.is_empty() {
                entry.message.clone()
            } else {
                let locations = entry
                    .locations
                    .iter()
                    .map(|at| format!("row {}, column {}", at.line, at.column))
                    .collect::<Vec<_>>()
                    .join("; ");
                format!("{} ({locations})", entry.message)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
