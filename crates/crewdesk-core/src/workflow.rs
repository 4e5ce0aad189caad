use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::employee::Employee;
use crate::metrics::BusinessMetrics;
use crate::schedule::ScheduleDay;

/// Workflow that interprets free-text employee requests
pub const PROCESS_EMPLOYEE_REQUEST: &str = "processEmployeeRequest";

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("could not reach workflow engine: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("workflow engine returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("workflow failed: {0}")]
    Failed(String),
    #[error("unexpected workflow response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Input handed to `processEmployeeRequest`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub input: String,
    pub business_metrics: BusinessMetrics,
}

/// Outcome of a workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub raw: Value,
    pub employee: Option<Employee>,
    pub schedule: Option<ScheduleDay>,
}

impl WorkflowResult {
    pub fn from_value(raw: Value) -> Result<Self, WorkflowError> {
        let employee = typed_field(&raw, "employee")?;
        let schedule = typed_field(&raw, "schedule")?;
        Ok(Self {
            raw,
            employee,
            schedule,
        })
    }

    /// Pretty JSON, as shown in the tool message
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

fn typed_field<T: serde::de::DeserializeOwned>(
    raw: &Value,
    key: &str,
) -> Result<Option<T>, WorkflowError> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
    }
}

/// Unwrap a run envelope (`{status, result, error}`); bare objects pass through
fn unwrap_run(body: Value) -> Result<Value, WorkflowError> {
    let status = match body.get("status").and_then(Value::as_str) {
        Some(status) => status.to_string(),
        None => return Ok(body),
    };

    match status.as_str() {
        "success" => Ok(body.get("result").cloned().unwrap_or(Value::Null)),
        "failed" => {
            let message = match body.get("error") {
                Some(Value::String(s)) => s.clone(),
                Some(err) => err
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string()),
                None => "no error details".to_string(),
            };
            Err(WorkflowError::Failed(message))
        }
        other => Err(WorkflowError::Failed(format!(
            "run ended with status '{}'",
            other
        ))),
    }
}

#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    async fn execute(&self, action: &str, payload: Value) -> Result<WorkflowResult, WorkflowError>;
}

#[derive(Clone)]
pub struct HttpWorkflowClient {
    client: Client,
    base_url: String,
    user_id: String,
    thread_id: String,
}

impl HttpWorkflowClient {
    pub fn new(base_url: &str, user_id: &str, thread_id: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
            thread_id: thread_id.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn process_employee_request(
        &self,
        request: &EmployeeRequest,
    ) -> Result<WorkflowResult, WorkflowError> {
        self.execute(PROCESS_EMPLOYEE_REQUEST, serde_json::to_value(request)?)
            .await
    }
}

#[async_trait]
impl WorkflowEngine for HttpWorkflowClient {
    async fn execute(&self, action: &str, payload: Value) -> Result<WorkflowResult, WorkflowError> {
        let url = format!("{}/api/workflows/{}/start-async", self.base_url, action);

        let request = json!({
            "inputData": payload,
            "runtimeContext": {
                "userId": self.user_id,
                "threadId": self.thread_id,
            },
        });

        tracing::debug!(%url, action, "executing workflow");

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WorkflowError::Status { status, body });
        }

        let body: Value = response.json().await?;
        tracing::debug!(action, "workflow responded");
        WorkflowResult::from_value(unwrap_run(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> EmployeeRequest {
        EmployeeRequest {
            input: "Add Sarah Johnson, $28/hour, 22 hours".to_string(),
            business_metrics: BusinessMetrics::default(),
        }
    }

    #[test]
    fn test_unwrap_run_variants() {
        let bare = json!({"employee": null});
        assert_eq!(unwrap_run(bare.clone()).unwrap(), bare);

        let ok = json!({"status": "success", "result": {"ok": true}});
        assert_eq!(unwrap_run(ok).unwrap(), json!({"ok": true}));

        let failed = json!({"status": "failed", "error": {"message": "boom"}});
        match unwrap_run(failed) {
            Err(WorkflowError::Failed(msg)) => assert_eq!(msg, "boom"),
            other => panic!("expected failure, got {:?}", other),
        }

        assert!(matches!(
            unwrap_run(json!({"status": "suspended"})),
            Err(WorkflowError::Failed(_))
        ));
    }

    #[test]
    fn test_result_with_malformed_employee_is_decode_error() {
        let raw = json!({"employee": {"firstName": "NoId"}});
        assert!(matches!(
            WorkflowResult::from_value(raw),
            Err(WorkflowError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_execute_posts_input_and_parses_employee() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/workflows/processEmployeeRequest/start-async"))
            .and(body_partial_json(json!({
                "inputData": {"input": "Add Sarah Johnson, $28/hour, 22 hours"},
                "runtimeContext": {"userId": "Test User", "threadId": "Test Thread"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "result": {
                    "employee": {
                        "id": "emp_1",
                        "firstName": "Sarah",
                        "lastName": "Johnson",
                        "hoursPerWeek": 22,
                        "payRate": 28
                    }
                }
            })))
            .mount(&server)
            .await;

        let client = HttpWorkflowClient::new(&server.uri(), "Test User", "Test Thread");
        let result = client.process_employee_request(&request()).await.unwrap();

        assert!(result.pretty().contains("\"firstName\": \"Sarah\""));
        assert!(result.schedule.is_none());
        let employee = result.employee.expect("employee in result");
        assert_eq!(employee.full_name(), "Sarah Johnson");
    }

    #[tokio::test]
    async fn test_execute_maps_http_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("kaput"))
            .mount(&server)
            .await;

        let client = HttpWorkflowClient::new(&format!("{}/", server.uri()), "u", "t");
        match client.process_employee_request(&request()).await {
            Err(WorkflowError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "kaput");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_unreachable_server_is_transport_error() {
        // Port 9 (discard) is not expected to serve HTTP
        let client = HttpWorkflowClient::new("http://127.0.0.1:9", "u", "t");
        let err = client
            .execute(PROCESS_EMPLOYEE_REQUEST, json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Transport(_)));
    }
}
