use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use anyhow::Result;
use awc::http::header::HeaderMap;
use awc::http::{Method, StatusCode};
use awc::{Client, ClientRequest};
use chronctl_config::ChronConfig;
use chronctl_models::dtos::{Job, JobStatus, NewJobRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// What went wrong with a call, kept distinguishable so callers can react to
/// connectivity problems differently than to an unexpected status code.
#[derive(Debug)]
pub enum HttpError {
    Transport(String),
    Encode(String),
    Decode(String),
    Status(StatusCode),
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(cause) => write!(f, "transport failure: {cause}"),
            Self::Encode(cause) => write!(f, "could not serialize request body: {cause}"),
            Self::Decode(cause) => write!(f, "could not decode response body: {cause}"),
            Self::Status(status) => write!(f, "unexpected return code, got {status}"),
        }
    }
}

impl Error for HttpError {}

/// Client for the scheduler's REST API. One instance per invocation, no state
/// is shared between calls and nothing is ever retried.
pub struct HttpClient {
    base_url: String,
    auth: Option<(String, String)>,
    dump: bool,
}

impl HttpClient {
    pub fn new(config: Arc<ChronConfig>, dump: bool) -> Self {
        let auth = config
            .basic_auth()
            .map(|(username, password)| (username.to_owned(), password.to_owned()));
        Self {
            base_url: config.url.clone(),
            auth,
            dump,
        }
    }

    fn request(&self, method: Method, path: &str) -> ClientRequest {
        let url = format!("{}{path}", self.base_url);
        debug!("sending {method} request to {url}");

        let mut request = Client::new()
            .request(method, url)
            .insert_header(("User-Agent", "chronctl"));

        if let Some((username, password)) = &self.auth {
            request = request.basic_auth(username, password);
        }

        request
    }

    fn dump_request(&self, request: &ClientRequest, body: Option<&[u8]>) {
        if !self.dump {
            return;
        }
        eprintln!("> {} {}", request.get_method(), request.get_uri());
        for (name, value) in request.headers() {
            eprintln!("> {name}: {}", value.to_str().unwrap_or("<binary>"));
        }
        if let Some(body) = body {
            eprintln!("{}", String::from_utf8_lossy(body));
        }
        eprintln!();
    }

    fn dump_response(&self, status: StatusCode, headers: &HeaderMap, body: &[u8]) {
        if !self.dump {
            return;
        }
        eprintln!("< {status}");
        for (name, value) in headers {
            eprintln!("< {name}: {}", value.to_str().unwrap_or("<binary>"));
        }
        eprintln!("{}", String::from_utf8_lossy(body));
        eprintln!();
    }

    /// Sends the request and reads the full response body. The raw exchange
    /// is dumped before anything gets decoded.
    async fn exchange(
        &self,
        request: ClientRequest,
        payload: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Vec<u8>)> {
        self.dump_request(&request, payload.as_deref());

        let send_request = match payload {
            Some(payload) => request.send_body(payload),
            None => request.send(),
        };

        let mut response = send_request
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        let status = response.status();
        debug!("response from server status: {status}");

        let body = response
            .body()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?
            .to_vec();

        self.dump_response(status, response.headers(), &body);
        Ok((status, body))
    }

    fn decode_into<T: DeserializeOwned>(body: &[u8], target: Option<&mut T>) -> Result<()> {
        let Some(target) = target else {
            return Ok(());
        };
        *target = serde_json::from_slice(body).map_err(|e| HttpError::Decode(e.to_string()))?;
        Ok(())
    }

    fn expect_status(status: StatusCode, expected: &[StatusCode]) -> Result<StatusCode> {
        if expected.contains(&status) {
            Ok(status)
        } else {
            Err(HttpError::Status(status).into())
        }
    }

    /// GET with an optional decode target. The body is decoded before the
    /// status check, so a caller's target may already be populated when a
    /// Status error comes back.
    pub async fn get<T>(
        &self,
        path: &str,
        result: Option<&mut T>,
        expected: &[StatusCode],
    ) -> Result<StatusCode>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path);
        let (status, body) = self.exchange(request, None).await?;
        Self::decode_into(&body, result)?;
        Self::expect_status(status, expected)
    }

    pub async fn post<B, T, E>(
        &self,
        path: &str,
        data: &B,
        result: Option<&mut T>,
        error: Option<&mut E>,
        expected: &[StatusCode],
    ) -> Result<StatusCode>
    where
        B: Serialize,
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        self.send(Method::POST, path, data, result, error, expected)
            .await
    }

    pub async fn put<B, T, E>(
        &self,
        path: &str,
        data: &B,
        result: Option<&mut T>,
        error: Option<&mut E>,
        expected: &[StatusCode],
    ) -> Result<StatusCode>
    where
        B: Serialize,
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        self.send(Method::PUT, path, data, result, error, expected)
            .await
    }

    /// Shared POST/PUT path. The response body is decoded into the result and
    /// the error target independently, both before the status check, so error
    /// shaped bodies can land in the error target at failing call sites.
    async fn send<B, T, E>(
        &self,
        method: Method,
        path: &str,
        data: &B,
        result: Option<&mut T>,
        error: Option<&mut E>,
        expected: &[StatusCode],
    ) -> Result<StatusCode>
    where
        B: Serialize,
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        let payload = serde_json::to_vec(data).map_err(|e| HttpError::Encode(e.to_string()))?;
        let request = self
            .request(method, path)
            .content_type("application/json");
        let (status, body) = self.exchange(request, Some(payload)).await?;
        Self::decode_into(&body, result)?;
        Self::decode_into(&body, error)?;
        Self::expect_status(status, expected)
    }

    pub async fn delete<E>(
        &self,
        path: &str,
        error: Option<&mut E>,
        expected: &[StatusCode],
    ) -> Result<StatusCode>
    where
        E: DeserializeOwned,
    {
        let request = self.request(Method::DELETE, path);
        let (status, body) = self.exchange(request, None).await?;
        Self::decode_into(&body, error)?;
        Self::expect_status(status, expected)
    }

    pub async fn jobs(&self) -> Result<Vec<Job>> {
        let mut jobs: Vec<Job> = Vec::new();
        self.get("/scheduler/jobs", Some(&mut jobs), &[StatusCode::OK])
            .await?;
        Ok(jobs)
    }

    /// The graph/csv endpoint does not return json, so the generic verbs
    /// cannot do much here. Requires a 200 exactly, then hands the body to
    /// the feed parser.
    pub async fn job_statuses(&self) -> Result<Vec<JobStatus>> {
        let request = self.request(Method::GET, "/scheduler/graph/csv");
        let (status, body) = self.exchange(request, None).await?;
        if status != StatusCode::OK {
            return Err(HttpError::Status(status).into());
        }
        Ok(JobStatus::parse_feed(&String::from_utf8_lossy(&body)))
    }

    pub async fn run_job(&self, name: &str) -> Result<()> {
        let path = format!("/scheduler/job/{name}");
        self.put(
            &path,
            &(),
            None::<&mut Value>,
            None::<&mut Value>,
            &[StatusCode::NO_CONTENT],
        )
        .await
        .map(|_| ())
    }

    pub async fn kill_tasks(&self, name: &str) -> Result<()> {
        let path = format!("/scheduler/task/kill/{name}");
        self.delete(&path, None::<&mut Value>, &[StatusCode::NO_CONTENT])
            .await
            .map(|_| ())
    }

    pub async fn delete_job(&self, name: &str) -> Result<()> {
        let path = format!("/scheduler/job/{name}");
        self.delete(&path, None::<&mut Value>, &[StatusCode::NO_CONTENT])
            .await
            .map(|_| ())
    }

    pub async fn create_scheduled_job(&self, job: &NewJobRequest) -> Result<()> {
        self.post(
            "/scheduler/iso8601",
            job,
            None::<&mut Value>,
            None::<&mut Value>,
            &[StatusCode::NO_CONTENT],
        )
        .await
        .map(|_| ())
    }

    pub async fn create_dependency_job(&self, job: &NewJobRequest) -> Result<()> {
        self.post(
            "/scheduler/dependency",
            job,
            None::<&mut Value>,
            None::<&mut Value>,
            &[StatusCode::NO_CONTENT],
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expect_status_is_a_membership_test() {
        let expected = [StatusCode::NO_CONTENT, StatusCode::OK];

        assert!(HttpClient::expect_status(StatusCode::OK, &expected).is_ok());
        assert!(HttpClient::expect_status(StatusCode::NO_CONTENT, &expected).is_ok());

        let err = HttpClient::expect_status(StatusCode::NOT_FOUND, &expected).unwrap_err();
        match err.downcast_ref::<HttpError>() {
            Some(HttpError::Status(status)) => assert_eq!(*status, StatusCode::NOT_FOUND),
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[test]
    fn decode_populates_the_caller_target() {
        let body = br#"[{"name": "etl-1"}]"#;
        let mut jobs: Vec<Job> = Vec::new();

        HttpClient::decode_into(body, Some(&mut jobs)).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].name, "etl-1");
    }

    #[test]
    fn decode_is_skipped_without_a_target() {
        let body = b"this is not json";
        assert!(HttpClient::decode_into(body, None::<&mut Value>).is_ok());
    }

    #[test]
    fn decode_failure_carries_the_cause() {
        let mut jobs: Vec<Job> = Vec::new();
        let err = HttpClient::decode_into(b"not json", Some(&mut jobs)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HttpError>(),
            Some(HttpError::Decode(_))
        ));
    }

    #[test]
    fn target_stays_populated_when_the_status_check_fails() {
        // Decoding happens before the status check, a caller can therefore
        // end up with both a filled target and a status error.
        let body = br#"[{"name": "etl-1"}]"#;
        let mut jobs: Vec<Job> = Vec::new();

        HttpClient::decode_into(body, Some(&mut jobs)).unwrap();
        let check = HttpClient::expect_status(StatusCode::INTERNAL_SERVER_ERROR, &[StatusCode::OK]);

        assert!(check.is_err());
        assert_eq!(jobs[0].name, "etl-1");
    }

    #[test]
    fn errors_render_with_context() {
        let status = HttpError::Status(StatusCode::NOT_FOUND);
        assert_eq!(
            status.to_string(),
            "unexpected return code, got 404 Not Found"
        );

        let transport = HttpError::Transport("connection refused".to_owned());
        assert_eq!(transport.to_string(), "transport failure: connection refused");
    }
}
