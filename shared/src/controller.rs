use crate::utils::error_response;
use lambda_http::http::StatusCode;
use lambda_http::{Error, Request, RequestExt, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;

/// Platform-neutral view of an inbound request handed to every use case.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExecuteParams {
    pub body: Option<Value>,
    pub path_parameters: HashMap<String, String>,
    pub query_string_parameters: HashMap<String, String>,
}

impl ExecuteParams {
    /// Empty values count as absent.
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn with_path_parameter(mut self, name: &str, value: &str) -> Self {
        self.path_parameters
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl TryFrom<&Request> for ExecuteParams {
    type Error = serde_json::Error;

    fn try_from(event: &Request) -> Result<Self, Self::Error> {
        let raw_body: &[u8] = event.body();
        let body = if raw_body.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(raw_body)?)
        };

        let path_parameters = event
            .path_parameters()
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let query_string_parameters = event
            .query_string_parameters()
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Ok(Self {
            body,
            path_parameters,
            query_string_parameters,
        })
    }
}

/// Adapts a Lambda HTTP event to `use_case` and turns any failure into a 500 response.
pub async fn handle<F, Fut>(event: Request, use_case: F) -> Result<Response<String>, Error>
where
    F: FnOnce(ExecuteParams) -> Fut,
    Fut: Future<Output = Result<Response<String>, Error>>,
{
    tracing::info!("Received event: {:?}", event);

    let result = match ExecuteParams::try_from(&event) {
        Ok(params) => use_case(params).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(response) => Ok(response),
        Err(e) => {
            tracing::error!("Request failed: {:?}", e);
            error_response(&e.to_string(), &StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
