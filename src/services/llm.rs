use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

/// Fixed instructional template wrapped around every question before it is
/// forwarded. The hosted model does its own ticker/year extraction; nothing
/// is parsed out of the question locally.
const PROMPT_TEMPLATE: &str = "Given the following query, extract the relevant stock ticker \
(e.g., 'AAPL' for Apple) and year(s) if mentioned, and generate a response:";

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    response: String,
}

/// Question-answering gateway: one outbound call per question, no retry, no
/// streaming, no conversation state.
pub struct LlmClient<'a> {
    http: &'a reqwest::Client,
    api_url: &'a str,
    api_key: &'a str,
}

impl<'a> LlmClient<'a> {
    pub fn new(http: &'a reqwest::Client, api_url: &'a str, api_key: &'a str) -> Self {
        Self {
            http,
            api_url,
            api_key,
        }
    }

    pub fn build_prompt(question: &str) -> String {
        format!("{} '{}'", PROMPT_TEMPLATE, question)
    }

    /// Forward the question and relay the model's answer. Non-success status
    /// is an upstream failure; an empty answer is reported as not found.
    pub async fn ask(&self, question: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.api_url)
            .bearer_auth(self.api_key)
            .json(&json!({ "query": Self::build_prompt(question) }))
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "LLM endpoint returned an error");
            return Err(ApiError::bad_gateway(format!(
                "LLM API error: {}",
                response.status()
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|_| ApiError::bad_gateway("Malformed LLM response"))?;

        let answer = completion.response.trim().to_string();
        if answer.is_empty() {
            return Err(ApiError::not_found("The language model could not process the query"));
        }

        Ok(answer)
    }
}
