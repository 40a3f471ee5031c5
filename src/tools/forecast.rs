// Point forecast tool: single POST against the Windy point-forecast API.

use crate::args::ValidatedArgs;
use crate::catalog::{FieldSpec, FieldType, ToolDescriptor};
use crate::config::Credentials;
use crate::error::CallError;
use crate::protocol::CallToolResult;
use crate::tools::{pretty_body, ToolHandler, DEFAULT_API_BASE};
use serde::Deserialize;
use serde_json::json;
use url::Url;

pub struct ForecastTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
    base: Url,
}

impl ForecastTool {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base(
            client,
            Url::parse(DEFAULT_API_BASE).expect("default API base parses"),
        )
    }

    pub fn with_base(client: reqwest::Client, base: Url) -> Self {
        Self {
            descriptor: descriptor(),
            client,
            base,
        }
    }
}

fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: "get_point_forecast",
        description: "Get weather forecast data for a specific location using Windy.com API",
        fields: vec![
            FieldSpec::required("lat", FieldType::Number, "Latitude of the location"),
            FieldSpec::required("lon", FieldType::Number, "Longitude of the location"),
            FieldSpec::optional(
                "model",
                FieldType::Text,
                "Forecast model (e.g., gfs, ecmwf, iconEu). Defaults to gfs.",
                json!("gfs"),
            ),
            FieldSpec::optional(
                "parameters",
                FieldType::TextList,
                "List of weather parameters (e.g., temp, wind, rain, clouds). Defaults to common set.",
                json!(["temp", "wind", "rain", "clouds"]),
            ),
            FieldSpec::optional(
                "levels",
                FieldType::TextList,
                "List of levels (e.g., surface, 850h). Defaults to surface.",
                json!(["surface"]),
            ),
        ],
    }
}

#[derive(Debug, Deserialize)]
struct ForecastArgs {
    lat: f64,
    lon: f64,
    model: String,
    parameters: Vec<String>,
    levels: Vec<String>,
}

#[async_trait::async_trait]
impl ToolHandler for ForecastTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn call(
        &self,
        args: ValidatedArgs,
        credentials: &Credentials,
    ) -> Result<CallToolResult, CallError> {
        let key = credentials
            .point_forecast
            .as_deref()
            .ok_or(CallError::CredentialNotConfigured {
                capability: "Point Forecast",
            })?;

        let args: ForecastArgs = args.decode()?;

        let url = self
            .base
            .join("/api/point-forecast/v2")
            .map_err(|e| CallError::Remote(e.to_string()))?;
        let body = json!({
            "lat": args.lat,
            "lon": args.lon,
            "model": args.model,
            "parameters": args.parameters,
            "levels": args.levels,
            "key": key,
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CallError::Remote(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CallError::Remote(e.to_string()))?;

        if !status.is_success() {
            return Err(CallError::Remote(format!(
                "forecast request failed with status {}: {}",
                status.as_u16(),
                text
            )));
        }

        Ok(CallToolResult::text(pretty_body(&text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::validate;
    use crate::protocol::ToolContent;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool(server: &MockServer) -> ForecastTool {
        let client = reqwest::Client::new();
        ForecastTool::with_base(client, Url::parse(&server.uri()).unwrap())
    }

    fn credentials() -> Credentials {
        Credentials {
            point_forecast: Some("test_key".to_string()),
            webcams: None,
        }
    }

    fn validated(raw: serde_json::Value) -> ValidatedArgs {
        validate(&descriptor(), &raw).unwrap()
    }

    #[tokio::test]
    async fn sends_defaults_when_optionals_omitted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/point-forecast/v2"))
            .and(body_json(json!({
                "lat": 48.8566,
                "lon": 2.3522,
                "model": "gfs",
                "parameters": ["temp", "wind", "rain", "clouds"],
                "levels": ["surface"],
                "key": "test_key",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "success" })))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server)
            .call(validated(json!({ "lat": 48.8566, "lon": 2.3522 })), &credentials())
            .await
            .unwrap();

        let ToolContent::Text { text } = &result.content[0];
        assert_eq!(text, "{\n  \"result\": \"success\"\n}");
    }

    #[tokio::test]
    async fn explicit_values_are_not_overridden() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/point-forecast/v2"))
            .and(body_json(json!({
                "lat": 48.8566,
                "lon": 2.3522,
                "model": "ecmwf",
                "parameters": ["temp", "wind"],
                "levels": ["surface"],
                "key": "test_key",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "success" })))
            .expect(1)
            .mount(&server)
            .await;

        tool(&server)
            .call(
                validated(json!({
                    "lat": 48.8566,
                    "lon": 2.3522,
                    "model": "ecmwf",
                    "parameters": ["temp", "wind"],
                })),
                &credentials(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = tool(&server)
            .call(
                validated(json!({ "lat": 1.0, "lon": 2.0 })),
                &Credentials::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CallError::CredentialNotConfigured { capability: "Point Forecast" }
        ));
    }

    #[tokio::test]
    async fn non_2xx_is_a_remote_failure_without_retry() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/point-forecast/v2"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "error": "upstream down" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = tool(&server)
            .call(validated(json!({ "lat": 1.0, "lon": 2.0 })), &credentials())
            .await
            .unwrap_err();

        match err {
            CallError::Remote(detail) => {
                assert!(detail.contains("500"));
                assert!(detail.contains("upstream down"));
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }
}
