// Webcam search tool: v3 API with a legacy v2 fallback.
//
// The two tiers use different auth header names. When both fail, the error
// carries both failure details since either layer may be the real cause.

use crate::args::ValidatedArgs;
use crate::catalog::{FieldSpec, FieldType, ToolDescriptor};
use crate::config::Credentials;
use crate::error::CallError;
use crate::protocol::CallToolResult;
use crate::tools::{pretty_body, ToolHandler, DEFAULT_API_BASE};
use serde::Deserialize;
use serde_json::json;
use url::Url;

const V3_HEADER: &str = "x-windy-api-key";
const V2_HEADER: &str = "x-windy-key";

pub struct WebcamsTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
    base: Url,
}

impl WebcamsTool {
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

    /// Run one request; the error side is the failure detail to report:
    /// the response body when a status was received, otherwise the
    /// transport error message.
    async fn attempt(&self, request: reqwest::RequestBuilder) -> Result<String, String> {
        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        let text = response.text().await.map_err(|e| e.to_string())?;
        if status.is_success() {
            Ok(text)
        } else if text.is_empty() {
            Err(format!("status {}", status.as_u16()))
        } else {
            Err(text)
        }
    }
}

fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: "get_webcams",
        description: "Find webcams near a specific location using Windy.com API",
        fields: vec![
            FieldSpec::required("lat", FieldType::Number, "Latitude of the location"),
            FieldSpec::required("lon", FieldType::Number, "Longitude of the location"),
            FieldSpec::optional(
                "radius",
                FieldType::Number,
                "Search radius in kilometers. Defaults to 30.",
                json!(30),
            ),
        ],
    }
}

#[derive(Debug, Deserialize)]
struct WebcamsArgs {
    lat: f64,
    lon: f64,
    radius: f64,
}

#[async_trait::async_trait]
impl ToolHandler for WebcamsTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn call(
        &self,
        args: ValidatedArgs,
        credentials: &Credentials,
    ) -> Result<CallToolResult, CallError> {
        let key = credentials
            .webcams
            .as_deref()
            .ok_or(CallError::CredentialNotConfigured {
                capability: "Webcams",
            })?;

        let args: WebcamsArgs = args.decode()?;
        let nearby = format!("{},{},{}", args.lat, args.lon, args.radius);

        let v3_url = self
            .base
            .join("/webcams/api/v3/webcams")
            .map_err(|e| CallError::Remote(e.to_string()))?;
        let v3 = self
            .attempt(
                self.client
                    .get(v3_url)
                    .query(&[("nearby", nearby.as_str()), ("include", "images")])
                    .header(V3_HEADER, key),
            )
            .await;

        let v3_detail = match v3 {
            Ok(body) => return Ok(CallToolResult::text(pretty_body(&body))),
            Err(detail) => detail,
        };
        tracing::warn!(detail = %v3_detail, "webcams v3 request failed, trying v2");

        // Legacy endpoint embeds the nearby filter in the path.
        let v2_url = self
            .base
            .join(&format!("/api/webcams/v2/list/nearby={nearby}"))
            .map_err(|e| CallError::Remote(e.to_string()))?;
        match self.attempt(self.client.get(v2_url).header(V2_HEADER, key)).await {
            Ok(body) => Ok(CallToolResult::text(pretty_body(&body))),
            Err(v2_detail) => Err(CallError::WebcamsUnavailable {
                v3: v3_detail,
                v2: v2_detail,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::validate;
    use crate::protocol::ToolContent;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool(server: &MockServer) -> WebcamsTool {
        let client = reqwest::Client::new();
        WebcamsTool::with_base(client, Url::parse(&server.uri()).unwrap())
    }

    fn credentials() -> Credentials {
        Credentials {
            point_forecast: None,
            webcams: Some("test_key".to_string()),
        }
    }

    fn validated(raw: serde_json::Value) -> ValidatedArgs {
        validate(&descriptor(), &raw).unwrap()
    }

    #[tokio::test]
    async fn v3_request_carries_nearby_filter_and_auth_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/webcams/api/v3/webcams"))
            .and(query_param("nearby", "48.8566,2.3522,50"))
            .and(query_param("include", "images"))
            .and(header(V3_HEADER, "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "webcams" })))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server)
            .call(
                validated(json!({ "lat": 48.8566, "lon": 2.3522, "radius": 50 })),
                &credentials(),
            )
            .await
            .unwrap();

        let ToolContent::Text { text } = &result.content[0];
        assert_eq!(text, "{\n  \"result\": \"webcams\"\n}");
    }

    #[tokio::test]
    async fn default_radius_is_30() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/webcams/api/v3/webcams"))
            .and(query_param("nearby", "48.8566,2.3522,30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        tool(&server)
            .call(validated(json!({ "lat": 48.8566, "lon": 2.3522 })), &credentials())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn falls_back_to_v2_with_same_coordinates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/webcams/api/v3/webcams"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "bad key" })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/webcams/v2/list/nearby=48.8566,2.3522,50"))
            .and(header(V2_HEADER, "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "legacy" })))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server)
            .call(
                validated(json!({ "lat": 48.8566, "lon": 2.3522, "radius": 50 })),
                &credentials(),
            )
            .await
            .unwrap();

        let ToolContent::Text { text } = &result.content[0];
        assert_eq!(text, "{\n  \"result\": \"legacy\"\n}");
    }

    #[tokio::test]
    async fn dual_failure_reports_both_details() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/webcams/api/v3/webcams"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "v3 down" })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/webcams/v2/list/nearby=1,2,30"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "v2 down" })))
            .expect(1)
            .mount(&server)
            .await;

        let err = tool(&server)
            .call(validated(json!({ "lat": 1, "lon": 2 })), &credentials())
            .await
            .unwrap_err();

        let text = err.to_string();
        assert!(text.starts_with("Webcams API failed."));
        assert!(text.contains("v3 down"));
        assert!(text.contains("v2 down"));
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
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
            CallError::CredentialNotConfigured { capability: "Webcams" }
        ));
    }
}
