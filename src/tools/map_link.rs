// Map link tool: builds a windy.com URL, no network involved.

use crate::args::ValidatedArgs;
use crate::catalog::{FieldSpec, FieldType, ToolDescriptor};
use crate::config::Credentials;
use crate::error::CallError;
use crate::protocol::CallToolResult;
use crate::tools::ToolHandler;
use serde::Deserialize;
use serde_json::json;

const MAP_HOST: &str = "https://www.windy.com";

pub struct MapLinkTool {
    descriptor: ToolDescriptor,
}

impl MapLinkTool {
    pub fn new() -> Self {
        Self {
            descriptor: descriptor(),
        }
    }
}

impl Default for MapLinkTool {
    fn default() -> Self {
        Self::new()
    }
}

fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: "get_map_link",
        description: "Generate a Windy.com map URL for visualization",
        fields: vec![
            FieldSpec::required("lat", FieldType::Number, "Latitude"),
            FieldSpec::required("lon", FieldType::Number, "Longitude"),
            FieldSpec::optional(
                "zoom",
                FieldType::Number,
                "Zoom level (1-19). Defaults to 10.",
                json!(10),
            ),
            FieldSpec::optional(
                "layer",
                FieldType::Text,
                "Map layer (e.g., wind, rain, temp). Defaults to wind.",
                json!("wind"),
            ),
        ],
    }
}

#[derive(Debug, Deserialize)]
struct MapLinkArgs {
    lat: f64,
    lon: f64,
    zoom: f64,
    layer: String,
}

#[async_trait::async_trait]
impl ToolHandler for MapLinkTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn call(
        &self,
        args: ValidatedArgs,
        _credentials: &Credentials,
    ) -> Result<CallToolResult, CallError> {
        let args: MapLinkArgs = args.decode()?;

        // Windy uses a comma-joined suffix, not a standard query string.
        let url = format!(
            "{}/?{},{},{},{}",
            MAP_HOST, args.layer, args.lat, args.lon, args.zoom
        );

        Ok(CallToolResult::text(format!("Windy Map URL: {url}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::validate;
    use crate::protocol::ToolContent;

    async fn link_for(raw: serde_json::Value) -> String {
        let args = validate(&descriptor(), &raw).unwrap();
        let result = MapLinkTool::new()
            .call(args, &Credentials::default())
            .await
            .unwrap();
        let ToolContent::Text { text } = &result.content[0];
        text.clone()
    }

    #[tokio::test]
    async fn builds_comma_joined_url() {
        let text = link_for(json!({
            "lat": 48.8566,
            "lon": 2.3522,
            "zoom": 10,
            "layer": "wind",
        }))
        .await;
        assert!(text.contains("https://www.windy.com/?wind,48.8566,2.3522,10"));
        assert!(text.starts_with("Windy Map URL: "));
    }

    #[tokio::test]
    async fn applies_zoom_and_layer_defaults() {
        let text = link_for(json!({ "lat": 51.5074, "lon": -0.1278 })).await;
        assert!(text.contains("https://www.windy.com/?wind,51.5074,-0.1278,10"));
    }

    #[tokio::test]
    async fn no_credential_is_required() {
        // Credentials::default() above is the empty set; reaching here at
        // all proves the tool never consults it.
        let text = link_for(json!({ "lat": 0.0, "lon": 0.0 })).await;
        assert!(text.contains("wind,0,0,10"));
    }
}
