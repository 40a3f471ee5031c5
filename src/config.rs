// Credential resolution for the Windy API capability groups.

pub const POINT_FORECAST_KEY_VAR: &str = "WINDY_POINT_FORECAST_KEY";
pub const WEBCAMS_KEY_VAR: &str = "WINDY_WEBCAMS_KEY";
pub const SHARED_KEY_VAR: &str = "WINDY_API_KEY";

/// API keys for the two Windy capability groups. Threaded into every
/// dispatch as a read-only value; a missing key is a request-time failure
/// for the tool that needs it, not a startup failure.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub point_forecast: Option<String>,
    pub webcams: Option<String>,
}

impl Credentials {
    /// Resolve each capability from its own variable, falling back to the
    /// shared key. Fails only when both capabilities end up unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let shared = read_var(SHARED_KEY_VAR);
        let credentials = Self {
            point_forecast: read_var(POINT_FORECAST_KEY_VAR).or_else(|| shared.clone()),
            webcams: read_var(WEBCAMS_KEY_VAR).or(shared),
        };

        if credentials.point_forecast.is_none() && credentials.webcams.is_none() {
            anyhow::bail!(
                "{} or {} (or {}) environment variable is required",
                POINT_FORECAST_KEY_VAR,
                WEBCAMS_KEY_VAR,
                SHARED_KEY_VAR
            );
        }

        Ok(credentials)
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
