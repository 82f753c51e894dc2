use crate::{ApiSettings, AppConstants, LoggingSettings, RawSettings, SecretSettings};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
    pub constants: AppConstants,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        let mut api = raw.api;
        api.public_url = api.public_url.trim_end_matches('/').to_owned();
        api.allowed_origins.retain(|origin| !origin.trim().is_empty());

        Self {
            api,
            logging: raw.logging,
            secrets: raw.secrets,
            constants: raw.constants.into(),
        }
    }
}
