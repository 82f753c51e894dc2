use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;

pub fn load_app_settings() -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite the db url from env.
    dotenv::from_path(".env").ok();
    load_settings_from_path(Path::new("config/settings.yaml"), true)
}

/// Loads settings from a yaml file, optionally layering `APP__SECTION__KEY` environment
/// variables on top.
pub fn load_settings_from_path(path: &Path, use_env: bool) -> Result<AppSettings> {
    let config_path = path.canonicalize()?;
    let mut builder = config::Config::builder().add_source(config::File::from(config_path));
    if use_env {
        builder = builder.add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("api.allowed_origins")
                .try_parsing(true),
        );
    }

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    Ok(raw_settings.into())
}
