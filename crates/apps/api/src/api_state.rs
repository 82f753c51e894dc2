use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::database::MovieStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn MovieStore>,
    pub settings: AppSettings,
}

// Lets handlers and extractors pull out only the part of the state they need.
impl FromRef<ApiContext> for Arc<dyn MovieStore> {
    fn from_ref(state: &ApiContext) -> Self {
        Arc::clone(&state.store)
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}
