//! Shared application state.

use std::sync::Arc;

use whyd_consent::ConsentBlocks;
use whyd_core::WhydConfig;

use crate::analytics::VisitRecorder;
use crate::auth::LoginCheck;
use crate::template::PageTemplate;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: WhydConfig,
    /// Rendered consent text, built once before serving.
    pub consent_blocks: Arc<ConsentBlocks>,
    pub login: Arc<dyn LoginCheck>,
    pub template: Arc<dyn PageTemplate>,
    pub visits: Arc<dyn VisitRecorder>,
}

impl AppState {
    pub fn new(
        config: WhydConfig,
        consent_blocks: ConsentBlocks,
        login: Arc<dyn LoginCheck>,
        template: Arc<dyn PageTemplate>,
        visits: Arc<dyn VisitRecorder>,
    ) -> Self {
        Self {
            config,
            consent_blocks: Arc::new(consent_blocks),
            login,
            template,
            visits,
        }
    }
}
