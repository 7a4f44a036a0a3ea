use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{CodeReviewService, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub code_review: Arc<dyn CodeReviewService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        code_review: Arc<dyn CodeReviewService>,
    ) -> Self {
        Self {
            config,
            version_control,
            code_review,
        }
    }
}
