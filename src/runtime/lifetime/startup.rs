use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::services::{CurriculumService, ProgressService};

pub struct StartupContext {
    pub progress: Arc<ProgressService>,
    pub curriculum: Arc<CurriculumService>,
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）与进度、课程服务
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();
    debug!(
        "Connecting to database {} (pool size {})",
        config.database.url, config.database.pool_size
    );

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let progress = Arc::new(ProgressService::with_defaults(storage.clone()));
    let curriculum = Arc::new(CurriculumService::new(storage.clone()));
    warn!("Progress and curriculum services initialized");

    StartupContext {
        progress,
        curriculum,
    }
}
