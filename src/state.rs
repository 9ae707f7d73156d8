use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::database::RedisStore;
use crate::menus::MenuLocks;

pub struct AppState {
    pub config: Config,
    pub store: RedisStore,
    pub menu_locks: MenuLocks,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        info!("Connecting to Redis at {}", config.redis_url);
        let store = RedisStore::connect(&config.redis_url).await;

        Arc::new(Self {
            config,
            store,
            menu_locks: MenuLocks::new(),
        })
    }
}
