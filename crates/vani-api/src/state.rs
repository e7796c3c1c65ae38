//! Application state shared by all handlers.
//!
//! Nothing in here is mutated after startup; handlers receive it as `State<Arc<AppState>>`.

use sqlx::PgPool;
use vani_core::Config;
use vani_db::{DatabaseInfoRepository, PlaylistRepository, VideoRepository};

/// Repositories sharing one connection pool.
#[derive(Clone)]
pub struct DbState {
    pub video_repository: VideoRepository,
    pub playlist_repository: PlaylistRepository,
    pub info_repository: DatabaseInfoRepository,
}

impl DbState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            video_repository: VideoRepository::new(pool.clone()),
            playlist_repository: PlaylistRepository::new(pool.clone()),
            info_repository: DatabaseInfoRepository::new(pool),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DbState,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        Self {
            config,
            db: DbState::new(pool),
        }
    }
}
