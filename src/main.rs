use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use playdeck::api::OembedService;
use playdeck::config::AppConfig;
use playdeck::internal::comments::CommentStore;
use playdeck::internal::videos::VideoStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first to get logging settings.
    let config = AppConfig::load();

    // If RUST_LOG is set, it takes precedence. Otherwise, build from config.
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::EnvFilter::from_default_env(),
        Err(_) => tracing_subscriber::EnvFilter::new(config.logging.level.clone()),
    };

    // Log to a daily rotating file when a log directory is configured, to
    // stderr otherwise. The guard must outlive main so buffered lines flush.
    let _guard = match config.logging.log_directory.as_deref() {
        Some(log_dir) => {
            let file_appender = tracing_appender::rolling::daily(log_dir, "playdeck.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(non_blocking)
                .with_ansi(false)
                .compact()
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
            None
        }
    };

    let data_dir = config.data_directory.clone().map(PathBuf::from);
    let comments = CommentStore::load_or_create(data_dir)?;
    info!(count = comments.comments.len(), "comment store ready");

    let api = OembedService::new();
    let mut videos = VideoStore::from_config(&config);
    videos.init_playlist(&api).await;

    let active = videos.active_video();
    println!("Now playing: {} [{}]", active.title, active.duration);
    println!(
        "Playlist ({} of {} videos resolved, autoplay {}):",
        videos.videos.len(),
        config.playlist_ids.len(),
        if videos.is_autoplay { "on" } else { "off" }
    );
    for video in &videos.videos {
        println!("  {}  {}", video.id, video.title);
    }
    println!("{} comment(s) loaded", comments.comments.len());

    Ok(())
}
