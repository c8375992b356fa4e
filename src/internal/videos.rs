use futures::future::join_all;
use tracing::{info, warn};

use super::models::VideoMetadata;
use crate::api::OembedService;
use crate::config::AppConfig;

/// Playlist state: the configured ids, what is currently playing, and the
/// metadata resolved so far.
///
/// All mutation happens on the single control thread; the `loading` flag is
/// the only guard against overlapping playlist fetches.
#[derive(Debug)]
pub struct VideoStore {
    pub current_id: String,
    pub videos: Vec<VideoMetadata>,
    pub loading: bool,
    pub is_autoplay: bool,
    playlist_ids: Vec<String>,
}

impl VideoStore {
    pub fn new(playlist_ids: Vec<String>, current_id: String, autoplay: bool) -> Self {
        Self {
            current_id,
            videos: Vec::new(),
            loading: false,
            is_autoplay: autoplay,
            playlist_ids,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.playlist_ids.clone(),
            config.default_video.clone(),
            config.autoplay,
        )
    }

    /// Metadata for the current selection. Until its fetch lands (or if it
    /// never does) this synthesizes a placeholder record so callers always
    /// have something to render.
    pub fn active_video(&self) -> VideoMetadata {
        self.videos
            .iter()
            .find(|v| v.id == self.current_id)
            .cloned()
            .unwrap_or_else(|| VideoMetadata {
                id: self.current_id.clone(),
                title: "Processando...".to_string(),
                duration: "00:00".to_string(),
                thumbnail: String::new(),
                description: "Carregando detalhes do conteúdo...".to_string(),
            })
    }

    /// Resolve metadata for every playlist id, all fetches in flight at once.
    ///
    /// Each fetch is independently fault-tolerant: a failure is logged and
    /// drops that id from the result, so `videos` ends up with whatever
    /// subset of the playlist actually resolved, in playlist order. Re-entrant
    /// calls while a fetch is in flight are no-ops.
    pub async fn init_playlist(&mut self, api: &OembedService) {
        if self.loading {
            return;
        }
        self.loading = true;

        let fetches = self.playlist_ids.iter().map(|id| async move {
            match api.fetch_video_metadata(id).await {
                Ok(metadata) => Some(metadata),
                Err(err) => {
                    warn!(video_id = %id, error = %err, "failed to fetch video metadata");
                    None
                }
            }
        });
        let results = join_all(fetches).await;

        self.videos = results.into_iter().flatten().collect();
        info!(
            resolved = self.videos.len(),
            configured = self.playlist_ids.len(),
            "playlist initialized"
        );
        self.loading = false;
    }

    /// Switch the current selection. No validation against `videos`: the
    /// caller may select an id whose metadata has not resolved yet, in which
    /// case `active_video` serves the placeholder.
    pub fn set_current_video(&mut self, id: &str) {
        self.current_id = id.to_string();
    }

    pub fn toggle_autoplay(&mut self) {
        self.is_autoplay = !self.is_autoplay;
    }
}
