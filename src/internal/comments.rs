use anyhow::{Context, Result};
use jiff::Timestamp;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use super::models::{Comment, Reply};

/// Identity attached to every locally written comment and reply.
const AUTHOR_NAME: &str = "Leonardo Firme";
const AUTHOR_AVATAR: &str = "https://github.com/LeonardoFirme.png";

/// The `_v2` suffix is the only schema-migration mechanism: a breaking
/// change to the persisted shape gets a new file name.
const COMMENTS_FILE: &str = "comments_v2.json";

/// Owns the full comment tree and its on-disk copy.
///
/// Every mutating operation writes the whole list back to disk before
/// returning, so the file always mirrors memory. Lookup misses (unknown
/// comment or reply ids) are silent no-ops and skip the write.
#[derive(Debug, Default)]
pub struct CommentStore {
    pub comments: Vec<Comment>,
    file_path: Option<PathBuf>,
    last_id: i64,
}

impl CommentStore {
    /// An empty, unpersisted store. `save` is skipped until a file path is set,
    /// which makes this the natural constructor for unit tests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the comments file under `data_dir` (or the OS config directory)
    /// and load it, seeding a default comment when no file exists yet.
    pub fn load_or_create(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match data_dir {
            Some(dir) => dir,
            None => dirs::config_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
                .join("playdeck"),
        };

        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
            info!(data_dir = %dir.display(), "Created data directory for comments");
        }

        Self::load_from(dir.join(COMMENTS_FILE))
    }

    /// Load the comment tree from an explicit file path.
    ///
    /// A present-but-malformed file is a hard error: silently discarding a
    /// user's comment history would be worse than failing loudly.
    pub fn load_from(file_path: PathBuf) -> Result<Self> {
        let comments = match file_path.exists() {
            true => {
                let content = fs::read_to_string(&file_path)
                    .with_context(|| format!("Failed to read {}", file_path.display()))?;
                let comments: Vec<Comment> = serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", file_path.display()))?;
                info!(comments_file = %file_path.display(), count = comments.len(), "Loaded comments from file");
                comments
            }
            false => {
                info!(comments_file = %file_path.display(), "No comments file found, seeding default comment");
                Self::seed()
            }
        };

        // Resume id generation past everything already on disk.
        let last_id = comments
            .iter()
            .flat_map(|c| std::iter::once(c.id).chain(c.replies.iter().map(|r| r.id)))
            .max()
            .unwrap_or(0);

        Ok(Self {
            comments,
            file_path: Some(file_path),
            last_id,
        })
    }

    fn seed() -> Vec<Comment> {
        vec![Comment {
            id: 1,
            author: AUTHOR_NAME.to_string(),
            avatar: AUTHOR_AVATAR.to_string(),
            text: "A precisão deste layout com Tailwind v4 é incrível. O modo dark ficou impecável!"
                .to_string(),
            likes: 1200,
            is_liked: false,
            time: "há 2 horas".to_string(),
            replies: Vec::new(),
        }]
    }

    /// Write the full comment list back to disk. The tree is small enough that
    /// a whole-file rewrite per mutation is cheaper than tracking deltas.
    pub fn save(&self) -> Result<()> {
        match &self.file_path {
            Some(path) => {
                let content = serde_json::to_string_pretty(&self.comments)
                    .context("Failed to serialize comments")?;
                fs::write(path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            None => {
                info!("CommentStore.save() called but no file_path is set; skipping write");
            }
        }
        Ok(())
    }

    /// Ids are milliseconds since the epoch, bumped past the previous id so
    /// two calls inside the same millisecond still get distinct ordered ids.
    fn next_id(&mut self) -> i64 {
        let now = Timestamp::now().as_millisecond();
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    /// Prepend a new comment and return its id.
    pub fn add_comment(&mut self, text: &str) -> Result<i64> {
        let id = self.next_id();
        let comment = Comment {
            id,
            author: AUTHOR_NAME.to_string(),
            avatar: AUTHOR_AVATAR.to_string(),
            text: text.to_string(),
            likes: 0,
            is_liked: false,
            time: "agora".to_string(),
            replies: Vec::new(),
        };
        self.comments.insert(0, comment);
        self.save()?;
        Ok(id)
    }

    /// Flip the liked flag on a comment, moving the counter with it.
    pub fn toggle_like(&mut self, id: i64) -> Result<()> {
        let Some(comment) = self.comments.iter_mut().find(|c| c.id == id) else {
            return Ok(());
        };
        match comment.is_liked {
            true => {
                comment.likes = comment.likes.saturating_sub(1);
                comment.is_liked = false;
            }
            false => {
                comment.likes += 1;
                comment.is_liked = true;
            }
        }
        self.save()
    }

    /// Remove a comment (and its whole reply thread) by id.
    pub fn delete_comment(&mut self, id: i64) -> Result<()> {
        let before = self.comments.len();
        self.comments.retain(|c| c.id != id);
        match self.comments.len() < before {
            true => self.save(),
            false => Ok(()),
        }
    }

    /// Append a reply to an existing comment and return the reply id.
    /// Returns `None` without saving when the parent comment is gone.
    pub fn add_reply(&mut self, comment_id: i64, text: &str) -> Result<Option<i64>> {
        let Some(idx) = self.comments.iter().position(|c| c.id == comment_id) else {
            return Ok(None);
        };
        let id = self.next_id();
        self.comments[idx].replies.push(Reply {
            id,
            author: AUTHOR_NAME.to_string(),
            avatar: AUTHOR_AVATAR.to_string(),
            text: text.to_string(),
            time: "agora".to_string(),
        });
        self.save()?;
        Ok(Some(id))
    }

    /// Remove one reply from a comment's thread.
    pub fn delete_reply(&mut self, comment_id: i64, reply_id: i64) -> Result<()> {
        let Some(comment) = self.comments.iter_mut().find(|c| c.id == comment_id) else {
            return Ok(());
        };
        let before = comment.replies.len();
        comment.replies.retain(|r| r.id != reply_id);
        match comment.replies.len() < before {
            true => self.save(),
            false => Ok(()),
        }
    }
}
