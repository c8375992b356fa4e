use serde::{Deserialize, Serialize};

/// A single reply inside a comment thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: i64,
    pub author: String,
    pub avatar: String,
    pub text: String,
    pub time: String,
}

/// A top-level comment together with its ordered reply thread.
///
/// `likes` and `is_liked` only move together through
/// [`CommentStore::toggle_like`](super::comments::CommentStore::toggle_like);
/// nothing else writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub author: String,
    pub avatar: String,
    pub text: String,
    pub likes: u32,
    pub is_liked: bool,
    pub time: String,
    pub replies: Vec<Reply>,
}

/// Resolved metadata for one playlist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub duration: String,
    pub thumbnail: String,
    pub description: String,
}
