pub mod cache;
pub mod comments;
pub mod models;
pub mod videos;
