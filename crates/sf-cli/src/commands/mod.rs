pub mod chat;
pub mod scenes;
pub mod story;
