pub mod chat;
pub mod health;
pub mod upload;

pub use chat::chat;
pub use health::health_check;
pub use upload::upload;
