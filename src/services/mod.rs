pub mod history;
pub mod providers;
pub mod reply;
pub mod uploads;

pub use history::ConversationHistory;
pub use reply::ReplyGenerator;
pub use uploads::UploadStore;
