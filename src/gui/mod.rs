mod app;
mod files;
mod message;
mod screens;
mod state;
mod widgets;

pub use app::{RwaApp, run};
pub use message::Message;
pub use state::AppState;
