pub mod featured;
pub mod misc;
pub mod search;
pub mod session;

pub use featured::featured_repository;
pub use misc::{display_banner, generate_completions};
pub use search::search_everything;
pub use session::run_session;
