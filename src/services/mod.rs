pub mod lyrics;
pub mod providers;
pub mod responses;

pub use lyrics::LyricsService;
pub use providers::{GeniusProvider, LyricsProvider};
pub use responses::{CannedResponses, MessagePicker, ResponseCategory};
