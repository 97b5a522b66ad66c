pub mod listing_repository;
pub mod player_repository;
pub mod session_repository;
pub mod team_repository;
pub mod user_repository;

pub use listing_repository::*;
pub use player_repository::*;
pub use session_repository::*;
pub use team_repository::*;
pub use user_repository::*;
