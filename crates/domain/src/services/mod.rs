pub mod auth_service;
pub mod market_service;
pub mod player_service;
pub mod team_service;
pub mod transfer_service;
pub mod user_service;

pub use auth_service::*;
pub use market_service::*;
pub use player_service::*;
pub use team_service::*;
pub use transfer_service::*;
pub use user_service::*;
