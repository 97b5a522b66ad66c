pub mod listing;
pub mod player;
pub mod session;
pub mod team;
pub mod user;

pub use listing::*;
pub use player::*;
pub use session::*;
pub use team::*;
pub use user::*;
