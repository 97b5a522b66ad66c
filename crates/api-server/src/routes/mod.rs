pub mod iam;
pub mod player;
pub mod team;
pub mod transfer;
pub mod user;
