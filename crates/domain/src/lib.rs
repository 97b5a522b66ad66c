pub mod auth;
pub mod entities;
pub mod errors;
pub mod object_id;
pub mod password;
pub mod repositories;
pub mod services;

#[cfg(test)]
mod test_support;

pub use auth::*;
pub use entities::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
