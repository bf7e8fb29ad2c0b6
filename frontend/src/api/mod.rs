mod auth;
pub mod client;
mod leaves;
pub mod types;

pub use auth::decode_claims;
pub use client::*;
pub use types::*;

#[cfg(test)]
pub mod test_support;
