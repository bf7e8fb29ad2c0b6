pub mod leave;
pub mod login;
pub mod manager;
