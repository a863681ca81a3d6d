pub mod deletion;
pub mod user;
