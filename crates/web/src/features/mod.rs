pub mod admin;
pub mod draw;
pub mod registration;
