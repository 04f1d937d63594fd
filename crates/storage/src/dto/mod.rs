pub mod draw;
pub mod participant;
pub mod session;
