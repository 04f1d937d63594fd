mod layout;
mod participant;

pub use layout::{Column, ColumnLayout, ColumnNames};
pub use participant::{Participant, WinStatus};
