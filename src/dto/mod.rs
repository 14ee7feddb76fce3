pub mod catalog;
pub mod intake;
