pub mod diff;
pub mod generate;
pub mod list;
pub mod source;
