pub mod content;
pub mod people;
