//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod content_item_repo;
pub mod event_repo;
pub mod person_repo;

pub use content_item_repo::ContentItemRepo;
pub use event_repo::EventRepo;
pub use person_repo::PersonRepo;
