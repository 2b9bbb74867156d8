//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row, plus the DTOs used for writes. Rows holding workflow enums
//! convert into their `reelflow_core` counterparts with `TryFrom`.

pub mod content_item;
pub mod event;
pub mod person;
