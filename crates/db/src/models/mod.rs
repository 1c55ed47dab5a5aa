//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Enum-valued columns are plain `String`s on row structs (the database
//! `CHECK` constraints guarantee the value set) and typed
//! [`parish_core`] enums on DTOs so bad input fails at deserialization.

pub mod content;
pub mod event;
pub mod family;
pub mod gallery;
pub mod house;
pub mod member;
pub mod ministry;
pub mod notification;
pub mod page;
pub mod sacrament;
pub mod setting;
pub mod user;
