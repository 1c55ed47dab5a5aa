//! Domain rules for the parish directory, free of I/O.

pub mod calendar;
pub mod content;
pub mod directory;
pub mod enums;
pub mod error;
pub mod household;
pub mod member;
pub mod ministry;
pub mod notification;
pub mod roles;
pub mod sacrament;
pub mod types;
pub mod upload;
