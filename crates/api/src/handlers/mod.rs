pub mod auth;
pub mod content;
pub mod events;
pub mod families;
pub mod gallery;
pub mod houses;
pub mod members;
pub mod ministries;
pub mod notifications;
pub mod sacraments;
pub mod settings;
pub mod upload;
pub mod users;
