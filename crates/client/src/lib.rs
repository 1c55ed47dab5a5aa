//! Parish Client - typed HTTP client for the parish admin API.
//!
//! All authenticated calls go through a [`Session`], which owns the bearer
//! token. A 401 on any call other than login ends the session.

pub mod batch;
pub mod config;
pub mod directory;
pub mod error;
pub mod http;
pub mod session;
pub mod types;
pub mod upload;

pub use batch::BatchReport;
pub use config::ClientConfig;
pub use directory::MemberQuery;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use session::Session;
pub use upload::{UploadFile, UploadProgress};
