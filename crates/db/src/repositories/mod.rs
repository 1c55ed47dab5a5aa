//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Methods that enforce household or
//! workflow rules return [`RepoError`](crate::error::RepoError); plain CRUD
//! returns `sqlx::Error`.

pub mod content_repo;
pub mod event_repo;
pub mod family_repo;
pub mod gallery_repo;
pub mod house_repo;
pub mod member_repo;
pub mod ministry_repo;
pub mod notification_repo;
pub mod sacrament_repo;
pub mod setting_repo;
pub mod user_repo;

pub use content_repo::ContentRepo;
pub use event_repo::EventRepo;
pub use family_repo::FamilyRepo;
pub use gallery_repo::GalleryRepo;
pub use house_repo::HouseRepo;
pub use member_repo::MemberRepo;
pub use ministry_repo::MinistryRepo;
pub use notification_repo::NotificationRepo;
pub use sacrament_repo::SacramentRepo;
pub use setting_repo::SettingRepo;
pub use user_repo::UserRepo;
