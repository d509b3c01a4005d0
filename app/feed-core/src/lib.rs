//! Snapfeed core: the data-access layer of a minimal social-feed app.
//!
//! The flow is one line long: screen form state goes into a use-case, the
//! use-case uploads the image (if any) and writes a document, the store's
//! change stream delivers the full recomputed feed to the
//! [`FeedSynchronizer`], and consumers read the latest snapshot from its
//! watch channel. Profile reads bypass the synchronizer entirely; they are
//! point reads.
//!
//! Navigation, styling, and the picker permission dialog live in the view
//! host and the OS; this crate only defines the seams they plug into.

pub mod config;
pub mod media;
pub mod models;
pub mod services;
pub mod validators;

pub use config::Settings;
pub use media::{FixturePicker, ImageHandle, MediaPicker, PickerOptions};
pub use models::forms::{CreatePostForm, EditProfileForm};
pub use models::post::Post;
pub use models::profile::Profile;
pub use services::{
    FeedState, FeedSynchronizer, PostService, ProfileService, POSTS_COLLECTION, USERS_COLLECTION,
};

pub use error_types::{AppError, Result};
