//! Use-case services: one per user-facing intent, each orchestrating the
//! blob and document stores behind the trait seams.

pub mod feed;
pub mod posts;
pub mod profiles;

/// Feed posts, store-generated ids.
pub const POSTS_COLLECTION: &str = "posts";
/// User profiles, keyed by the external user id.
pub const USERS_COLLECTION: &str = "users";

pub use feed::{FeedState, FeedSynchronizer};
pub use posts::PostService;
pub use profiles::ProfileService;
