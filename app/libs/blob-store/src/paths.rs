//! Object key builders for the storage boundary.
//!
//! Keys carry the current epoch millis, so two uploads never collide as
//! long as the caller takes the timestamp at upload time.

use chrono::{DateTime, Utc};

/// Key for a feed-post image: `posts/post_{epochMillis}.jpg`.
pub fn post_image_key(at: DateTime<Utc>) -> String {
    format!("posts/post_{}.jpg", at.timestamp_millis())
}

/// Key for a profile photo: `profiles/profile_{userId}_{epochMillis}.jpg`.
pub fn profile_image_key(user_id: &str, at: DateTime<Utc>) -> String {
    format!("profiles/profile_{}_{}.jpg", user_id, at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn post_key_pattern() {
        let at = Utc.timestamp_millis_opt(1_000).unwrap();
        assert_eq!(post_image_key(at), "posts/post_1000.jpg");
    }

    #[test]
    fn profile_key_pattern() {
        let at = Utc.timestamp_millis_opt(1_000).unwrap();
        assert_eq!(
            profile_image_key("user123", at),
            "profiles/profile_user123_1000.jpg"
        );
    }
}
