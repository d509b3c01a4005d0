/// Snapfeed demo entry point
///
/// Wires the in-memory stores to the use-case services, spawns the feed
/// synchronizer, and walks the reference flow: load the default profile,
/// edit it, create posts, read the live feed.
use anyhow::{Context, Result};
use blob_store::{BlobStore, MemoryBlobStore};
use doc_store::{DocumentStore, MemoryDocumentStore};
use feed_core::{
    CreatePostForm, EditProfileForm, FeedSynchronizer, FixturePicker, ImageHandle, MediaPicker,
    PickerOptions, PostService, ProfileService, Settings,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).with_target(false).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let settings = Settings::load().context("Failed to load configuration")?;
    info!(user_id = %settings.demo_user_id, "Starting Snapfeed demo");

    let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let blobs: Arc<dyn BlobStore> = Arc::new(MemoryBlobStore::new(settings.storage.clone()));

    let feed = FeedSynchronizer::spawn(Arc::clone(&store)).await?;
    let posts = PostService::new(Arc::clone(&store), Arc::clone(&blobs));
    let profiles = ProfileService::new(Arc::clone(&store), Arc::clone(&blobs));

    // Stand in for the OS media picker with an image on disk.
    let image_path =
        std::env::temp_dir().join(format!("snapfeed-demo-{}.jpg", std::process::id()));
    tokio::fs::write(&image_path, [0xFF, 0xD8, 0xFF, 0xE0])
        .await
        .context("Failed to write demo image")?;
    let picker = FixturePicker::with_image(ImageHandle::new(&image_path));

    let before = profiles.load_profile(&settings.demo_user_id).await?;
    info!(name = %before.name, "loaded profile");

    profiles
        .save_profile(
            &settings.demo_user_id,
            EditProfileForm {
                name: "Demo User".to_string(),
                bio: "Exploring the feed.".to_string(),
                photo_url: None,
                new_image: picker.pick_image(PickerOptions::default()).await,
            },
        )
        .await?;
    let after = profiles.load_profile(&settings.demo_user_id).await?;
    info!(name = %after.name, has_photo = after.has_photo(), "profile saved");

    for caption in ["Hello world", "Second post"] {
        let image = picker.pick_image(PickerOptions::default()).await;
        let id = posts
            .create_post(CreatePostForm {
                caption: caption.to_string(),
                image,
            })
            .await?;
        info!(post_id = %id, caption, "created post");
    }

    // Wait for the live feed to catch up with both posts.
    let mut state = feed.state();
    while state.borrow().posts().len() < 2 {
        state.changed().await.context("feed watch closed")?;
    }
    for post in feed.posts() {
        info!(caption = %post.caption, image_url = %post.image_url, "feed entry");
    }

    feed.detach();
    tokio::fs::remove_file(&image_path).await.ok();
    Ok(())
}
