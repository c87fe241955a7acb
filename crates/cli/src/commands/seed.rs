//! Seed the data file with sample posts.

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use postboard_api::ApiConfig;
use postboard_api::db::{PostStore, seed};
use postboard_api::ids::IdGenerator;
use postboard_api::storage::FileStore;

/// Write the seed collection plus `extra` generated posts to the data file.
///
/// Without `reset`, posts already in the file are kept and the generated ones
/// are added to them. With `reset`, the file is removed first, which also
/// drops every stored comment.
///
/// # Errors
///
/// Returns an error if no data file is configured or it cannot be written.
pub fn posts(
    file: Option<PathBuf>,
    extra: usize,
    reset: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = match file {
        Some(path) => path,
        None => ApiConfig::from_env()?
            .data_file
            .ok_or("POSTBOARD_DATA_FILE not set and no --file given")?,
    };

    if reset {
        match std::fs::remove_file(&path) {
            Ok(()) => info!(path = %path.display(), "Removed existing data file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }

    let storage = FileStore::open(&path)?;
    let store = PostStore::new(&storage);

    let mut posts = store.get_all();
    let existing = posts.len();

    let generated = seed::generate_posts(extra, Utc::now(), &IdGenerator::new(), &mut rand::rng());
    posts.extend(generated);
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    store.set(&posts)?;

    info!(
        path = %path.display(),
        existing,
        generated = extra,
        total = posts.len(),
        "Seeded posts"
    );
    Ok(())
}
