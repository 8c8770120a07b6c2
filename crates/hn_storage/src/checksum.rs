use hn_core::{Checksum, StoryCache, StoryIdSet};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// SHA-256 over the ids as consecutive little-endian `u64`s.
pub fn checksum(ids: &StoryIdSet) -> Checksum {
    let mut hasher = Sha256::new();
    for id in ids.iter() {
        hasher.update(id.to_le_bytes());
    }
    Checksum::from_bytes(hasher.finalize().into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Reuse,
    Regenerate,
}

/// Compares the current id set against the digest left by the previous run.
pub struct ChangeDetector<'a> {
    cache: &'a dyn StoryCache,
}

impl<'a> ChangeDetector<'a> {
    pub fn new(cache: &'a dyn StoryCache) -> Self {
        Self { cache }
    }

    /// Returns [`Decision::Reuse`] only when the stored digest matches.
    ///
    /// In every other case the new digest is written before returning
    /// [`Decision::Regenerate`]. A failed write is logged; the caller
    /// regenerates either way.
    pub async fn detect(&self, ids: &StoryIdSet) -> Decision {
        let current = checksum(ids);

        match self.cache.read_checksum().await {
            Ok(stored) if current.matches(&stored) => {
                debug!("🔁 Top stories unchanged ({})", current);
                return Decision::Reuse;
            }
            Ok(_) => debug!("🆕 Top stories changed ({})", current),
            Err(e) => debug!("No previous checksum ({}): {}", current, e),
        }

        if let Err(e) = self.cache.write_checksum(current.as_bytes()).await {
            warn!("⚠️ Failed to save checksum: {}", e);
        }
        Decision::Regenerate
    }
}
