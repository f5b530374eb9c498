//! Decoded image cache consulted by the renderer.
//!
//! Fetching and decoding happen off the interaction thread; completions are
//! marshalled back onto the session's thread before calling [`ImageCache::insert`].
//! A superseded fetch for the same key is allowed to complete late and simply
//! overwrite the entry (last writer wins).

use std::collections::HashMap;

/// A decoded RGBA8 bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

/// Key → bitmap mapping, keyed by URL or custom key string. Absent entries
/// mean the renderer draws a placeholder fill.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, ImageData>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a decoded bitmap, replacing any previous entry for the key.
    pub fn insert(&mut self, key: String, data: ImageData) {
        self.entries.insert(key, data);
    }

    pub fn get(&self, key: &str) -> Option<&ImageData> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ImageData> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
