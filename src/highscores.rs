//! High score persistence
//!
//! A single best-score scalar, stored in LocalStorage as a plain decimal
//! string. Read once at startup, written whenever the score process reports
//! an improvement. Missing or malformed data degrades to zero.

/// The persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lane_rush_high_score";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Record a new best. Returns whether the stored value changed.
    pub fn update(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(storage) = crate::platform::local_storage() {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                match raw.parse::<u32>() {
                    Ok(best) => {
                        log::info!("Loaded high score: {}", best);
                        return Self { best };
                    }
                    Err(_) => {
                        log::warn!("Stored high score {:?} is malformed; treating as 0", raw);
                    }
                }
            }
        }
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(storage) = crate::platform::local_storage() {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.best.to_string());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_is_monotonic() {
        let mut high = HighScore::new(10);
        assert!(!high.update(5));
        assert_eq!(high.best, 10);
        assert!(!high.update(10));
        assert_eq!(high.best, 10);
        assert!(high.update(11));
        assert_eq!(high.best, 11);
    }
}
