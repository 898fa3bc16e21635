/// Incremental image-existence ledger for the photo carousel.
///
/// The host probes each candidate URL asynchronously (image load/error
/// events) with no ordering guarantee across candidates. Successes populate
/// the working list in resolution order; failures are dropped. Resolutions
/// for unknown or already-settled URLs are ignored.
#[derive(Debug, Default)]
pub struct PhotoProbe {
    outstanding: Vec<String>,
    loaded: Vec<String>,
}

impl PhotoProbe {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            outstanding: candidates,
            loaded: Vec::new(),
        }
    }

    /// Records the outcome of one probe. Returns `true` if the URL was an
    /// outstanding candidate.
    pub fn resolve(&mut self, url: &str, exists: bool) -> bool {
        let Some(pos) = self.outstanding.iter().position(|c| c == url) else {
            return false;
        };
        let url = self.outstanding.remove(pos);
        if exists {
            self.loaded.push(url);
        }
        true
    }

    /// Confirmed photos, in the order their probes succeeded.
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }

    pub fn outstanding(&self) -> &[String] {
        &self.outstanding
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding.is_empty()
    }
}
