use geo::GeoPoint;

/// Options handed to the host's geolocation watch. Product-tuned constants,
/// not protocol.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    pub high_accuracy: bool,
    pub maximum_age_ms: u32,
    pub timeout_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            maximum_age_ms: 10_000,
            timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Position {
    pub point: GeoPoint,
    pub accuracy_m: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WatchError {
    PermissionDenied,
    Unavailable,
    Timeout,
}

impl WatchError {
    /// The one user-facing error string in this subsystem.
    pub fn user_message(&self) -> &'static str {
        match self {
            WatchError::PermissionDenied => {
                "Location access was denied. Enable it to see nearby landmarks."
            }
            WatchError::Unavailable => "Your location is currently unavailable.",
            WatchError::Timeout => "Finding your location took too long. Try again.",
        }
    }
}

impl std::fmt::Display for WatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchError::PermissionDenied => write!(f, "geolocation permission denied"),
            WatchError::Unavailable => write!(f, "geolocation unavailable"),
            WatchError::Timeout => write!(f, "geolocation timed out"),
        }
    }
}

impl std::error::Error for WatchError {}

/// Cancellable latest-value slot for a continuous position stream.
///
/// The host delivers positions and errors in its own order; only the most
/// recent of each is kept. After `unsubscribe` the slot is inert: deliveries
/// are ignored and the last value is dropped.
#[derive(Debug, Default)]
pub struct PositionWatch {
    latest: Option<Position>,
    error: Option<WatchError>,
    cancelled: bool,
}

impl PositionWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most-recent-position-wins. A successful delivery clears any error.
    pub fn push(&mut self, position: Position) {
        if self.cancelled {
            return;
        }
        self.latest = Some(position);
        self.error = None;
    }

    pub fn fail(&mut self, error: WatchError) {
        if self.cancelled {
            return;
        }
        self.error = Some(error);
    }

    pub fn latest(&self) -> Option<Position> {
        self.latest
    }

    pub fn error(&self) -> Option<&WatchError> {
        self.error.as_ref()
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled
    }

    /// Releases the watch: drops the latest value and ignores everything
    /// delivered afterwards.
    pub fn unsubscribe(&mut self) {
        self.cancelled = true;
        self.latest = None;
        self.error = None;
    }
}
