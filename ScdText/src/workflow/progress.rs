//! Progress reporting for batch operations

/// Progress update handed to batch callbacks
#[derive(Debug, Clone)]
pub struct Progress {
    /// Current pipeline stage
    pub phase: Phase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Item being processed, relative to the stage's input directory
    pub current_file: Option<String>,
}

impl Progress {
    #[must_use]
    pub fn new(phase: Phase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    #[must_use]
    pub fn with_file(phase: Phase, current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Splitting `.scd` archives into folders
    Unpacking,
    /// Scanning scripts and writing block records
    Dumping,
    /// Writing translated blocks back into scripts
    Repacking,
    /// Assembling folders back into `.scd` archives
    Rebuilding,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unpacking => "Unpacking",
            Self::Dumping => "Dumping text",
            Self::Repacking => "Repacking",
            Self::Rebuilding => "Rebuilding",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert!((Progress::new(Phase::Dumping, 1, 4).percentage() - 0.25).abs() < f32::EPSILON);
        assert!((Progress::new(Phase::Dumping, 0, 0).percentage() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_with_file() {
        let progress = Progress::with_file(Phase::Rebuilding, 2, 3, "ev01");
        assert_eq!(progress.current_file.as_deref(), Some("ev01"));
        assert_eq!(progress.phase.as_str(), "Rebuilding");
    }
}
