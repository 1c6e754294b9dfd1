//! Error types for territory generation

use std::fmt;

use crate::site::SiteId;

/// Errors that can occur while computing territory geometry
#[derive(Debug, Clone, PartialEq)]
pub enum TerritoryError {
    /// Style configuration validation failed
    InvalidConfig(String),
    /// A site cannot take part in the computation (non-finite or out-of-range coordinates)
    InvalidSite {
        /// Offending site
        site: SiteId,
        /// Why the site was rejected
        reason: String,
    },
    /// Geometry generation failed
    GenerationFailed(String),
}

impl fmt::Display for TerritoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerritoryError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            TerritoryError::InvalidSite { site, reason } => {
                write!(f, "invalid site {}: {}", site.0, reason)
            }
            TerritoryError::GenerationFailed(msg) => write!(f, "generation failed: {}", msg),
        }
    }
}

impl std::error::Error for TerritoryError {}

/// Result type alias for territory operations
pub type Result<T> = std::result::Result<T, TerritoryError>;
