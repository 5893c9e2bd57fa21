//! ## Custom Errors for Quadspace
//!
//! This module defines the errors used internally by the quadtree engine.

use std::error::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents errors specific to invalid operations or parameters in Quadspace.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
pub enum QuadTreeError {
    /// Occurs when an invalid capacity is provided.
    InvalidCapacity {
        /// The capacity value that was provided.
        capacity: usize,
    },
    /// Occurs when an adaptive-insertion density multiplier is below 1.0.
    InvalidDensityMultiplier {
        /// The multiplier value that was provided.
        multiplier: f32,
    },
}

impl fmt::Display for QuadTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadTreeError::InvalidCapacity { capacity } => {
                write!(
                    f,
                    "Invalid capacity: {capacity}. Capacity must be greater than zero."
                )
            }
            QuadTreeError::InvalidDensityMultiplier { multiplier } => {
                write!(
                    f,
                    "Invalid density multiplier: {multiplier}. Multiplier must be at least 1.0."
                )
            }
        }
    }
}

impl Error for QuadTreeError {}
