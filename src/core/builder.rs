//! Options controlling how a [`Tessellation`](crate::core::tessellation::Tessellation)
//! is derived from the hull.
//!
//! [`TessellationOptions`] can be written as a struct literal or assembled
//! with the generated [`TessellationOptionsBuilder`], which rejects a negative
//! or non-finite volume threshold at build time.
//!
//! # Examples
//!
//! ```rust
//! use tessellation::core::builder::{TessellationOptions, TessellationOptionsBuilder};
//!
//! let options = TessellationOptionsBuilder::default()
//!     .at_infinity(true)
//!     .volume_threshold(1e-9)
//!     .build()
//!     .unwrap();
//!
//! assert!(options.at_infinity);
//! assert!(!options.keep_degenerate);
//! assert_eq!(TessellationOptions::default().volume_threshold, 0.0);
//!
//! assert!(TessellationOptionsBuilder::default().volume_threshold(-1.0).build().is_err());
//! ```

#![forbid(unsafe_code)]

/// Options of one tessellation run.
#[derive(Builder, Clone, Copy, Debug, Default, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct TessellationOptions {
    /// Add a point above every lifted site before computing the hull, so that
    /// cospherical (e.g. grid) inputs still produce a full-dimensional hull.
    #[builder(default)]
    pub at_infinity: bool,
    /// Keep hull facets flagged degenerate as zero-volume tiles.
    #[builder(default)]
    pub keep_degenerate: bool,
    /// Tiles whose volume does not exceed this get their center from a family
    /// sibling (or NaN) instead of computing it.
    #[builder(default)]
    pub volume_threshold: f64,
}

impl TessellationOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.volume_threshold {
            Some(threshold) if !threshold.is_finite() || threshold < 0.0 => Err(format!(
                "volume threshold must be finite and non-negative, got {threshold}"
            )),
            _ => Ok(()),
        }
    }
}

impl TessellationOptions {
    /// Check the options a caller may have built by hand.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the volume threshold is
    /// negative or not finite.
    pub fn check(&self) -> Result<(), String> {
        if self.volume_threshold.is_finite() && self.volume_threshold >= 0.0 {
            Ok(())
        } else {
            Err(format!(
                "volume threshold must be finite and non-negative, got {}",
                self.volume_threshold
            ))
        }
    }
}
