//! # spectra-primaries
//!
//! Display primaries, white points, and RGB-XYZ transform derivation.
//!
//! Given the CIE xy chromaticities of three display primaries and a
//! reference white, this crate derives the 3x3 matrices that convert
//! between linear RGB and CIE XYZ. It is the display half of the spectra
//! pipeline and is independent of `spectra-observer`; the caller composes
//! the two.
//!
//! # Derivation
//!
//! 1. Extend each xy chromaticity to XYZ via `z = 1 - x - y`.
//! 2. Assemble `base`, the matrix with the primary vectors as columns.
//! 3. Solve `s = base⁻¹ · white / white.y`, the per-primary luminance
//!    scale that reproduces the white point at R = G = B = 1.
//! 4. `forward = base · diag(s)`; `backward = forward⁻¹`.
//!
//! # Usage
//!
//! ```rust
//! use spectra_primaries::{ColorTransform, SRGB_10DEG};
//! use glam::DVec3;
//!
//! let transform = ColorTransform::derive(&SRGB_10DEG).unwrap();
//!
//! // Full-intensity primaries reproduce the white point with Y = 1
//! let white = transform.rgb_to_xyz(DVec3::ONE);
//! assert!((white.y - 1.0).abs() < 1e-9);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - `DMat3`/`DVec3` matrix math
//! - [`thiserror`] - Error handling
//!
//! # Used By
//!
//! - `spectra-cli` - Terminal front end

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use glam::{DMat3, DVec3};
use thiserror::Error;

/// A CIE xy chromaticity coordinate.
pub type Chromaticity = (f64, f64);

/// Errors that can occur while deriving a [`ColorTransform`].
#[derive(Debug, Error)]
pub enum PrimariesError {
    /// The three primaries are collinear or otherwise degenerate, so the
    /// primary matrix cannot be inverted.
    #[error("primaries of {name} are degenerate (|det| = {determinant:e})")]
    SingularPrimaries {
        /// Name of the offending primary set
        name: &'static str,
        /// Determinant that failed the tolerance check
        determinant: f64,
    },

    /// The white point has (near-)zero luminance, so the white scaling
    /// step would divide by zero.
    #[error("white point of {name} has degenerate luminance y = {y}")]
    DegenerateWhite {
        /// Name of the offending primary set
        name: &'static str,
        /// The offending y coordinate
        y: f64,
    },
}

/// RGB color space primaries definition.
///
/// Defines a display by its three primary colors and white point, all as
/// CIE xy chromaticities.
///
/// # Example
///
/// ```rust
/// use spectra_primaries::Primaries;
///
/// let my_display = Primaries {
///     r: (0.64, 0.33),
///     g: (0.30, 0.60),
///     b: (0.15, 0.06),
///     w: (0.3127, 0.3290),
///     name: "Custom",
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y) chromaticity
    pub r: Chromaticity,
    /// Green primary (x, y) chromaticity
    pub g: Chromaticity,
    /// Blue primary (x, y) chromaticity
    pub b: Chromaticity,
    /// White point (x, y) chromaticity
    pub w: Chromaticity,
    /// Primary set name
    pub name: &'static str,
}

// ============================================================================
// Standard White Points
// ============================================================================

/// D65 white point chromaticity for the 2° observer (~6504 K).
pub const D65_XY: Chromaticity = (0.3127, 0.3290);

/// D65 white point chromaticity for the 10° observer.
pub const D65_10DEG_XY: Chromaticity = (0.31382, 0.33100);

// ============================================================================
// Standard Primaries
// ============================================================================

/// sRGB / Rec.709 primaries with the 2° D65 white point.
pub const SRGB: Primaries = Primaries {
    r: (0.64, 0.33),
    g: (0.30, 0.60),
    b: (0.15, 0.06),
    w: D65_XY,
    name: "sRGB",
};

/// sRGB primaries with the 10° D65 white point.
///
/// The right choice when the stimulus comes from a 10° observer table such
/// as the CIE 2006 10° CMFs.
pub const SRGB_10DEG: Primaries = Primaries {
    r: (0.64, 0.33),
    g: (0.30, 0.60),
    b: (0.15, 0.06),
    w: D65_10DEG_XY,
    name: "sRGB (10-deg white)",
};

/// Extends an xy chromaticity to XYZ on the unit-sum plane: `z = 1 - x - y`.
#[inline]
pub fn xy_to_xyz(chromaticity: Chromaticity) -> DVec3 {
    let (x, y) = chromaticity;
    DVec3::new(x, y, 1.0 - x - y)
}

// Singularity tolerance for determinant checks.
const DET_EPSILON: f64 = 1e-10;

/// Immutable RGB-XYZ transform pair for one set of primaries.
///
/// Built once by [`ColorTransform::derive`]; both directions are pure
/// matrix-vector products with no clamping. Out-of-range components on the
/// RGB side mean the color lies outside this display's gamut, and clamping
/// them (or not) is the caller's decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTransform {
    forward: DMat3,
    backward: DMat3,
}

impl ColorTransform {
    /// Derives the transform pair from a primary set.
    ///
    /// # Errors
    ///
    /// [`PrimariesError::SingularPrimaries`] when the primaries are
    /// collinear, [`PrimariesError::DegenerateWhite`] when the white point
    /// has zero luminance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spectra_primaries::{ColorTransform, Primaries, SRGB};
    ///
    /// assert!(ColorTransform::derive(&SRGB).is_ok());
    ///
    /// let collinear = Primaries { g: SRGB.r, b: SRGB.r, ..SRGB };
    /// assert!(ColorTransform::derive(&collinear).is_err());
    /// ```
    pub fn derive(primaries: &Primaries) -> Result<Self, PrimariesError> {
        let base = DMat3::from_cols(
            xy_to_xyz(primaries.r),
            xy_to_xyz(primaries.g),
            xy_to_xyz(primaries.b),
        );
        let determinant = base.determinant();
        if determinant.abs() < DET_EPSILON {
            return Err(PrimariesError::SingularPrimaries {
                name: primaries.name,
                determinant,
            });
        }
        if primaries.w.1.abs() < DET_EPSILON {
            return Err(PrimariesError::DegenerateWhite {
                name: primaries.name,
                y: primaries.w.1,
            });
        }

        let white = xy_to_xyz(primaries.w);
        let scale = base.inverse() * white / primaries.w.1;
        let forward = base * DMat3::from_diagonal(scale);

        // diag(s) can still collapse the matrix when a scale factor lands
        // on zero.
        let determinant = forward.determinant();
        if determinant.abs() < DET_EPSILON {
            return Err(PrimariesError::SingularPrimaries {
                name: primaries.name,
                determinant,
            });
        }

        Ok(Self {
            forward,
            backward: forward.inverse(),
        })
    }

    /// Converts linear RGB to XYZ. Unclamped.
    #[inline]
    pub fn rgb_to_xyz(&self, rgb: DVec3) -> DVec3 {
        self.forward * rgb
    }

    /// Converts XYZ to linear RGB. Unclamped.
    #[inline]
    pub fn xyz_to_rgb(&self, xyz: DVec3) -> DVec3 {
        self.backward * xyz
    }

    /// The RGB to XYZ matrix.
    #[inline]
    pub fn forward(&self) -> DMat3 {
        self.forward
    }

    /// The XYZ to RGB matrix.
    #[inline]
    pub fn backward(&self) -> DMat3 {
        self.backward
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec_eq(a: DVec3, b: DVec3, epsilon: f64) {
        assert_relative_eq!(a.x, b.x, epsilon = epsilon);
        assert_relative_eq!(a.y, b.y, epsilon = epsilon);
        assert_relative_eq!(a.z, b.z, epsilon = epsilon);
    }

    #[test]
    fn test_xy_to_xyz_unit_sum() {
        let v = xy_to_xyz((0.64, 0.33));
        assert_relative_eq!(v.x + v.y + v.z, 1.0, epsilon = 1e-15);
        assert_relative_eq!(v.z, 0.03, epsilon = 1e-15);
    }

    #[test]
    fn test_white_point_reproduction() {
        for primaries in [SRGB, SRGB_10DEG] {
            let transform = ColorTransform::derive(&primaries).unwrap();
            let white = transform.rgb_to_xyz(DVec3::ONE);
            // Expect the white chromaticity embedded at Y = 1
            let (wx, wy) = primaries.w;
            let expected = xy_to_xyz(primaries.w) / wy;
            assert_vec_eq(white, expected, 1e-9);
            assert_relative_eq!(white.y, 1.0, epsilon = 1e-12);
            assert_relative_eq!(white.x, wx / wy, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_round_trip() {
        let transform = ColorTransform::derive(&SRGB_10DEG).unwrap();
        for rgb in [
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.25, 0.5, 0.75),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::splat(0.18),
        ] {
            let back = transform.xyz_to_rgb(transform.rgb_to_xyz(rgb));
            assert_vec_eq(back, rgb, 1e-12);
        }
    }

    #[test]
    fn test_matrices_are_inverses() {
        let transform = ColorTransform::derive(&SRGB).unwrap();
        let product = transform.forward() * transform.backward();
        for column in 0..3 {
            assert_vec_eq(product.col(column), DMat3::IDENTITY.col(column), 1e-12);
        }
    }

    #[test]
    fn test_srgb_forward_matches_published_matrix() {
        // Bruce Lindbloom's sRGB D65 reference, to ~4 decimals
        let transform = ColorTransform::derive(&SRGB).unwrap();
        let m = transform.forward();
        assert_relative_eq!(m.col(0).x, 0.4124564, epsilon = 1e-4);
        assert_relative_eq!(m.col(0).y, 0.2126729, epsilon = 1e-4);
        assert_relative_eq!(m.col(1).y, 0.7151522, epsilon = 1e-4);
        assert_relative_eq!(m.col(2).z, 0.9503041, epsilon = 1e-4);
    }

    #[test]
    fn test_degenerate_primaries_rejected() {
        let collinear = Primaries {
            r: (0.3, 0.3),
            g: (0.3, 0.3),
            b: (0.3, 0.3),
            w: D65_XY,
            name: "collinear",
        };
        let err = ColorTransform::derive(&collinear).unwrap_err();
        assert!(matches!(err, PrimariesError::SingularPrimaries { .. }));
    }

    #[test]
    fn test_degenerate_white_rejected() {
        let bad_white = Primaries {
            w: (0.3, 0.0),
            name: "dark white",
            ..SRGB
        };
        let err = ColorTransform::derive(&bad_white).unwrap_err();
        assert!(matches!(err, PrimariesError::DegenerateWhite { .. }));
    }

    #[test]
    fn test_out_of_gamut_unclamped() {
        // A strongly green XYZ far outside the sRGB gamut must pass
        // through untouched, negative components and all.
        let transform = ColorTransform::derive(&SRGB).unwrap();
        let rgb = transform.xyz_to_rgb(DVec3::new(0.15, 0.8, 0.05));
        assert!(rgb.min_element() < 0.0, "expected out-of-gamut RGB, got {rgb}");
    }
}
