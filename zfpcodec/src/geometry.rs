//! Field geometry.

use crate::ZfpError;

/// The geometry of a zfp field.
///
/// Extents are in zfp order: `nx` is the fastest varying (innermost) dimension.
/// A row-major array of shape `[d0, d1, d2]` therefore has `nx = d2`, `ny = d1`, and `nz = d0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGeometry {
    /// A 1D field.
    D1 {
        /// Extent of the x dimension.
        nx: usize,
    },
    /// A 2D field.
    D2 {
        /// Extent of the x dimension.
        nx: usize,
        /// Extent of the y dimension.
        ny: usize,
    },
    /// A 3D field.
    D3 {
        /// Extent of the x dimension.
        nx: usize,
        /// Extent of the y dimension.
        ny: usize,
        /// Extent of the z dimension.
        nz: usize,
    },
    /// A 4D field.
    D4 {
        /// Extent of the x dimension.
        nx: usize,
        /// Extent of the y dimension.
        ny: usize,
        /// Extent of the z dimension.
        nz: usize,
        /// Extent of the w dimension.
        nw: usize,
    },
}

impl FieldGeometry {
    /// Resolve the geometry of a row-major array with `shape`.
    ///
    /// zfp supports 1 to 4 dimensions.
    /// A shape with any other number of dimensions (including a scalar shape `[]`) is flattened to a 1D field with the same number of elements.
    #[must_use]
    pub fn from_shape(shape: &[usize]) -> Self {
        match *shape {
            [nx] => Self::D1 { nx },
            [ny, nx] => Self::D2 { nx, ny },
            [nz, ny, nx] => Self::D3 { nx, ny, nz },
            [nw, nz, ny, nx] => Self::D4 { nx, ny, nz, nw },
            _ => {
                let nx = num_elements(shape);
                log::warn!(
                    "zfp supports 1 to 4 dimensions, flattening a {}-dimensional shape {shape:?} to {nx} elements",
                    shape.len()
                );
                Self::D1 { nx }
            }
        }
    }

    /// Create a geometry from zfp ordered extents (`[nx, ny, ...]`).
    ///
    /// Returns [`None`] if there are not 1 to 4 extents.
    #[must_use]
    pub fn from_extents(extents: &[usize]) -> Option<Self> {
        match *extents {
            [nx] => Some(Self::D1 { nx }),
            [nx, ny] => Some(Self::D2 { nx, ny }),
            [nx, ny, nz] => Some(Self::D3 { nx, ny, nz }),
            [nx, ny, nz, nw] => Some(Self::D4 { nx, ny, nz, nw }),
            _ => None,
        }
    }

    /// Returns the dimensionality of the field.
    #[must_use]
    pub const fn dimensionality(&self) -> usize {
        match self {
            Self::D1 { .. } => 1,
            Self::D2 { .. } => 2,
            Self::D3 { .. } => 3,
            Self::D4 { .. } => 4,
        }
    }

    /// Returns the extents in zfp order (`[nx, ny, ...]`).
    #[must_use]
    pub fn extents(&self) -> Vec<usize> {
        match *self {
            Self::D1 { nx } => vec![nx],
            Self::D2 { nx, ny } => vec![nx, ny],
            Self::D3 { nx, ny, nz } => vec![nx, ny, nz],
            Self::D4 { nx, ny, nz, nw } => vec![nx, ny, nz, nw],
        }
    }

    /// Returns the row-major array shape of the field.
    ///
    /// This is the reverse of [`extents`](Self::extents).
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = self.extents();
        shape.reverse();
        shape
    }

    /// Returns the number of elements in the field.
    ///
    /// Saturates at [`usize::MAX`].
    #[must_use]
    pub fn num_elements(&self) -> usize {
        num_elements(&self.extents())
    }

    /// Returns the number of 4^d blocks zfp partitions the field into.
    ///
    /// Saturates at [`usize::MAX`].
    #[must_use]
    pub fn num_blocks(&self) -> usize {
        let blocks: Vec<usize> = self.extents().iter().map(|n| n.div_ceil(4)).collect();
        num_elements(&blocks)
    }

    /// Check that every extent is non-zero.
    ///
    /// zfp infers the dimensionality of a field from its leading non-zero extents, so a zero extent must never reach it.
    ///
    /// # Errors
    /// Returns [`ZfpError::InvalidShape`] if any extent is zero.
    pub fn validate(&self) -> Result<(), ZfpError> {
        if self.extents().contains(&0) {
            Err(ZfpError::InvalidShape(self.shape()))
        } else {
            Ok(())
        }
    }

    /// Check that the field is valid and a buffer with `len` elements matches it.
    ///
    /// # Errors
    /// Returns [`ZfpError::InvalidShape`] if any extent is zero, or [`ZfpError::InvalidNumberOfElements`] if `len` is not the number of elements in the field.
    pub fn validate_len(&self, len: usize) -> Result<(), ZfpError> {
        self.validate()?;
        let expected_len = self.num_elements();
        if len == expected_len {
            Ok(())
        } else {
            Err(ZfpError::InvalidNumberOfElements { len, expected_len })
        }
    }
}

fn num_elements(extents: &[usize]) -> usize {
    extents.iter().fold(1usize, |acc, &n| acc.saturating_mul(n))
}
