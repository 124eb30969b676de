use std::{ffi::c_void, marker::PhantomData, ptr::NonNull};

use zfp_sys::{
    zfp_field, zfp_field_1d, zfp_field_2d, zfp_field_3d, zfp_field_4d, zfp_field_alloc,
    zfp_field_dimensionality, zfp_field_free, zfp_field_set_pointer, zfp_field_size,
    zfp_field_type, zfp_type,
};

use crate::{FieldGeometry, ZfpElement, ZfpNativeType};

/// A `zfp_field` describing a buffer borrowed for `'a`.
///
/// The field is freed on drop. The buffer is not owned.
pub(super) struct ZfpField<'a> {
    field: NonNull<zfp_field>,
    phantom: PhantomData<&'a mut [u8]>,
}

impl Drop for ZfpField<'_> {
    fn drop(&mut self) {
        unsafe {
            // SAFETY: the field was allocated by zfp and is freed once
            zfp_field_free(self.field.as_ptr());
        }
    }
}

impl<'a> ZfpField<'a> {
    /// Create a field over `data` for decompression.
    pub(super) fn new<T: ZfpElement>(data: &'a mut [T], geometry: &FieldGeometry) -> Option<Self> {
        if geometry.validate_len(data.len()).is_err() {
            return None;
        }
        // SAFETY: data holds exactly the number of elements described by geometry
        unsafe {
            Self::new_raw(
                data.as_mut_ptr().cast::<c_void>(),
                T::NATIVE_TYPE.to_sys(),
                geometry,
            )
        }
    }

    /// Create a field over `data` for compression.
    ///
    /// zfp only reads from the field while compressing, so the data is borrowed immutably.
    pub(super) fn new_readonly<T: ZfpElement>(
        data: &'a [T],
        geometry: &FieldGeometry,
    ) -> Option<Self> {
        if geometry.validate_len(data.len()).is_err() {
            return None;
        }
        // SAFETY: data holds exactly the number of elements described by geometry, and is not written by zfp_compress
        unsafe {
            Self::new_raw(
                data.as_ptr().cast_mut().cast::<c_void>(),
                T::NATIVE_TYPE.to_sys(),
                geometry,
            )
        }
    }

    unsafe fn new_raw(
        pointer: *mut c_void,
        zfp_type: zfp_type,
        geometry: &FieldGeometry,
    ) -> Option<Self> {
        geometry.validate().ok()?;
        let field = match *geometry {
            FieldGeometry::D1 { nx } => unsafe { zfp_field_1d(pointer, zfp_type, nx) },
            FieldGeometry::D2 { nx, ny } => unsafe { zfp_field_2d(pointer, zfp_type, nx, ny) },
            FieldGeometry::D3 { nx, ny, nz } => unsafe {
                zfp_field_3d(pointer, zfp_type, nx, ny, nz)
            },
            FieldGeometry::D4 { nx, ny, nz, nw } => unsafe {
                zfp_field_4d(pointer, zfp_type, nx, ny, nz, nw)
            },
        };
        NonNull::new(field).map(|field| Self {
            field,
            phantom: PhantomData,
        })
    }

    pub(super) fn as_zfp_field(&self) -> *mut zfp_field {
        self.field.as_ptr()
    }
}

impl ZfpField<'static> {
    /// Create a field without data.
    ///
    /// # Safety
    /// The field must not be passed to `zfp_compress` or `zfp_decompress`.
    pub(super) unsafe fn new_empty(zfp_type: zfp_type, geometry: &FieldGeometry) -> Option<Self> {
        unsafe { Self::new_raw(std::ptr::null_mut(), zfp_type, geometry) }
    }

    /// Allocate a field without type, extents, or data, to be populated by `zfp_read_header`.
    pub(super) fn alloc() -> Option<Self> {
        let field = unsafe {
            // SAFETY: no preconditions
            zfp_field_alloc()
        };
        NonNull::new(field).map(|field| Self {
            field,
            phantom: PhantomData,
        })
    }

    /// Point the field at `data`.
    ///
    /// Returns [`None`] if the field type or extents do not match `T` and `data`.
    pub(super) fn with_data<T: ZfpElement>(self, data: &mut [T]) -> Option<ZfpField<'_>> {
        if self.native_type() != Some(T::NATIVE_TYPE)
            || self.geometry()?.validate_len(data.len()).is_err()
        {
            return None;
        }
        let field = self.field;
        std::mem::forget(self);
        unsafe {
            // SAFETY: the field describes exactly the elements of data
            zfp_field_set_pointer(field.as_ptr(), data.as_mut_ptr().cast::<c_void>());
        }
        Some(ZfpField {
            field,
            phantom: PhantomData,
        })
    }
}

impl ZfpField<'_> {
    /// Returns the element type of the field.
    pub(super) fn native_type(&self) -> Option<ZfpNativeType> {
        let zfp_type = unsafe {
            // SAFETY: the field is valid
            zfp_field_type(self.field.as_ptr())
        };
        ZfpNativeType::from_sys(zfp_type)
    }

    /// Returns the geometry of the field.
    pub(super) fn geometry(&self) -> Option<FieldGeometry> {
        let mut extents = [0usize; 4];
        let dimensionality = unsafe {
            // SAFETY: the field is valid and extents has space for 4 dimensions
            zfp_field_size(self.field.as_ptr(), extents.as_mut_ptr());
            zfp_field_dimensionality(self.field.as_ptr())
        };
        let dimensionality = usize::try_from(dimensionality).ok()?;
        FieldGeometry::from_extents(extents.get(..dimensionality)?)
    }
}
