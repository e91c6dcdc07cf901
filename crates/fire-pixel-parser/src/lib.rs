//! Fire-pixel extraction from VIIRS Active-Fire granules.
//!
//! JPSS Active-Fire I-band EDR granules are NetCDF-4 files that carry their
//! per-detection arrays inside a named group (`Fire Pixels`). Each detection
//! is described positionally: index `i` of every array belongs to the same
//! fire pixel. This crate reads the longitude, latitude, I-04 brightness
//! temperature and fire radiative power arrays and flattens them into
//! row-oriented records, preserving source order with no filtering and no
//! unit conversion.
//!
//! # System requirements
//!
//! Uses the native `netcdf` library (which wraps HDF5); libnetcdf and libhdf5
//! must be installed.

use std::path::Path;
use std::sync::Once;

use tracing::debug;

mod error;
pub use error::{FirePixelError, FirePixelResult};

mod export;
pub use export::write_csv;

/// Group holding the per-detection arrays in an Active-Fire I-band granule.
pub const FIRE_PIXEL_GROUP: &str = "Fire Pixels";

/// Per-detection variable names within the fire-pixel group.
pub const FP_LONGITUDE: &str = "FP_longitude";
pub const FP_LATITUDE: &str = "FP_latitude";
pub const FP_T4: &str = "FP_T4";
pub const FP_POWER: &str = "FP_power";

/// One detected fire pixel.
///
/// Values are carried through exactly as stored in the granule: degrees for
/// the position, kelvin for the I-04 brightness temperature, megawatts for
/// the fire radiative power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirePixel {
    pub longitude: f32,
    pub latitude: f32,
    pub brightness_temp_k: f32,
    pub frp_mw: f32,
}

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints diagnostics to stderr even for errors the Rust
/// code handles gracefully (e.g. probing for a group that is absent). Safe to
/// call repeatedly; only the first call has effect.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe; null handlers are the
        // documented way to disable automatic error reporting.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Read the fire-pixel table from the named group of a granule.
///
/// The four detection arrays must exist and agree in length N (N = 0 is
/// valid and yields an empty table). Row `i` of the result holds the `i`-th
/// element of each array; source order is preserved.
pub fn read_fire_pixels(path: impl AsRef<Path>, group: &str) -> FirePixelResult<Vec<FirePixel>> {
    silence_hdf5_errors();

    let path = path.as_ref();
    let file = netcdf::open(path).map_err(|e| FirePixelError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let fire_group = file
        .group(group)
        .map_err(|e| FirePixelError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .ok_or_else(|| FirePixelError::GroupNotFound(group.to_string()))?;

    let longitudes = read_f32_values(&fire_group, FP_LONGITUDE)?;
    let latitudes = read_f32_values(&fire_group, FP_LATITUDE)?;
    let brightness = read_f32_values(&fire_group, FP_T4)?;
    let power = read_f32_values(&fire_group, FP_POWER)?;

    let expected = longitudes.len();
    for (name, values) in [
        (FP_LATITUDE, &latitudes),
        (FP_T4, &brightness),
        (FP_POWER, &power),
    ] {
        if values.len() != expected {
            return Err(FirePixelError::ShapeMismatch {
                name: name.to_string(),
                len: values.len(),
                expected,
            });
        }
    }

    let pixels: Vec<FirePixel> = longitudes
        .into_iter()
        .zip(latitudes)
        .zip(brightness)
        .zip(power)
        .map(|(((longitude, latitude), brightness_temp_k), frp_mw)| FirePixel {
            longitude,
            latitude,
            brightness_temp_k,
            frp_mw,
        })
        .collect();

    debug!(
        path = %path.display(),
        group = group,
        count = pixels.len(),
        "read fire pixels"
    );

    Ok(pixels)
}

fn read_f32_values(group: &netcdf::Group, name: &str) -> FirePixelResult<Vec<f32>> {
    let var = group
        .variable(name)
        .ok_or_else(|| FirePixelError::MissingVariable(name.to_string()))?;

    var.get_values::<f32, _>(..)
        .map_err(|e| FirePixelError::Read {
            name: name.to_string(),
            message: e.to_string(),
        })
}
