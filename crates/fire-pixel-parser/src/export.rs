//! CSV serialization of fire-pixel tables.

use std::path::Path;

use crate::{FirePixel, FirePixelResult};

/// Column headers of the exported table, in output order.
pub const CSV_HEADER: [&str; 4] = ["Lon", "Lat", "brt_I04(K)", "frp(MW)"];

/// Write the fire-pixel table as CSV.
///
/// Emits the fixed `Lon,Lat,brt_I04(K),frp(MW)` header followed by one row
/// per record; an empty table yields a header-only file. Any existing file
/// at `path` is replaced.
pub fn write_csv(pixels: &[FirePixel], path: impl AsRef<Path>) -> FirePixelResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(CSV_HEADER)?;
    for pixel in pixels {
        writer.write_record(&[
            pixel.longitude.to_string(),
            pixel.latitude.to_string(),
            pixel.brightness_temp_k.to_string(),
            pixel.frp_mw.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
