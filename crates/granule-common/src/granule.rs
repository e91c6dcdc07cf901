//! Remote granule addressing for public NOAA satellite archives.
//!
//! An archived granule is identified by its bucket, product hierarchy and
//! observation time, laid out as a `/`-joined object key. Two directory
//! conventions are in use across the NOAA buckets:
//!
//! - GOES-R products are filed by day-of-year and hour
//!   (`ABI-L2-SSTF/2023/112/20/…`),
//! - JPSS products are filed by calendar date
//!   (`NOAA20_VIIRS_AF_I-Band_EDR_NRT/NOAA20/VIIRS/2023/04/22/…`).

use chrono::{Datelike, NaiveDate};

/// Directory convention of the archive a granule lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathLayout {
    /// `YYYY/MM/DD` date directories (JPSS-style archives).
    CalendarDay,
    /// `YYYY/DDD/HH` day-of-year and hour directories (GOES-R-style
    /// archives). The hour selects the directory, not the granule; the
    /// filename already pins the exact observation window.
    OrdinalDay { hour: u32 },
}

/// A fully-specified request for one archived granule.
///
/// Immutable once constructed; consumed only to build object keys. No
/// field validation is performed: a malformed request builds a malformed
/// (not rejected) key, and the fetch against it fails downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranuleRequest {
    pub bucket: String,
    pub product: String,
    pub satellite: Option<String>,
    pub sensor: Option<String>,
    pub date: NaiveDate,
    pub layout: PathLayout,
    pub filename: String,
}

impl GranuleRequest {
    /// The within-bucket directory for this granule.
    ///
    /// Joins product, then satellite and sensor where present, then the
    /// date components of the archive layout: `MM`/`DD`/`HH` zero-padded
    /// to two digits, day-of-year to three.
    pub fn prefix(&self) -> String {
        let mut parts = vec![self.product.as_str()];
        if let Some(satellite) = &self.satellite {
            parts.push(satellite);
        }
        if let Some(sensor) = &self.sensor {
            parts.push(sensor);
        }
        let head = parts.join("/");

        match self.layout {
            PathLayout::CalendarDay => format!(
                "{}/{}/{:02}/{:02}",
                head,
                self.date.year(),
                self.date.month(),
                self.date.day()
            ),
            PathLayout::OrdinalDay { hour } => format!(
                "{}/{}/{:03}/{:02}",
                head,
                self.date.year(),
                self.date.ordinal(),
                hour
            ),
        }
    }

    /// Object key within the bucket: `prefix/filename`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.prefix(), self.filename)
    }

    /// Bucket-qualified key, the form archive tooling quotes:
    /// `bucket/prefix/filename`.
    pub fn qualified_key(&self) -> String {
        format!("{}/{}", self.bucket, self.key())
    }

    /// Anonymous-access HTTPS URL for the granule.
    ///
    /// Public NOAA buckets serve unauthenticated GETs through the
    /// virtual-hosted S3 endpoint.
    pub fn https_url(&self) -> String {
        format!("https://{}.s3.amazonaws.com/{}", self.bucket, self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ordinal_day_of_year() {
        // 2023-04-22 is day 112 of a non-leap year
        assert_eq!(date(2023, 4, 22).ordinal(), 112);
    }

    #[test]
    fn test_prefix_excludes_filename() {
        let req = GranuleRequest {
            bucket: "noaa-goes18".to_string(),
            product: "ABI-L2-SSTF".to_string(),
            satellite: None,
            sensor: None,
            date: date(2023, 4, 22),
            layout: PathLayout::OrdinalDay { hour: 20 },
            filename: "granule.nc".to_string(),
        };
        assert_eq!(req.prefix(), "ABI-L2-SSTF/2023/112/20");
        assert_eq!(req.key(), "ABI-L2-SSTF/2023/112/20/granule.nc");
    }
}
