//! Fetch-manifest loading.
//!
//! A manifest declares the granules to fetch and the extraction jobs to run
//! against them afterwards. Without a manifest file the built-in reference
//! set is used.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use granule_common::{GranuleRequest, PathLayout};

/// Manifest of granule requests and extraction jobs.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchManifest {
    pub granules: Vec<GranuleSpec>,
    #[serde(default)]
    pub extracts: Vec<ExtractSpec>,
}

/// One granule entry as written in a manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct GranuleSpec {
    pub bucket: String,
    pub product: String,
    #[serde(default)]
    pub satellite: Option<String>,
    #[serde(default)]
    pub sensor: Option<String>,
    pub date: NaiveDate,
    /// Archive directory convention: "calendar-day" or "ordinal-day".
    pub layout: String,
    /// Archive hour directory; required by the ordinal-day layout.
    #[serde(default)]
    pub hour: Option<u32>,
    pub filename: String,
}

/// One extraction job: the fire-pixel group of a fetched granule to CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractSpec {
    /// Filename of the fetched granule to read.
    pub file: String,
    /// NetCDF group holding the detection arrays.
    #[serde(default = "default_group")]
    pub group: String,
    /// Filename of the CSV to write.
    pub output: String,
}

fn default_group() -> String {
    fire_pixel_parser::FIRE_PIXEL_GROUP.to_string()
}

impl GranuleSpec {
    /// Resolve this entry into a typed request.
    pub fn request(&self) -> Result<GranuleRequest> {
        let layout = match self.layout.as_str() {
            "calendar-day" => PathLayout::CalendarDay,
            "ordinal-day" => {
                let hour = self.hour.with_context(|| {
                    format!(
                        "granule {}: ordinal-day layout requires an hour",
                        self.filename
                    )
                })?;
                PathLayout::OrdinalDay { hour }
            }
            other => bail!(
                "granule {}: unknown archive layout '{}'",
                self.filename,
                other
            ),
        };

        Ok(GranuleRequest {
            bucket: self.bucket.clone(),
            product: self.product.clone(),
            satellite: self.satellite.clone(),
            sensor: self.sensor.clone(),
            date: self.date,
            layout,
            filename: self.filename.clone(),
        })
    }
}

impl FetchManifest {
    /// Load a manifest from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        let manifest: FetchManifest = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))?;

        debug!(
            granules = manifest.granules.len(),
            extracts = manifest.extracts.len(),
            path = %path.display(),
            "loaded fetch manifest"
        );
        Ok(manifest)
    }

    /// Resolve all granule entries into typed requests.
    pub fn requests(&self) -> Result<Vec<GranuleRequest>> {
        self.granules.iter().map(|spec| spec.request()).collect()
    }

    /// The built-in reference set: one April 2023 observation window across
    /// the GOES-R and JPSS archives, plus the fire-pixel extraction of the
    /// Active-Fire granule.
    pub fn reference_set() -> Self {
        let date = NaiveDate::from_ymd_opt(2023, 4, 22).unwrap();

        let granules = vec![
            // GOES-18 sea surface temperature
            GranuleSpec {
                bucket: "noaa-goes18".to_string(),
                product: "ABI-L2-SSTF".to_string(),
                satellite: None,
                sensor: None,
                date,
                layout: "ordinal-day".to_string(),
                hour: Some(20),
                filename:
                    "OR_ABI-L2-SSTF-M6_G18_s20231122000211_e20231122059519_c20231122105091.nc"
                        .to_string(),
            },
            // GOES-16 reflected shortwave radiation
            GranuleSpec {
                bucket: "noaa-goes16".to_string(),
                product: "ABI-L2-RSRF".to_string(),
                satellite: None,
                sensor: None,
                date,
                layout: "ordinal-day".to_string(),
                hour: Some(18),
                filename:
                    "OR_ABI-L2-RSRF-M6_G16_s20231121800204_e20231121809512_c20231121859124.nc"
                        .to_string(),
            },
            // NOAA-20 VIIRS aerosol optical depth
            GranuleSpec {
                bucket: "noaa-jpss".to_string(),
                product: "NOAA20_VIIRS_Aerosol_Optical_Depth_EDR".to_string(),
                satellite: Some("NOAA20".to_string()),
                sensor: Some("VIIRS".to_string()),
                date,
                layout: "calendar-day".to_string(),
                hour: None,
                filename: "JRR-AOD_v2r3_j01_s202304220518119_e202304220519346_c202304220600390.nc"
                    .to_string(),
            },
            // NOAA-20 VIIRS active fire, same overpass as the AOD granule
            GranuleSpec {
                bucket: "noaa-jpss".to_string(),
                product: "NOAA20_VIIRS_AF_I-Band_EDR_NRT".to_string(),
                satellite: Some("NOAA20".to_string()),
                sensor: Some("VIIRS".to_string()),
                date,
                layout: "calendar-day".to_string(),
                hour: None,
                filename:
                    "AF-Iband_v1r1_j01_s202304220518119_e202304220519346_c202304220557358.nc"
                        .to_string(),
            },
            // NOAA-20 VIIRS M16 sensor data record
            GranuleSpec {
                bucket: "noaa-nesdis-n20-pds".to_string(),
                product: "VIIRS-M16-SDR".to_string(),
                satellite: None,
                sensor: None,
                date,
                layout: "calendar-day".to_string(),
                hour: None,
                filename:
                    "SVM16_j01_d20230422_t0516461_e0518106_b28103_c20230422055438143201_oeac_ops.h5"
                        .to_string(),
            },
        ];

        let extracts = vec![ExtractSpec {
            file: "AF-Iband_v1r1_j01_s202304220518119_e202304220519346_c202304220557358.nc"
                .to_string(),
            group: default_group(),
            output: "VIIRS_AF_j01_s202304220518119_e202304220519346.csv".to_string(),
        }];

        FetchManifest { granules, extracts }
    }
}
