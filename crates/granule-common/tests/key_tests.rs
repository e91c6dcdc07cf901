//! Tests for granule object-key construction.

use chrono::NaiveDate;
use granule_common::{GranuleRequest, PathLayout};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn goes_sst() -> GranuleRequest {
    GranuleRequest {
        bucket: "noaa-goes18".to_string(),
        product: "ABI-L2-SSTF".to_string(),
        satellite: None,
        sensor: None,
        date: date(2023, 4, 22),
        layout: PathLayout::OrdinalDay { hour: 20 },
        filename: "OR_ABI-L2-SSTF-M6_G18_s20231122000211_e20231122059519_c20231122105091.nc"
            .to_string(),
    }
}

fn viirs_aod() -> GranuleRequest {
    GranuleRequest {
        bucket: "noaa-jpss".to_string(),
        product: "NOAA20_VIIRS_Aerosol_Optical_Depth_EDR".to_string(),
        satellite: Some("NOAA20".to_string()),
        sensor: Some("VIIRS".to_string()),
        date: date(2023, 4, 22),
        layout: PathLayout::CalendarDay,
        filename: "JRR-AOD_v2r3_j01_s202304220518119_e202304220519346_c202304220600390.nc"
            .to_string(),
    }
}

// ============================================================================
// Ordinal-day (GOES-R) keys
// ============================================================================

#[test]
fn test_ordinal_day_qualified_key() {
    assert_eq!(
        goes_sst().qualified_key(),
        "noaa-goes18/ABI-L2-SSTF/2023/112/20/\
         OR_ABI-L2-SSTF-M6_G18_s20231122000211_e20231122059519_c20231122105091.nc"
    );
}

#[test]
fn test_ordinal_day_pads_day_of_year_and_hour() {
    let mut req = goes_sst();
    req.date = date(2023, 1, 5);
    req.layout = PathLayout::OrdinalDay { hour: 3 };
    assert_eq!(req.prefix(), "ABI-L2-SSTF/2023/005/03");
}

#[test]
fn test_ordinal_day_late_year_unpadded() {
    let mut req = goes_sst();
    req.date = date(2023, 12, 31);
    req.layout = PathLayout::OrdinalDay { hour: 23 };
    assert_eq!(req.prefix(), "ABI-L2-SSTF/2023/365/23");
}

// ============================================================================
// Calendar-day (JPSS) keys
// ============================================================================

#[test]
fn test_calendar_day_with_satellite_and_sensor() {
    assert_eq!(
        viirs_aod().qualified_key(),
        "noaa-jpss/NOAA20_VIIRS_Aerosol_Optical_Depth_EDR/NOAA20/VIIRS/2023/04/22/\
         JRR-AOD_v2r3_j01_s202304220518119_e202304220519346_c202304220600390.nc"
    );
}

#[test]
fn test_calendar_day_without_satellite_or_sensor() {
    let req = GranuleRequest {
        bucket: "noaa-nesdis-n20-pds".to_string(),
        product: "VIIRS-M16-SDR".to_string(),
        satellite: None,
        sensor: None,
        date: date(2023, 4, 22),
        layout: PathLayout::CalendarDay,
        filename: "SVM16_j01_d20230422_t0516461_e0518106_b28103_c20230422055438143201_oeac_ops.h5"
            .to_string(),
    };
    assert_eq!(
        req.qualified_key(),
        "noaa-nesdis-n20-pds/VIIRS-M16-SDR/2023/04/22/\
         SVM16_j01_d20230422_t0516461_e0518106_b28103_c20230422055438143201_oeac_ops.h5"
    );
}

#[test]
fn test_calendar_day_pads_month_and_day() {
    let mut req = viirs_aod();
    req.date = date(2024, 1, 9);
    assert_eq!(
        req.prefix(),
        "NOAA20_VIIRS_Aerosol_Optical_Depth_EDR/NOAA20/VIIRS/2024/01/09"
    );
}

// ============================================================================
// General properties
// ============================================================================

#[test]
fn test_key_building_is_idempotent() {
    let req = goes_sst();
    assert_eq!(req.qualified_key(), req.qualified_key());
    assert_eq!(req.https_url(), req.https_url());
}

#[test]
fn test_key_is_prefix_plus_filename() {
    let req = viirs_aod();
    assert_eq!(req.key(), format!("{}/{}", req.prefix(), req.filename));
}

#[test]
fn test_https_url_uses_virtual_hosted_endpoint() {
    assert_eq!(
        goes_sst().https_url(),
        "https://noaa-goes18.s3.amazonaws.com/ABI-L2-SSTF/2023/112/20/\
         OR_ABI-L2-SSTF-M6_G18_s20231122000211_e20231122059519_c20231122105091.nc"
    );
}
