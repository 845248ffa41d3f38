/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! time conversions between ISO date strings, chrono `DateTime<Utc>` and Modified Julian Dates

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::define_error;

define_error!{ pub MastTimeError =
    ParseError(#[from] chrono::ParseError) : "time parse error: {0}",
    RangeError(String) : "time out of range: {0}"
}

pub type Result<T> = std::result::Result<T, MastTimeError>;

/// unix epoch (1970-01-01T00:00:00Z) as MJD
pub const MJD_UNIX_EPOCH: f64 = 40587.0;

pub const SECS_PER_DAY: f64 = 86400.0;

/// MJD of given UTC date (ignores leap seconds)
pub fn to_mjd (dt: &DateTime<Utc>) -> f64 {
    let secs = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9;
    MJD_UNIX_EPOCH + secs / SECS_PER_DAY
}

pub fn from_mjd (mjd: f64) -> Result<DateTime<Utc>> {
    let millis = ((mjd - MJD_UNIX_EPOCH) * SECS_PER_DAY * 1000.0).round();
    if !millis.is_finite() {
        return Err( MastTimeError::RangeError( format!("{mjd}")))
    }
    DateTime::<Utc>::from_timestamp_millis( millis as i64).ok_or_else(|| MastTimeError::RangeError( format!("{mjd}")))
}

/// parse an ISO date in "YYYY-MM-DD hh:mm:ss[.fff]" (astropy 'iso') or RFC 3339 format, interpreted as UTC
pub fn parse_iso_utc (s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok( dt.with_timezone(&Utc))
    }
    let ndt = NaiveDateTime::parse_from_str( s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str( s, "%Y-%m-%dT%H:%M:%S%.f"))?;
    Ok( Utc.from_utc_datetime(&ndt))
}

pub fn iso_to_mjd (s: &str) -> Result<f64> {
    parse_iso_utc(s).map(|dt| to_mjd(&dt))
}
