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

//! composite searches built on top of single queries

use std::{collections::BTreeSet, fmt, path::Path, str::FromStr};
use serde_json::Value;
use tracing::{info, warn};

use mast_common::datetime::iso_to_mjd;
use crate::{
    client::MastClient,
    errors::{MastApiError, Result, parse_error},
    request::{service, Columns, Filter, MashupRequest},
    response::{MastResponse, RecordExt, Resolution},
    retrieve::{products_from_response, RetrievalSummary, PRODUCT_FILENAME_FIELD},
    transport::MastTransport,
};

pub const ARCSEC_PER_DEG: f64 = 3600.0;

/// default paging of cone searches
pub const CONE_PAGESIZE: u32 = 2000;

/// result of a count-then-fetch query. `records` is only set if the count was below the ceiling
#[derive(Debug,Clone,PartialEq)]
pub struct Counted {
    pub count: u64,
    pub records: Option<MastResponse>,
}

/// Kepler light curve cadences (and data validation products)
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum KeplerCadence {
    Long,
    Short,
    DataValidation,
}

impl KeplerCadence {
    /// the cadence tag used in CAOM obs_id values
    pub fn query_cadence (&self)->&'static str {
        match self {
            KeplerCadence::Long | KeplerCadence::DataValidation => "lc",
            KeplerCadence::Short => "sc",
        }
    }

    /// substring that identifies the wanted products by filename
    pub fn product_marker (&self)->&'static str {
        match self {
            KeplerCadence::Long => "llc",
            KeplerCadence::Short => "slc",
            KeplerCadence::DataValidation => "_dv",
        }
    }
}

impl FromStr for KeplerCadence {
    type Err = MastApiError;

    fn from_str (s: &str)->Result<Self> {
        match s.to_lowercase().as_str() {
            "lc" => Ok(KeplerCadence::Long),
            "sc" => Ok(KeplerCadence::Short),
            "dv" => Ok(KeplerCadence::DataValidation),
            other => Err( parse_error!("unknown Kepler cadence '{}' (expected lc, sc or dv)", other))
        }
    }
}

impl fmt::Display for KeplerCadence {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        match self {
            KeplerCadence::Long => write!(f, "lc"),
            KeplerCadence::Short => write!(f, "sc"),
            KeplerCadence::DataValidation => write!(f, "dv"),
        }
    }
}

/// zero padded 9 digit Kepler id as used in target names and product paths
pub fn kepler_id_str (kepid: u64)->String {
    format!("{:09}", kepid)
}

/// EPIC ids from the obs_id column of K2 observations ("ktwo228813918-c16_lc" -> "228813918")
pub fn epic_ids (response: &MastResponse)->Vec<String> {
    response.records().iter()
        .filter_map( |r| r.get_str("obs_id"))
        .filter_map( |id| id.get(4..13))
        .map( |s| s.to_string())
        .collect()
}

/// target name under which the name resolver knows an EPIC id ("0228813918" -> "EPIC 228813918")
pub fn epic_target_name (epic_id: &str)->Result<String> {
    let id: u64 = epic_id.trim().parse().map_err(|_| parse_error!("not an EPIC id: '{}'", epic_id))?;
    Ok( format!("EPIC {id}"))
}

impl<T: MastTransport> MastClient<T> {

    pub async fn cone_search (&self, ra: f64, dec: f64, radius_arcsec: f64, pagesize: u32, page: u32)->Result<MastResponse> {
        let request = MashupRequest::cone( ra, dec, radius_arcsec / ARCSEC_PER_DEG)
            .paged( pagesize, page)
            .remove_null_columns( true)
            .remove_cache( true);
        self.query( &request).await
    }

    /// resolve `target_name` and do a cone search around it. Names that do not resolve produce an
    /// empty result so that batch callers can continue with the next name
    pub async fn target_name_cone_search (&self, target_name: &str, radius_arcsec: f64, pagesize: u32, page: u32)->Result<MastResponse> {
        match self.resolve_name( target_name).await? {
            Resolution::Resolved(c) => {
                info!("{} resolved to ra={}, dec={}", target_name, c.ra, c.dec);
                self.cone_search( c.ra, c.dec, radius_arcsec, pagesize, page).await
            }
            Resolution::NotFound => {
                warn!("no coordinates for {}", target_name);
                Ok( MastResponse::empty())
            }
        }
    }

    /// name-resolved cone searches for each target, one after the other, with all records merged
    /// into a single response. Names that do not resolve are skipped
    pub async fn observations_for_targets<S: AsRef<str>> (&self, target_names: &[S], radius_arcsec: f64)->Result<MastResponse> {
        let mut merged = MastResponse::empty();

        for name in target_names {
            let response = self.target_name_cone_search( name.as_ref(), radius_arcsec, CONE_PAGESIZE, 1).await?;
            merged.append( response);
        }

        info!("{} observations for {} targets", merged.len(), target_names.len());
        Ok(merged)
    }

    /// count the records `request` would return and only fetch them (all columns) if there are
    /// fewer than `max_records`
    pub async fn count_then_fetch (&self, request: &MashupRequest, max_records: u64)->Result<Counted> {
        let count = self.count( request).await?;

        if count < max_records {
            let records = self.query( &request.with_columns( Columns::All)).await?;
            Ok( Counted { count, records: Some(records) })
        } else {
            warn!("{} matches {} records (limit {}), not fetched", request.service, count, max_records);
            Ok( Counted { count, records: None })
        }
    }

    /// count-then-fetch of all observations of the given projects within `radius_deg` of a position
    pub async fn cone_search_with_project_counts (&self, ra: f64, dec: f64, radius_deg: f64, projects: &[&str], max_records: u64)->Result<Counted> {
        let request = MashupRequest::filtered( service::CAOM_FILTERED_POSITION, Columns::Count, vec![
            Filter::values( "project", projects.iter().copied())
        ]).position( ra, dec, radius_deg);

        self.count_then_fetch( &request, max_records).await
    }

    /// the data products of a single observation (first page of 100)
    pub async fn product_list (&self, obsid: impl Into<Value>)->Result<MastResponse> {
        self.query( &MashupRequest::products( obsid)).await
    }

    /// obsid of the Kepler time series observation for a (zero padded) Kepler id and cadence.
    /// Fails with a cardinality error unless exactly one observation matches
    pub async fn filter_kepler_timeseries (&self, kepid: &str, cadence: KeplerCadence)->Result<Value> {
        let cad = cadence.query_cadence();
        let request = MashupRequest::filtered( service::CAOM_FILTERED, Columns::Count, vec![
            Filter::values( "filters", ["KEPLER"]).with_separator(";"),
            Filter::free_text( "obs_id", &format!("%{cad}%")),
            Filter::free_text( "target_name", &format!("%{kepid}%")),
        ]);

        let count = self.count( &request).await?;
        if count != 1 {
            return Err( MastApiError::Cardinality { expected: 1, found: count as usize })
        }

        let response = self.query( &request.with_columns( Columns::All)).await?;
        response.single()?
            .get("obsid")
            .cloned()
            .ok_or_else(|| parse_error!("observation record without obsid"))
    }

    /// download the Kepler time series products (or data validation reports) of `kepid` into
    /// `local_dir/<kepid>/`
    pub async fn download_kepler_timeseries (&self, kepid: u64, cadence: KeplerCadence, local_dir: impl AsRef<Path>, get_new_only: bool)->Result<RetrievalSummary> {
        let kepid_str = kepler_id_str( kepid);
        let obsid = self.filter_kepler_timeseries( &kepid_str, cadence).await?;

        let products = self.product_list( obsid).await?;
        let marker = cadence.product_marker();
        let wanted = products_from_response( &products, |r| r.get_str( PRODUCT_FILENAME_FIELD).is_some_and( |f| f.contains(marker)))?;
        info!("{} of {} products of {} match '{}'", wanted.len(), products.len(), kepid_str, marker);

        self.retrieve_products( &wanted, local_dir.as_ref().join( &kepid_str), get_new_only).await
    }

    /// observations of `project` with a start time (t_min) within `half_window_days` of `start_time`
    /// (ISO date, UTC)
    pub async fn observations_starting_near (&self, start_time: &str, project: &str, half_window_days: f64)->Result<MastResponse> {
        let mjd = iso_to_mjd( start_time)?;
        let request = MashupRequest::filtered( service::CAOM_FILTERED, Columns::All, vec![
            Filter::values( "project", [project]).with_separator(";"),
            Filter::range( "t_min", mjd - half_window_days, mjd + half_window_days),
        ]);
        self.query( &request).await
    }

    /// the sorted set of "<col0>-<col1>" combinations of all observations around a target
    pub async fn unique_observation_types (&self, target_name: &str, radius_arcsec: f64, columns: (&str,&str))->Result<Vec<String>> {
        let response = self.target_name_cone_search( target_name, radius_arcsec, CONE_PAGESIZE, 1).await?;

        let types: BTreeSet<String> = response.records().iter().map( |r| {
            format!("{}-{}", r.get_string( columns.0).unwrap_or_default(), r.get_string( columns.1).unwrap_or_default())
        }).collect();

        Ok( types.into_iter().collect() )
    }

    /// TIC catalog entries for the given ids, restricted to `columns`
    pub async fn tic_by_ids (&self, ids: &[&str], columns: Columns)->Result<MastResponse> {
        let request = MashupRequest::filtered( service::CATALOGS_FILTERED_TIC, columns, vec![
            Filter::values( "ID", ids.iter().copied())
        ]);
        self.query( &request).await
    }
}
