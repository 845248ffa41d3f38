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

//! download Kepler light curves or data validation products of a single target

use std::path::PathBuf;
use anyhow::Result;
use mast_common::{define_cli, check_cli, init_tracing, fs::ensure_writable_dir};
use mast_api::{load_config, KeplerCadence, MastClient, MastConfig};

define_cli! { ARGS [about="Kepler time series download tool"] =
    config: Option<String> [help="pathname of MastConfig RON file", long],
    cadence: String [help="lc (long cadence), sc (short cadence) or dv (data validation)", short, long, default_value="lc"],
    output_dir: Option<PathBuf> [help="directory to store files in (default is data_dir of config)", short, long],
    force: bool [help="download files even if they already exist", short, long],
    kepid: u64 [help="Kepler input catalog id (e.g. 11904151)"]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let config: MastConfig = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => MastConfig::default()
    };
    let cadence: KeplerCadence = ARGS.cadence.parse()?;
    let output_dir = ARGS.output_dir.clone().unwrap_or_else(|| config.data_dir.join("Kepler"));
    ensure_writable_dir( &output_dir)?;

    let client = MastClient::new( config)?;
    let summary = client.download_kepler_timeseries( ARGS.kepid, cadence, &output_dir, !ARGS.force).await?;

    println!("{} files downloaded, {} already present ({} bytes) in {:?}", summary.fetched, summary.skipped, summary.bytes, output_dir);
    Ok(())
}
