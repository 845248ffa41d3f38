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

//! resolve a target name and list the CAOM observations within a given radius around it

use anyhow::Result;
use mast_common::{define_cli, check_cli, init_tracing};
use mast_api::{load_config, MastClient, MastConfig, MastResponse, RecordExt};

define_cli! { ARGS [about="MAST cone search around a named target"] =
    config: Option<String> [help="pathname of MastConfig RON file", long],
    radius: f64 [help="search radius in arcsec", short, long, default_value="5"],
    pagesize: u32 [help="max number of records per page", long, default_value="2000"],
    page: u32 [help="page number (1-based)", long, default_value="1"],
    csv: bool [help="print all columns as CSV", long],
    columns: String [help="comma separated columns for table output", long, default_value="obs_collection,instrument_name,target_name,obsid,t_exptime"],
    target: String [help="target name (e.g. \"KIC 011904151\")"]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let config: MastConfig = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => MastConfig::default()
    };
    let client = MastClient::new( config)?;

    let response = client.target_name_cone_search( &ARGS.target, ARGS.radius, ARGS.pagesize, ARGS.page).await?;

    if ARGS.csv {
        response.write_csv( std::io::stdout().lock())?;
    } else {
        print_table( &response);
    }

    Ok(())
}

fn print_table (response: &MastResponse) {
    let columns: Vec<&str> = ARGS.columns.split(',').map( |c| c.trim()).filter( |c| !c.is_empty()).collect();

    println!("{} observations (status: {})", response.len(), response.status);
    println!("{}", columns.join("\t"));
    for rec in response.records() {
        let row: Vec<String> = columns.iter().map( |c| rec.get_string(c).unwrap_or_default()).collect();
        println!("{}", row.join("\t"));
    }
}
