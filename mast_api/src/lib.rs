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

//! Client for the MAST (Mikulski Archive for Space Telescopes) "mashup" web API.
//!
//! The flow is strictly linear: build a [`MashupRequest`], execute it with a [`MastClient`], interpret
//! the [`MastResponse`], optionally run a related second query, then retrieve the referenced data
//! products into a local directory. Requests are issued one at a time and nothing is cached between
//! calls except the downloaded files themselves.
//!
//! ```no_run
//! # async fn run()->mast_api::Result<()> {
//! use mast_api::{MastClient, MastConfig};
//!
//! let client = MastClient::new( MastConfig::default())?;
//! let obs = client.target_name_cone_search( "KIC 011904151", 5.0, 2000, 1).await?;
//! println!("{} observations", obs.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub use config::*;

pub mod request;
pub use request::{Columns, Filter, FilterValue, MashupRequest, service};

pub mod response;
pub use response::{MastResponse, Record, RecordExt, Resolution, ResolvedCoordinate, QueryStatus};

pub mod transport;
pub use transport::{HttpTransport, MastTransport};

pub mod client;
pub use client::MastClient;

pub mod retrieve;
pub use retrieve::{DataProduct, ProductRef, RetrievalSummary, pair_products, products_from_response};

pub mod search;
pub use search::{Counted, KeplerCadence, epic_ids, epic_target_name};

mod errors;
pub use errors::*;

/// load a RON config file (e.g. `configs/mast.ron`)
pub fn load_config<C,P> (path: P)->Result<C> where C: serde::de::DeserializeOwned, P: AsRef<std::path::Path> {
    Ok( mast_common::config::load_config( path)? )
}
