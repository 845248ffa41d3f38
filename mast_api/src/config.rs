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

use std::path::PathBuf;
use serde::{Deserialize,Serialize};
use mast_common::net::url_with_path;

use crate::errors::Result;

pub const MAST_SERVER: &str = "mast.stsci.edu";
pub const INVOKE_PATH: &str = "/api/v0/invoke";
pub const DOWNLOAD_PATH: &str = "/api/v0/download/file";

/// MAST server and local storage parameters. All fields default to the public MAST host
#[derive(Clone,Serialize,Deserialize,Debug,PartialEq)]
#[serde(default)]
pub struct MastConfig {
    /// host name of the MAST server (e.g. "mast.stsci.edu")
    pub server: String,

    /// URL scheme, only overridden for local test servers
    pub scheme: String,

    /// path of the mashup query endpoint
    pub invoke_path: String,

    /// path prefix of the per-file download endpoint, the archive id gets appended
    pub download_path: String,

    pub user_agent: String,

    /// root dir for downloaded products
    pub data_dir: PathBuf,
}

impl Default for MastConfig {
    fn default() -> Self {
        MastConfig {
            server: MAST_SERVER.to_string(),
            scheme: "https".to_string(),
            invoke_path: INVOKE_PATH.to_string(),
            download_path: DOWNLOAD_PATH.to_string(),
            user_agent: format!("mast_api/{}", env!("CARGO_PKG_VERSION")),
            data_dir: PathBuf::from("mast_data"),
        }
    }
}

impl MastConfig {
    pub fn invoke_url (&self)->String {
        format!("{}://{}{}", self.scheme, self.server, self.invoke_path)
    }

    /// URL of the download endpoint for an archive id that already had its "mast:" prefix removed.
    /// Path elements of the id are percent-encoded
    pub fn download_url (&self, archive_id: &str)->Result<String> {
        let base = format!("{}://{}{}", self.scheme, self.server, self.download_path);
        Ok( url_with_path( &base, archive_id)? )
    }
}
