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

//! loading of RON config files

use std::path::Path;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::define_error;

define_error!{ pub MastConfigError =
    IOError(#[from] std::io::Error) : "config IO error: {0}",
    RonError(#[from] ron::error::SpannedError) : "config RON error: {0}"
}

pub type Result<T> = std::result::Result<T, MastConfigError>;

/// deserialize a config struct from the RON file at `path`
pub fn load_config<C,P> (path: P) -> Result<C> where C: DeserializeOwned, P: AsRef<Path> {
    let path = path.as_ref();
    debug!("loading config {:?}", path);
    let src = std::fs::read_to_string(path)?;
    config_from_str( &src)
}

/// deserialize a config struct from a RON string
pub fn config_from_str<C> (src: &str) -> Result<C> where C: DeserializeOwned {
    Ok( ron::from_str(src)? )
}
