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

use thiserror::Error;
use reqwest;
use serde_json;
use mast_common::{net::MastNetError, config::MastConfigError, datetime::MastTimeError};

pub type Result<T> = std::result::Result<T, MastApiError>;

#[derive(Error,Debug)]
pub enum MastApiError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("net error {0}")]
    NetError( #[from] MastNetError),

    #[error("http error {0}")]
    HttpError( #[from] reqwest::Error),

    /// non-2xx reply from the server (status code and response body)
    #[error("server responded with status {0}: {1}")]
    HttpStatus(u16, String),

    /// the server processed the request but reported status ERROR
    #[error("MAST service error: {0}")]
    ServiceError(String),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    #[error("config error {0}")]
    ConfigError( #[from] MastConfigError),

    #[error("time error {0}")]
    TimeError( #[from] MastTimeError),

    #[error("expected exactly {expected} match(es), found {found}")]
    Cardinality { expected: usize, found: usize },

    #[error("parse error {0}")]
    ParseError(String),

    /// a generic error
    #[error("operation failed {0}")]
    OpFailed(String)
}

macro_rules! parse_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::MastApiError::ParseError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use parse_error;
