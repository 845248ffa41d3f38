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

//! query execution: serialize a `MashupRequest`, POST it to the invoke endpoint and interpret the reply

use serde::Deserialize;
use tracing::{debug, info, warn};

use mast_common::net::HttpReply;
use crate::{
    config::MastConfig,
    errors::{MastApiError, Result},
    request::{Columns, MashupRequest},
    response::{MastResponse, QueryStatus, Resolution},
    transport::{HttpTransport, MastTransport},
};

/// a stateless MAST client. Every call re-fetches, nothing is cached between calls
pub struct MastClient<T: MastTransport = HttpTransport> {
    config: MastConfig,
    transport: T,
}

impl MastClient<HttpTransport> {
    pub fn new (config: MastConfig)->Result<Self> {
        let transport = HttpTransport::new( &config)?;
        Ok( MastClient { config, transport } )
    }
}

impl<T: MastTransport> MastClient<T> {
    pub fn with_transport (config: MastConfig, transport: T)->Self {
        MastClient { config, transport }
    }

    pub fn config (&self)->&MastConfig { &self.config }

    pub fn transport (&self)->&T { &self.transport }

    /// send one request and return the raw reply. Non-2xx replies and replies with status ERROR are errors
    pub async fn execute (&self, request: &MashupRequest)->Result<HttpReply> {
        let body = request.to_form_body()?;
        let url = self.config.invoke_url();
        debug!("request {}", request.to_json()?);

        let reply = self.transport.post_form( &url, body).await?;
        if !reply.is_success() {
            return Err( MastApiError::HttpStatus( reply.status, reply.body))
        }
        check_service_status( &reply.body)?;

        Ok(reply)
    }

    /// execute and decode into a `MastResponse`
    pub async fn query (&self, request: &MashupRequest)->Result<MastResponse> {
        let reply = self.execute( request).await?;
        let response = MastResponse::from_json( &reply.body)?;

        if response.query_status() == QueryStatus::Executing {
            warn!("{} still executing on server, result might be incomplete", request.service);
        }
        info!("{} returned {} records", request.service, response.len());
        Ok(response)
    }

    /// run `request` with COUNT_BIG(*) as the only column and return the count
    pub async fn count (&self, request: &MashupRequest)->Result<u64> {
        let count_request = request.with_columns( Columns::Count);
        let n = self.query( &count_request).await?.count()?;
        debug!("{} count: {}", request.service, n);
        Ok(n)
    }

    pub async fn resolve_name (&self, target_name: &str)->Result<Resolution> {
        let reply = self.execute( &MashupRequest::name_lookup( target_name)).await?;
        Resolution::from_json( &reply.body)
    }
}

#[derive(Deserialize)]
struct StatusProbe {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

/// reject replies that report status ERROR, everything else is left to the caller
fn check_service_status (body: &str)->Result<()> {
    let probe: StatusProbe = serde_json::from_str( body)?;
    if probe.status.as_deref() == Some("ERROR") {
        let msg = probe.msg.filter( |m| !m.is_empty()).unwrap_or_else(|| "no message".to_string());
        Err( MastApiError::ServiceError( msg))
    } else {
        Ok(())
    }
}
