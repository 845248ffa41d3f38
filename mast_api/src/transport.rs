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

//! the HTTP seam of the client. `HttpTransport` is the reqwest based production implementation,
//! tests substitute their own `MastTransport`

use std::io::Write;
use async_trait::async_trait;
use reqwest::{Client, header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE}};
use tracing::debug;

use mast_common::net::{self, HttpReply};
use crate::{config::MastConfig, errors::Result};

#[async_trait]
pub trait MastTransport: Send + Sync {
    /// POST a form encoded body and return status, headers and body text. Each call uses its own connection
    async fn post_form (&self, url: &str, body: String) -> Result<HttpReply>;

    /// GET `url` and stream the content into `out`, returning the number of bytes written.
    /// Anything but a 200 reply is an error
    async fn get_into (&self, url: &str, out: &mut (dyn Write + Send)) -> Result<u64>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new (config: &MastConfig)->Result<Self> {
        // no idle pool means every request opens and closes its own connection
        let client = Client::builder()
            .user_agent( config.user_agent.as_str())
            .pool_max_idle_per_host(0)
            .build()?;
        Ok( HttpTransport { client } )
    }

    fn form_headers ()->HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert( CONTENT_TYPE, HeaderValue::from_static("application/x-www-form-urlencoded"));
        headers.insert( ACCEPT, HeaderValue::from_static("text/plain"));
        headers
    }
}

#[async_trait]
impl MastTransport for HttpTransport {
    async fn post_form (&self, url: &str, body: String) -> Result<HttpReply> {
        let reply = net::post_text( &self.client, url, Self::form_headers(), body).await?;
        debug!("{} -> status {}, {} bytes", url, reply.status, reply.body.len());
        Ok(reply)
    }

    async fn get_into (&self, url: &str, out: &mut (dyn Write + Send)) -> Result<u64> {
        Ok( net::download_to_writer( &self.client, url, &None, out).await? )
    }
}
