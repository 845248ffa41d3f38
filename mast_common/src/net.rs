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

//! common utility functions for network operations

use std::io::Write;
use reqwest::{header::HeaderMap, Client, StatusCode};
use regex::Regex;
use lazy_static::lazy_static;
use tracing::debug;

use crate::define_error;

const PATH: usize = 5;

lazy_static! {
    // [scheme,user,host,port,path,query]
    static ref URL_RE: Regex = Regex::new( r"(.+)://(?:(.+)@)?([^:/]+)(?::(\d+))?(?:/([^?]+))?(?:\?(.+))?").unwrap();
    static ref FNAME_RE: Regex = Regex::new( r"(?:.*/)?(.+)").unwrap();
}

define_error!{ pub MastNetError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    StatusError(u16,String) : "response status {0} for {1}",
    UrlError(#[from] url::ParseError) : "invalid URL: {0}",
    NotABaseUrl(String) : "URL cannot have path segments: {0}"
}

pub type Result<T> = std::result::Result<T, MastNetError>;

/// the parts of a HTTP response we keep around after the connection is gone
#[derive(Debug,Clone)]
pub struct HttpReply {
    pub status: u16,
    pub headers: Vec<(String,String)>,
    pub body: String,
}

impl HttpReply {
    pub fn is_success (&self)->bool { (200..300).contains(&self.status) }

    pub fn header (&self, name: &str)->Option<&str> {
        self.headers.iter().find( |(k,_)| k.eq_ignore_ascii_case(name)).map( |(_,v)| v.as_str())
    }
}

/// application/x-www-form-urlencoded encoding of a single value
pub fn form_urlencode (s: &str) -> String {
    url::form_urlencoded::byte_serialize( s.as_bytes()).collect()
}

/// append the '/' separated elements of `path` to `base`, percent-encoding each of them
/// (e.g. "a b/c?.fits" becomes "a%20b/c%3F.fits")
pub fn url_with_path (base: &str, path: &str) -> Result<String> {
    let mut url = url::Url::parse( base)?;
    url.path_segments_mut()
        .map_err( |_| MastNetError::NotABaseUrl( base.to_string()))?
        .pop_if_empty()
        .extend( path.split('/').filter( |s| !s.is_empty()));
    Ok( url.into())
}

/// POST a pre-encoded body and return status, headers and the body text regardless of status.
/// Status interpretation is left to the caller
pub async fn post_text (client: &Client, url: &str, headers: HeaderMap, body: String) -> Result<HttpReply> {
    debug!("POST {} ({} bytes)", url, body.len());
    let response = client.post( url).headers( headers).body( body).send().await?;

    let status = response.status().as_u16();
    let headers = response.headers().iter()
        .map( |(k,v)| (k.as_str().to_string(), String::from_utf8_lossy( v.as_bytes()).to_string()))
        .collect();
    let body = response.text().await?;

    Ok( HttpReply { status, headers, body } )
}

/// fetch URL using HTTP GET and write the content to `out` in chunks to support large files.
/// Returns the number of bytes written
pub async fn download_to_writer<W> (client: &Client, url: &str, opt_headers: &Option<HeaderMap>, out: &mut W) -> Result<u64> where W: Write + ?Sized {
    let mut len: u64 = 0;

    let mut req = client.get(url);
    if let Some(headermap) = &opt_headers {
        req = req.headers(headermap.clone())
    }

    let mut response = req.send().await?;

    match response.status() {
        StatusCode::OK => {
            while let Some(chunk) = response.chunk().await? {
                len += chunk.len() as u64;
                out.write_all(&chunk)?;
            }
            out.flush()?;
            Ok(len)
        }
        StatusCode::NOT_FOUND => {
            Err( MastNetError::NotFoundError( url.to_string()))
        }
        other => {
            Err( MastNetError::StatusError( other.as_u16(), url.to_string()))
        }
    }
}

/// get filename part (last path element) of complete URL
/// NOTE - this does not work for partial (relative) URLs
pub fn url_file_name<'a> (url: &'a str) -> Option<&'a str> {
    URL_RE.captures( url)
    .and_then( |cap| cap.get( PATH))
    .map( |m| m.as_str())
    .and_then( |p| FNAME_RE.captures( p))
    .and_then( |cap| cap.get(1))
    .map( |m| m.as_str())
}
