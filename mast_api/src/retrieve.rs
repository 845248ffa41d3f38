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

//! download of data products into a local directory.
//!
//! A product reference is either a direct http(s) URL or a "mast:" archive id that is fetched through
//! the per-file download endpoint. Files are streamed into a temp file within the target dir and only
//! renamed to their final name once complete

use std::path::Path;
use tracing::{debug, info};

use mast_common::{fs::{ensure_dir, is_existing_file}, net::url_file_name};
use crate::{
    client::MastClient,
    config::MastConfig,
    errors::{MastApiError, Result, parse_error},
    response::{MastResponse, Record, RecordExt},
    transport::MastTransport,
};

/// scheme tag of archive-internal ids
pub const ARCHIVE_SCHEME: &str = "mast:";

/// product fields of Mast.Caom.Products replies
pub const DATA_URI_FIELD: &str = "dataURI";
pub const PRODUCT_FILENAME_FIELD: &str = "productFilename";

#[derive(Debug,Clone,PartialEq,Eq)]
pub enum ProductRef {
    DirectUrl(String),
    /// archive id without the "mast:" scheme prefix
    ArchiveUri(String),
}

impl ProductRef {
    pub fn parse (s: &str)->Self {
        let s = s.trim();
        if s.contains("http") {
            ProductRef::DirectUrl( s.to_string())
        } else {
            ProductRef::ArchiveUri( s.strip_prefix( ARCHIVE_SCHEME).unwrap_or(s).to_string())
        }
    }

    /// the URL to GET for this reference
    pub fn url (&self, config: &MastConfig)->Result<String> {
        match self {
            ProductRef::DirectUrl(url) => Ok( url.clone()),
            ProductRef::ArchiveUri(id) => config.download_url( id),
        }
    }

    /// last path element, if any
    pub fn file_name (&self)->Option<&str> {
        match self {
            ProductRef::DirectUrl(url) => url_file_name( url),
            ProductRef::ArchiveUri(id) => id.rsplit('/').next().filter( |s| !s.is_empty()),
        }
    }
}

impl From<&str> for ProductRef {
    fn from (s: &str)->Self { ProductRef::parse(s) }
}

/// a product reference paired with the local filename to store it under
#[derive(Debug,Clone,PartialEq)]
pub struct DataProduct {
    pub uri: ProductRef,
    pub filename: String,
}

impl DataProduct {
    pub fn new (uri: &str, filename: &str)->Self {
        DataProduct { uri: ProductRef::parse(uri), filename: filename.to_string() }
    }
}

/// pair positionally matching reference and filename lists
pub fn pair_products<S1,S2> (uris: &[S1], filenames: &[S2])->Result<Vec<DataProduct>> where S1: AsRef<str>, S2: AsRef<str> {
    if uris.len() != filenames.len() {
        return Err( parse_error!("{} product references but {} filenames", uris.len(), filenames.len()))
    }
    Ok( uris.iter().zip( filenames.iter()).map( |(u,f)| DataProduct::new( u.as_ref(), f.as_ref())).collect() )
}

/// products of a Mast.Caom.Products reply whose records satisfy `pred`
pub fn products_from_response<F> (response: &MastResponse, pred: F)->Result<Vec<DataProduct>> where F: Fn(&Record)->bool {
    let mut products = Vec::new();
    for rec in response.records().iter().filter( |r| pred(r)) {
        let uri = rec.get_str( DATA_URI_FIELD).ok_or_else(|| parse_error!("product record without {}", DATA_URI_FIELD))?;
        let filename = rec.get_str( PRODUCT_FILENAME_FIELD).ok_or_else(|| parse_error!("product record without {}", PRODUCT_FILENAME_FIELD))?;
        products.push( DataProduct::new( uri, filename));
    }
    Ok(products)
}

/// a name that stays inside the target dir (no path separators, not "." or "..")
fn is_plain_filename (name: &str)->bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/','\\'])
}

#[derive(Debug,Clone,Copy,Default,PartialEq,Eq)]
pub struct RetrievalSummary {
    pub fetched: usize,
    pub skipped: usize,
    pub bytes: u64,
}

impl<T: MastTransport> MastClient<T> {
    /// make sure all products exist in `local_dir`, which is created if necessary.
    /// If `get_new_only` is set files that already exist are not fetched again (no content check).
    /// The first failed download aborts the batch
    pub async fn retrieve_products (&self, products: &[DataProduct], local_dir: impl AsRef<Path>, get_new_only: bool)->Result<RetrievalSummary> {
        if let Some(product) = products.iter().find( |p| !is_plain_filename( &p.filename)) {
            return Err( parse_error!("invalid product filename '{}'", product.filename))
        }

        let local_dir = local_dir.as_ref();
        ensure_dir( local_dir)?;

        let mut summary = RetrievalSummary::default();
        for product in products {
            if get_new_only && is_existing_file( local_dir, &product.filename) {
                debug!("{} already downloaded", product.filename);
                summary.skipped += 1;
                continue;
            }

            summary.bytes += self.fetch_product( product, local_dir).await?;
            summary.fetched += 1;
        }

        info!("retrieved {} products into {:?} ({} skipped, {} bytes)", summary.fetched, local_dir, summary.skipped, summary.bytes);
        Ok(summary)
    }

    async fn fetch_product (&self, product: &DataProduct, local_dir: &Path)->Result<u64> {
        let url = product.uri.url( self.config())?;
        info!("downloading {} ..", product.filename);

        // don't use the target path yet as that would expose partial downloads
        let mut file = tempfile::NamedTempFile::new_in( local_dir)?;
        let len = self.transport().get_into( &url, file.as_file_mut()).await?;

        let path = local_dir.join( &product.filename);
        file.persist( &path).map_err(|e| MastApiError::IOError(e.error))?;
        debug!("{} bytes saved to {:?}", len, path);

        Ok(len)
    }
}
