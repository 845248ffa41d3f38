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

//! construction of MAST "mashup" request documents.
//!
//! A request is a JSON object `{service, format, params:{..}, pagesize?, page?, ..}` that is sent
//! urlencoded as the `request` form field of a POST to the invoke endpoint

use serde::Serialize;
use serde_json::{Map, Value};

use mast_common::net::form_urlencode;
use crate::errors::Result;

/// MAST service names we use
pub mod service {
    pub const NAME_LOOKUP: &str = "Mast.Name.Lookup";
    pub const CAOM_CONE: &str = "Mast.Caom.Cone";
    pub const CAOM_FILTERED: &str = "Mast.Caom.Filtered";
    pub const CAOM_FILTERED_POSITION: &str = "Mast.Caom.Filtered.Position";
    pub const CAOM_PRODUCTS: &str = "Mast.Caom.Products";
    pub const CATALOGS_FILTERED_TIC: &str = "Mast.Catalogs.Filtered.Tic";
}

/// the aggregate column MAST uses for count-only queries
pub const COUNT_COLUMN: &str = "COUNT_BIG(*)";

/// the only output format we request
pub const JSON_FORMAT: &str = "json";

/// a single filter value, which is either a literal or a {min,max} range
#[derive(Serialize,Debug,Clone,PartialEq)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    Float(f64),
    Range { min: f64, max: f64 },
}

impl From<&str> for FilterValue {
    fn from (s: &str)->Self { FilterValue::Text(s.to_string()) }
}

impl From<String> for FilterValue {
    fn from (s: String)->Self { FilterValue::Text(s) }
}

impl From<i64> for FilterValue {
    fn from (n: i64)->Self { FilterValue::Int(n) }
}

impl From<f64> for FilterValue {
    fn from (x: f64)->Self { FilterValue::Float(x) }
}

/// a filter descriptor of a Filtered query: "param_name IN values", optionally with a
/// SQL-like free text pattern (e.g. "%lc%")
#[derive(Serialize,Debug,Clone,PartialEq)]
#[serde(rename_all="camelCase")]
pub struct Filter {
    pub param_name: String,
    pub values: Vec<FilterValue>,
    #[serde(skip_serializing_if="Option::is_none")]
    pub free_text: Option<String>,
    #[serde(skip_serializing_if="Option::is_none")]
    pub separator: Option<String>,
}

impl Filter {
    pub fn values<V,I> (param_name: &str, values: I)->Self where V: Into<FilterValue>, I: IntoIterator<Item=V> {
        Filter {
            param_name: param_name.to_string(),
            values: values.into_iter().map( |v| v.into()).collect(),
            free_text: None,
            separator: None
        }
    }

    /// a pattern match filter with empty value list
    pub fn free_text (param_name: &str, pattern: &str)->Self {
        Filter {
            param_name: param_name.to_string(),
            values: Vec::new(),
            free_text: Some(pattern.to_string()),
            separator: None
        }
    }

    pub fn range (param_name: &str, min: f64, max: f64)->Self {
        Filter {
            param_name: param_name.to_string(),
            values: vec![ FilterValue::Range{min,max} ],
            free_text: None,
            separator: None
        }
    }

    pub fn with_separator (mut self, sep: &str)->Self {
        self.separator = Some(sep.to_string());
        self
    }
}

/// the columns a Filtered query should return
#[derive(Debug,Clone,PartialEq)]
pub enum Columns {
    All,
    Count,
    List(Vec<String>),
}

impl Columns {
    pub fn as_param (&self)->String {
        match self {
            Columns::All => "*".to_string(),
            Columns::Count => COUNT_COLUMN.to_string(),
            Columns::List(names) => names.join(","),
        }
    }
}

/// the `params` object of a request. Service specific parameters without a dedicated field go into `extra`
#[derive(Serialize,Debug,Clone,PartialEq,Default)]
pub struct MashupParams {
    #[serde(skip_serializing_if="Option::is_none")]
    pub columns: Option<String>,
    #[serde(skip_serializing_if="Option::is_none")]
    pub filters: Option<Vec<Filter>>,
    #[serde(skip_serializing_if="Option::is_none")]
    pub position: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String,Value>,
}

#[derive(Serialize,Debug,Clone,PartialEq)]
pub struct MashupRequest {
    pub service: String,
    pub format: String,
    pub params: MashupParams,
    #[serde(skip_serializing_if="Option::is_none")]
    pub pagesize: Option<u32>,
    #[serde(skip_serializing_if="Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if="Option::is_none")]
    pub removenullcolumns: Option<bool>,
    #[serde(skip_serializing_if="Option::is_none")]
    pub removecache: Option<bool>,
}

impl MashupRequest {
    pub fn new (service: &str)->Self {
        MashupRequest {
            service: service.to_string(),
            format: JSON_FORMAT.to_string(),
            params: MashupParams::default(),
            pagesize: None,
            page: None,
            removenullcolumns: None,
            removecache: None
        }
    }

    /// resolve a target name ("KIC 011904151", "EPIC 228813918") into coordinates
    pub fn name_lookup (target_name: &str)->Self {
        MashupRequest::new( service::NAME_LOOKUP)
            .param( "input", target_name)
            .param( "format", JSON_FORMAT)
    }

    /// CAOM cone search. Note the service expects the radius in degrees
    pub fn cone (ra: f64, dec: f64, radius_deg: f64)->Self {
        MashupRequest::new( service::CAOM_CONE)
            .param( "ra", ra)
            .param( "dec", dec)
            .param( "radius", radius_deg)
    }

    pub fn filtered (service: &str, columns: Columns, filters: Vec<Filter>)->Self {
        let mut req = MashupRequest::new( service);
        req.params.columns = Some( columns.as_param());
        req.params.filters = Some( filters);
        req
    }

    /// data products of a single observation
    pub fn products (obsid: impl Into<Value>)->Self {
        MashupRequest::new( service::CAOM_PRODUCTS)
            .param( "obsid", obsid)
            .paged( 100, 1)
    }

    pub fn param (mut self, name: &str, value: impl Into<Value>)->Self {
        self.params.extra.insert( name.to_string(), value.into());
        self
    }

    pub fn position (mut self, ra: f64, dec: f64, radius: f64)->Self {
        self.params.position = Some( format_position( ra, dec, radius));
        self
    }

    /// same service, filters and position but different columns (used for count-then-fetch)
    pub fn with_columns (&self, columns: Columns)->Self {
        let mut req = self.clone();
        req.params.columns = Some( columns.as_param());
        req
    }

    pub fn paged (mut self, pagesize: u32, page: u32)->Self {
        self.pagesize = Some(pagesize);
        self.page = Some(page);
        self
    }

    pub fn remove_null_columns (mut self, b: bool)->Self {
        self.removenullcolumns = Some(b);
        self
    }

    pub fn remove_cache (mut self, b: bool)->Self {
        self.removecache = Some(b);
        self
    }

    pub fn to_json (&self)->Result<String> {
        Ok( serde_json::to_string( self)? )
    }

    /// the application/x-www-form-urlencoded POST body
    pub fn to_form_body (&self)->Result<String> {
        let json = self.to_json()?;
        Ok( format!("request={}", form_urlencode( &json)) )
    }
}

/// position parameter as "ra, dec, radius" with six decimals each
pub fn format_position (ra: f64, dec: f64, radius: f64)->String {
    format!("{:.6}, {:.6}, {:.6}", ra, dec, radius)
}
