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

//! decoding of MAST replies into status, field list and records.
//!
//! No schema is enforced beyond JSON syntax. MAST sometimes sends numbers as strings, hence the
//! lenient `value_as_..` accessors

use std::{collections::BTreeSet, fmt, io::Write};
use serde::{Deserialize,Serialize};
use serde_json::{Map, Value};

use crate::errors::{MastApiError, Result, parse_error};

/// a single row of a query result (field name -> value)
pub type Record = Map<String,Value>;

/// name of the column MAST uses for COUNT_BIG(*) results
pub const COUNT_RESULT_COLUMN: &str = "Column1";

#[derive(Debug,Clone,PartialEq,Eq)]
pub enum QueryStatus {
    Complete,
    Executing,
    Error,
    Other(String),
}

impl From<&str> for QueryStatus {
    fn from (s: &str)->Self {
        match s {
            "COMPLETE" => QueryStatus::Complete,
            "EXECUTING" => QueryStatus::Executing,
            "ERROR" => QueryStatus::Error,
            other => QueryStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for QueryStatus {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        match self {
            QueryStatus::Complete => write!(f, "COMPLETE"),
            QueryStatus::Executing => write!(f, "EXECUTING"),
            QueryStatus::Error => write!(f, "ERROR"),
            QueryStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct Field {
    pub name: String,
    #[serde(rename="type", default)]
    pub field_type: String,
}

/// the decoded reply of a mashup query
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq,Default)]
pub struct MastResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if="Option::is_none")]
    pub msg: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub data: Vec<Record>,
}

impl MastResponse {
    pub fn from_json (text: &str)->Result<Self> {
        Ok( serde_json::from_str(text)? )
    }

    /// a valid result without records, used for soft failures
    pub fn empty ()->Self {
        MastResponse::default()
    }

    pub fn query_status (&self)->QueryStatus {
        QueryStatus::from( self.status.as_str())
    }

    pub fn len (&self)->usize { self.data.len() }

    pub fn is_empty (&self)->bool { self.data.is_empty() }

    pub fn records (&self)->&[Record] { &self.data }

    /// the value of a COUNT_BIG(*) query
    pub fn count (&self)->Result<u64> {
        let rec = self.data.first().ok_or_else(|| parse_error!("count result has no data"))?;
        rec.get( COUNT_RESULT_COLUMN)
            .and_then( value_as_u64)
            .ok_or_else(|| parse_error!("count result has no numeric {} field", COUNT_RESULT_COLUMN))
    }

    /// the only record, or a cardinality error if there are none or several
    pub fn single (&self)->Result<&Record> {
        if self.data.len() == 1 {
            Ok( &self.data[0])
        } else {
            Err( MastApiError::Cardinality { expected: 1, found: self.data.len() })
        }
    }

    /// ordered field names, taken from the records if the reply had no field list
    pub fn field_names (&self)->Vec<String> {
        if !self.fields.is_empty() {
            self.fields.iter().map( |f| f.name.clone()).collect()
        } else if let Some(rec) = self.data.first() {
            rec.keys().cloned().collect()
        } else {
            Vec::new()
        }
    }

    pub fn column_values<'a> (&'a self, name: &str)->Vec<&'a Value> {
        self.data.iter().filter_map( |rec| rec.get(name)).collect()
    }

    /// sorted distinct string representations of a column
    pub fn unique_values (&self, name: &str)->Vec<String> {
        let set: BTreeSet<String> = self.column_values(name).into_iter().map( value_to_string).collect();
        set.into_iter().collect()
    }

    /// new response with the same status and fields but only the records that satisfy `pred`
    pub fn filter<F> (&self, pred: F)->MastResponse where F: Fn(&Record)->bool {
        MastResponse {
            status: self.status.clone(),
            msg: self.msg.clone(),
            fields: self.fields.clone(),
            data: self.data.iter().filter( |rec| pred(rec)).cloned().collect()
        }
    }

    /// move the records of `other` into self. Fields not known yet are added in their order,
    /// the status is taken from `other` if self does not have one
    pub fn append (&mut self, other: MastResponse) {
        if self.status.is_empty() {
            self.status = other.status;
        }
        for field in other.fields {
            if !self.fields.iter().any( |f| f.name == field.name) {
                self.fields.push( field);
            }
        }
        self.data.extend( other.data);
    }

    pub fn write_csv<W: Write> (&self, out: W)->Result<()> {
        let names = self.field_names();
        let mut wtr = csv::Writer::from_writer(out);

        wtr.write_record( &names)?;
        for rec in &self.data {
            wtr.write_record( names.iter().map( |n| rec.get(n).map( value_to_string).unwrap_or_default()))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// typed access to record fields
pub trait RecordExt {
    fn get_str (&self, name: &str)->Option<&str>;
    fn get_f64 (&self, name: &str)->Option<f64>;
    fn get_u64 (&self, name: &str)->Option<u64>;
    fn get_string (&self, name: &str)->Option<String>;
}

impl RecordExt for Record {
    fn get_str (&self, name: &str)->Option<&str> {
        self.get(name).and_then( |v| v.as_str())
    }

    fn get_f64 (&self, name: &str)->Option<f64> {
        self.get(name).and_then( value_as_f64)
    }

    fn get_u64 (&self, name: &str)->Option<u64> {
        self.get(name).and_then( value_as_u64)
    }

    fn get_string (&self, name: &str)->Option<String> {
        self.get(name).filter( |v| !v.is_null()).map( value_to_string)
    }
}

pub fn value_as_f64 (v: &Value)->Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None
    }
}

pub fn value_as_u64 (v: &Value)->Option<u64> {
    match v {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter( |x| *x >= 0.0 && x.fract() == 0.0).map( |x| x as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None
    }
}

/// plain text of a value (strings without quotes, null as empty string)
pub fn value_to_string (v: &Value)->String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string()
    }
}

/* #region name resolution ****************************************************************************************/

#[derive(Debug,Clone,PartialEq)]
pub struct ResolvedCoordinate {
    pub canonical_name: Option<String>,
    pub ra: f64,
    pub dec: f64,
    pub resolver: Option<String>,
}

/// outcome of a Mast.Name.Lookup query
#[derive(Debug,Clone,PartialEq)]
pub enum Resolution {
    Resolved(ResolvedCoordinate),
    NotFound,
}

impl Resolution {
    /// interpret a name lookup reply `{resolvedCoordinate:[{ra,decl,..}], status}`.
    /// Anything without a usable first coordinate is `NotFound`
    pub fn from_json (text: &str)->Result<Self> {
        let v: Value = serde_json::from_str(text)?;

        let first = v.get("resolvedCoordinate")
            .and_then( |rc| rc.as_array())
            .and_then( |a| a.first())
            .and_then( |c| c.as_object());

        if let Some(rec) = first {
            if let (Some(ra), Some(dec)) = (rec.get_f64("ra"), rec.get_f64("decl")) {
                return Ok( Resolution::Resolved( ResolvedCoordinate {
                    canonical_name: rec.get_string("canonicalName"),
                    ra,
                    dec,
                    resolver: rec.get_string("resolver"),
                }))
            }
        }
        Ok( Resolution::NotFound)
    }

    pub fn coordinate (&self)->Option<&ResolvedCoordinate> {
        match self {
            Resolution::Resolved(c) => Some(c),
            Resolution::NotFound => None
        }
    }
}

/* #endregion name resolution */
