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
#![allow(unused)]

//! a scripted in-memory `MastTransport` that records all requests

use std::{collections::{HashMap,VecDeque}, io::Write, sync::Mutex};
use async_trait::async_trait;
use serde_json::{json, Value};

use mast_common::net::{HttpReply, MastNetError};
use mast_api::{MastApiError, MastClient, MastConfig, MastTransport, Result};

#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<HttpReply>>,
    files: HashMap<String,Vec<u8>>,

    /// (url, decoded request document) of each POST
    pub posts: Mutex<Vec<(String,Value)>>,
    /// urls of each GET
    pub gets: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new ()->Self { MockTransport::default() }

    /// queue a reply for the next POST
    pub fn reply (self, reply: HttpReply)->Self {
        self.replies.lock().unwrap().push_back( reply);
        self
    }

    pub fn json (self, v: Value)->Self {
        self.reply( HttpReply { status: 200, headers: vec![("Content-Type".into(), "text/plain".into())], body: v.to_string() })
    }

    pub fn count (self, n: u64)->Self {
        self.json( json!({"status":"COMPLETE", "msg":"", "fields":[{"name":"Column1","type":"int"}], "data":[{"Column1": n}]}))
    }

    pub fn records (self, data: Value)->Self {
        self.json( json!({"status":"COMPLETE", "msg":"", "fields":[], "data": data}))
    }

    /// content served for GET requests of `url`
    pub fn file (mut self, url: &str, content: &[u8])->Self {
        self.files.insert( url.to_string(), content.to_vec());
        self
    }

    pub fn n_posts (&self)->usize { self.posts.lock().unwrap().len() }

    pub fn n_gets (&self)->usize { self.gets.lock().unwrap().len() }

    pub fn post (&self, i: usize)->Value { self.posts.lock().unwrap()[i].1.clone() }

    pub fn get_url (&self, i: usize)->String { self.gets.lock().unwrap()[i].clone() }
}

#[async_trait]
impl MastTransport for MockTransport {
    async fn post_form (&self, url: &str, body: String) -> Result<HttpReply> {
        let (key,value) = url::form_urlencoded::parse( body.as_bytes()).next().expect("no form field");
        assert_eq!( key, "request");
        let doc: Value = serde_json::from_str( &value).expect("request is not JSON");
        self.posts.lock().unwrap().push( (url.to_string(), doc));

        let reply = self.replies.lock().unwrap().pop_front();
        reply.ok_or_else(|| MastApiError::OpFailed("no scripted reply left".into()))
    }

    async fn get_into (&self, url: &str, out: &mut (dyn Write + Send)) -> Result<u64> {
        self.gets.lock().unwrap().push( url.to_string());

        match self.files.get(url) {
            Some(content) => {
                out.write_all( content)?;
                Ok( content.len() as u64)
            }
            None => Err( MastNetError::NotFoundError( url.to_string()).into())
        }
    }
}

pub fn mock_client (transport: MockTransport)->MastClient<MockTransport> {
    MastClient::with_transport( MastConfig::default(), transport)
}
