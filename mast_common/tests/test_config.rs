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

use serde::Deserialize;
use mast_common::config::{config_from_str, load_config, MastConfigError};

#[derive(Deserialize,Debug,PartialEq)]
struct TestConfig {
    server: String,
    page_size: u32,
}

#[test]
fn test_load_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("test.ron");
    std::fs::write( &path, r#"TestConfig( server: "mast.stsci.edu", page_size: 100 )"#).unwrap();

    let conf: TestConfig = load_config( &path).unwrap();
    assert_eq!( conf, TestConfig { server: "mast.stsci.edu".into(), page_size: 100 });
}

#[test]
fn test_config_errors() {
    let res: Result<TestConfig,_> = config_from_str("TestConfig( server: 42 )");
    assert!( matches!( res, Err(MastConfigError::RonError(_))));

    let res: Result<TestConfig,_> = load_config("/no/such/dir/test.ron");
    assert!( matches!( res, Err(MastConfigError::IOError(_))));
}
