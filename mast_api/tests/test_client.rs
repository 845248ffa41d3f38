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

mod common;

use serde_json::json;
use mast_common::net::HttpReply;
use mast_api::{Columns, Filter, MashupRequest, MastApiError, RecordExt, Resolution, service};
use common::{MockTransport, mock_client};

// run with "cargo test -p mast_api --test test_client -- --nocapture"

fn kic10_lookup ()->serde_json::Value {
    json!({"resolvedCoordinate":[{"canonicalName":"KIC 011904151","ra":285.67942,"decl":50.24130,"resolver":"NED"}],"status":""})
}

#[tokio::test]
async fn test_one_post_per_query() {
    let client = mock_client( MockTransport::new().records( json!([{"obsid":"1"}])));
    let request = MashupRequest::cone( 285.67942, 50.2413, 5.0/3600.0);

    let response = client.query( &request).await.unwrap();
    assert_eq!( response.len(), 1);

    let t = client.transport();
    assert_eq!( t.n_posts(), 1);
    assert_eq!( t.posts.lock().unwrap()[0].0, "https://mast.stsci.edu/api/v0/invoke");
    assert_eq!( t.post(0)["service"], "Mast.Caom.Cone");
}

#[tokio::test]
async fn test_each_execute_posts_once() {
    let client = mock_client( MockTransport::new().count( 1).count( 2).count( 3));
    let request = MashupRequest::filtered( service::CAOM_FILTERED, Columns::Count, vec![]);

    for i in 1..=3 {
        client.execute( &request).await.unwrap();
        assert_eq!( client.transport().n_posts(), i);
    }
    assert_eq!( client.transport().n_gets(), 0);
}

#[tokio::test]
async fn test_execute_returns_headers() {
    let client = mock_client( MockTransport::new().records( json!([])));
    let reply = client.execute( &MashupRequest::name_lookup("M31")).await.unwrap();
    assert_eq!( reply.header("content-type"), Some("text/plain"));
}

#[tokio::test]
async fn test_http_error_status() {
    let client = mock_client( MockTransport::new().reply( HttpReply { status: 503, headers: vec![], body: "unavailable".into() }));

    match client.query( &MashupRequest::cone( 0.0, 0.0, 0.01)).await {
        Err(MastApiError::HttpStatus(status,body)) => {
            assert_eq!( status, 503);
            assert_eq!( body, "unavailable");
        }
        other => panic!("expected HttpStatus error, got {other:?}")
    }
}

#[tokio::test]
async fn test_service_error_status() {
    let client = mock_client( MockTransport::new().json( json!({"status":"ERROR","msg":"unknown service","data":[]})));

    match client.query( &MashupRequest::new("Mast.No.Such")).await {
        Err(MastApiError::ServiceError(msg)) => assert_eq!( msg, "unknown service"),
        other => panic!("expected ServiceError, got {other:?}")
    }
}

#[tokio::test]
async fn test_malformed_reply() {
    let client = mock_client( MockTransport::new().reply( HttpReply { status: 200, headers: vec![], body: "<html>".into() }));
    assert!( matches!( client.query( &MashupRequest::cone( 0.0, 0.0, 0.01)).await, Err(MastApiError::JsonError(_))));
}

#[tokio::test]
async fn test_resolve_name() {
    let client = mock_client( MockTransport::new().json( kic10_lookup()));
    let res = client.resolve_name("KIC 011904151").await.unwrap();
    assert_eq!( res.coordinate().map( |c| c.dec), Some(50.2413));

    let doc = client.transport().post(0);
    assert_eq!( doc["service"], "Mast.Name.Lookup");
    assert_eq!( doc["params"]["input"], "KIC 011904151");
}

#[tokio::test]
async fn test_cone_search_by_name() {
    let client = mock_client( MockTransport::new()
        .json( kic10_lookup())
        .records( json!([{"obsid":"1","project":"Kepler"},{"obsid":"2","project":"K2"}])));

    let response = client.target_name_cone_search( "KIC 011904151", 36.0, 2000, 1).await.unwrap();
    assert_eq!( response.len(), 2);

    let t = client.transport();
    assert_eq!( t.n_posts(), 2);
    let cone = t.post(1);
    assert_eq!( cone["service"], "Mast.Caom.Cone");
    assert_eq!( cone["params"]["ra"], 285.67942);
    assert_eq!( cone["params"]["radius"], 0.01);
    assert_eq!( cone["pagesize"], 2000);
    assert_eq!( cone["removecache"], true);
}

#[tokio::test]
async fn test_unresolved_name_is_empty() {
    let client = mock_client( MockTransport::new().json( json!({"resolvedCoordinate":[],"status":""})));

    let response = client.target_name_cone_search( "EPIC 000000000", 8.0, 2000, 1).await.unwrap();
    assert!( response.is_empty());
    assert_eq!( client.transport().n_posts(), 1); // no cone search issued
}

#[tokio::test]
async fn test_observations_for_targets_skips_unresolved() {
    let client = mock_client( MockTransport::new()
        .json( kic10_lookup())
        .records( json!([{"obsid":"1","project":"K2"},{"obsid":"2","project":"TESS"}]))
        .json( json!({"resolvedCoordinate":[],"status":""}))
        .json( kic10_lookup())
        .records( json!([{"obsid":"3","project":"K2"}])));

    let names = ["EPIC 228813918", "EPIC 000000000", "EPIC 211311380"];
    let response = client.observations_for_targets( &names[..], 8.0).await.unwrap();

    assert_eq!( response.len(), 3);
    assert_eq!( response.unique_values("obsid"), vec!["1","2","3"]);
    assert_eq!( response.status, "COMPLETE");

    let t = client.transport();
    assert_eq!( t.n_posts(), 5); // no cone search for the unresolved name
    assert_eq!( t.post(2)["params"]["input"], "EPIC 000000000");
    assert_eq!( t.post(3)["service"], "Mast.Name.Lookup");
}

#[tokio::test]
async fn test_count_above_ceiling() {
    let client = mock_client( MockTransport::new().count( 1500));
    let request = MashupRequest::filtered( service::CAOM_FILTERED, Columns::Count, vec![ Filter::values("project", ["K2"]) ]);

    let counted = client.count_then_fetch( &request, 1000).await.unwrap();
    assert_eq!( counted.count, 1500);
    assert!( counted.records.is_none());
    assert_eq!( client.transport().n_posts(), 1);
    assert_eq!( client.transport().post(0)["params"]["columns"], "COUNT_BIG(*)");
}

#[tokio::test]
async fn test_count_at_ceiling_is_not_fetched() {
    let client = mock_client( MockTransport::new().count( 3));
    let request = MashupRequest::filtered( service::CAOM_FILTERED, Columns::All, vec![]);

    let counted = client.count_then_fetch( &request, 3).await.unwrap();
    assert!( counted.records.is_none());
    assert_eq!( client.transport().n_posts(), 1);
}

#[tokio::test]
async fn test_count_below_ceiling() {
    let client = mock_client( MockTransport::new()
        .count( 2)
        .records( json!([{"obsid":"1"},{"obsid":"2"}])));

    let counted = client.cone_search_with_project_counts( 150.1, 2.2, 0.05, &["K2","Kepler"], 1000).await.unwrap();
    assert_eq!( counted.count, 2);
    assert_eq!( counted.records.map( |r| r.len()), Some(2));

    let t = client.transport();
    assert_eq!( t.n_posts(), 2);
    let (count_doc, fetch_doc) = (t.post(0), t.post(1));
    assert_eq!( count_doc["service"], "Mast.Caom.Filtered.Position");
    assert_eq!( count_doc["params"]["columns"], "COUNT_BIG(*)");
    assert_eq!( fetch_doc["params"]["columns"], "*");
    assert_eq!( fetch_doc["params"]["filters"], count_doc["params"]["filters"]);
    assert_eq!( fetch_doc["params"]["position"], "150.100000, 2.200000, 0.050000");
    assert_eq!( fetch_doc["params"]["filters"][0]["values"], json!(["K2","Kepler"]));
}

#[tokio::test]
async fn test_kepler_filter_cardinality() {
    let client = mock_client( MockTransport::new().count( 2));

    match client.filter_kepler_timeseries( "011904151", "lc".parse().unwrap()).await {
        Err(MastApiError::Cardinality{expected,found}) => assert_eq!( (expected,found), (1,2)),
        other => panic!("expected cardinality error, got {other:?}")
    }
    assert_eq!( client.transport().n_posts(), 1);

    let doc = client.transport().post(0);
    let filters = &doc["params"]["filters"];
    assert_eq!( filters[0], json!({"paramName":"filters","values":["KEPLER"],"separator":";"}));
    assert_eq!( filters[1]["freeText"], "%lc%");
    assert_eq!( filters[2]["freeText"], "%011904151%");
}

#[tokio::test]
async fn test_observations_near_start_time() {
    let client = mock_client( MockTransport::new()
        .records( json!([{"obs_id":"ktwo228813918-c10_lc"},{"obs_id":"ktwo228813919-c10_lc"}])));

    let response = client.observations_starting_near( "2016-07-13 02:04:00", "K2", 0.5).await.unwrap();
    assert_eq!( mast_api::search::epic_ids( &response), vec!["228813918", "228813919"]);

    let doc = client.transport().post(0);
    let filters = &doc["params"]["filters"];
    assert_eq!( filters[0]["values"], json!(["K2"]));
    let min = filters[1]["values"][0]["min"].as_f64().unwrap();
    let max = filters[1]["values"][0]["max"].as_f64().unwrap();
    assert!( (min - 57581.586111).abs() < 1e-5);
    assert!( (max - min - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_unique_observation_types() {
    let client = mock_client( MockTransport::new()
        .json( kic10_lookup())
        .records( json!([
            {"obs_collection":"Kepler","project":"Kepler"},
            {"obs_collection":"K2","project":"K2"},
            {"obs_collection":"Kepler","project":"Kepler"}
        ])));

    let types = client.unique_observation_types( "KIC 011904151", 8.0, ("obs_collection","project")).await.unwrap();
    assert_eq!( types, vec!["K2-K2", "Kepler-Kepler"]);
}

#[tokio::test]
async fn test_tic_lookup() {
    let client = mock_client( MockTransport::new().records( json!([{"ID":"1234567","Tmag":9.5}])));

    let response = client.tic_by_ids( &["1234567"], Columns::All).await.unwrap();
    assert_eq!( response.len(), 1);

    let doc = client.transport().post(0);
    assert_eq!( doc["service"], "Mast.Catalogs.Filtered.Tic");
    assert_eq!( doc["params"]["columns"], "*");
    assert_eq!( doc["params"]["filters"], json!([{"paramName":"ID","values":["1234567"]}]));
}

#[tokio::test]
async fn test_tic_column_list() {
    let client = mock_client( MockTransport::new().records( json!([{"ID":"1234567","Tmag":9.8}])));
    let columns = Columns::List( vec!["ID".into(), "Tmag".into()]);

    let response = client.tic_by_ids( &["1234567"], columns).await.unwrap();
    assert_eq!( response.records()[0].get_f64("Tmag"), Some(9.8));
    assert_eq!( client.transport().post(0)["params"]["columns"], "ID,Tmag");
}
