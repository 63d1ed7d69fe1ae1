//! Tests for the Horaro schedule adapter

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::*;
use crate::core::normalize;
use crate::error::PipelineError;
use crate::services::RealHoraroSource;
use crate::traits::EventSource;
use crate::types::RawPayload;
use shared::SourceKind;

#[tokio::test]
async fn test_fetch_schedule_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esa/2024-summer.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(horaro_schedule()))
        .expect(1)
        .mount(&server)
        .await;

    let source = RealHoraroSource::new(test_client(), server.uri());
    let payload = source.fetch("esa/2024-summer").await.unwrap();

    assert_eq!(source.kind(), SourceKind::Horaro);
    assert_eq!(
        payload,
        RawPayload::Horaro {
            schedule: horaro_schedule()
        }
    );

    let event = normalize(payload, SourceKind::Horaro).unwrap();
    let ids: Vec<_> = event.runners.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, ["alice", "bob", "carol"]);
}

#[tokio::test]
async fn test_unknown_schedule_is_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = RealHoraroSource::new(test_client(), server.uri());

    assert_eq!(source.fetch("esa/gone").await.unwrap(), RawPayload::Missing);
}

#[tokio::test]
async fn test_server_error_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let source = RealHoraroSource::new(test_client(), server.uri());
    let err = source.fetch("esa/summer").await.unwrap_err();

    assert!(matches!(err, PipelineError::Upstream { .. }));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html>"))
        .mount(&server)
        .await;

    let source = RealHoraroSource::new(test_client(), server.uri());
    let err = source.fetch("esa/summer").await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::MalformedSource {
            source_kind: SourceKind::Horaro,
            ..
        }
    ));
}

#[tokio::test]
async fn test_single_segment_locator_is_invalid() {
    let source = RealHoraroSource::new(test_client(), closed_server_uri());

    let err = source.fetch("esa").await.unwrap_err();

    assert!(matches!(err, PipelineError::InvalidLocator { .. }));
}
