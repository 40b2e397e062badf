//! Page validation and CSV row layout

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::horizon::{ledger_page, ledger_record};
use stellar_telemetry::ledger_fetcher::ActivitySink;
use stellar_telemetry::models::{ActivityRow, EndCause, PageOutcome, PageResponse};

fn outcome(body: serde_json::Value) -> PageOutcome {
    serde_json::from_value::<PageResponse>(body).unwrap().into_outcome()
}

fn written(rows: &[ActivityRow]) -> String {
    let mut sink = ActivitySink::from_writer(Vec::new());
    sink.write_page(rows).unwrap();
    String::from_utf8(sink.into_inner().unwrap()).unwrap()
}

#[test]
fn test_null_failed_count_writes_empty_field() {
    let mut record = ledger_record("2016-03-01T10:00:00Z", 4, 3, 0);
    record["failed_transaction_count"] = serde_json::Value::Null;

    let rows = match outcome(ledger_page(vec![record, ledger_record("2016-03-01T09:59:55Z", 2, 1, 1)], None)) {
        PageOutcome::Records { rows, .. } => rows,
        other => panic!("expected records, got {:?}", other),
    };

    assert_eq!(rows[0].ftxs, None);
    assert_eq!(written(&rows), "2016-03-01T10:00:00Z,4,3,\n2016-03-01T09:59:55Z,2,1,1\n");
}

#[test]
fn test_missing_failed_count_is_a_decode_error() {
    let mut record = ledger_record("2016-03-01T10:00:00Z", 4, 3, 0);
    record.as_object_mut().unwrap().remove("failed_transaction_count");

    let err = serde_json::from_value::<PageResponse>(ledger_page(vec![record], None)).unwrap_err();
    assert!(err.to_string().contains("failed_transaction_count"));
}

#[test]
fn test_next_link_is_carried_through() {
    let body = ledger_page(vec![ledger_record("2021-05-20T10:00:00Z", 1, 1, 0)], Some("http://h/next"));
    assert_matches!(outcome(body), PageOutcome::Records { next: Some(ref n), .. } if n == "http://h/next");
}

#[test]
fn test_end_of_stream_causes() {
    assert_eq!(outcome(json!({ "_links": {} })), PageOutcome::EndOfStream(EndCause::MissingEmbedded));
    assert_eq!(outcome(ledger_page(Vec::new(), None)), PageOutcome::EndOfStream(EndCause::EmptyPage));
    assert_eq!(
        outcome(json!({ "status": "429", "_embedded": { "records": [] } })),
        PageOutcome::EndOfStream(EndCause::StatusField("429".to_string()))
    );
}
