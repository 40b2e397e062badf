//! Horizon page fixtures

use serde_json::{json, Value};

/// A ledger record as Horizon serves it, with the fields we do not read
pub fn ledger_record(closed_at: &str, ops: u64, txs: u64, ftxs: u64) -> Value {
    json!({
        "id": format!("ledger-{}", closed_at),
        "paging_token": "1",
        "hash": "abc",
        "sequence": 35000000,
        "closed_at": closed_at,
        "operation_count": ops,
        "successful_transaction_count": txs,
        "failed_transaction_count": ftxs,
        "tx_set_operation_count": ops,
        "protocol_version": 16
    })
}

/// A page of records, newest first, optionally linking to `next`
pub fn ledger_page(records: Vec<Value>, next: Option<&str>) -> Value {
    let mut links = json!({ "self": { "href": "http://localhost/self" } });
    if let Some(next) = next {
        links["next"] = json!({ "href": next });
    }
    json!({
        "_links": links,
        "_embedded": { "records": records }
    })
}

/// Records closing one second apart, counting down from `hour:59:59`
pub fn descending_records(date_hour: &str, count: u32) -> Vec<Value> {
    (0..count)
        .map(|i| ledger_record(&format!("{}:59:{:02}Z", date_hour, 59 - i), 10 + u64::from(i), 5, 1))
        .collect()
}

/// Horizon's problem document
pub fn problem(status: u16, title: &str) -> Value {
    json!({
        "type": "https://stellar.org/horizon-errors/not_found",
        "title": title,
        "status": status,
        "detail": "The resource at the url requested was not found."
    })
}
