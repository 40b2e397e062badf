//! Unit tests exercising the public API without a network

mod ledger_rows;
