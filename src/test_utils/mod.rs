#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod http;

pub(crate) use db::get_test_connection;
pub(crate) use http::{assert_content_type, parse_json};
