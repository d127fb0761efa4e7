#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod http;
pub(crate) mod json;

pub(crate) use db::{get_test_connection, insert_test_expense};
pub(crate) use http::{VALID_TOKEN, assert_content_type};
pub(crate) use json::assert_json_error;
