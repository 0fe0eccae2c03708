use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filter::FilterClause;
use crate::item::PlainItem;

/// A tagged invocation request.
///
/// The original payloads were duck-typed; here the `Action` tag selects the
/// variant and serde validates the shape at the boundary before dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Action")]
pub enum Request {
    Get(GetRequest),
    Put(PutRequest),
    Delete(DeleteRequest),
}

/// A read request: point lookup, query or scan depending on the filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetRequest {
    #[serde(rename = "Table")]
    pub table: String,
    #[serde(rename = "Filters", default)]
    pub filters: Vec<FilterClause>,
    #[serde(rename = "Limit", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "NextPage", skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

/// A write request: one `Item` or a batch of `Items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PutRequest {
    #[serde(rename = "Table")]
    pub table: String,
    #[serde(rename = "Item", skip_serializing_if = "Option::is_none")]
    pub item: Option<PlainItem>,
    #[serde(rename = "Items", skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<PlainItem>>,
}

/// A filtered delete request. With `Delete=false` (the default) it only
/// previews the matching items, exactly like a Get.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(rename = "Table")]
    pub table: String,
    #[serde(rename = "Filters", default)]
    pub filters: Vec<FilterClause>,
    #[serde(rename = "Delete", default)]
    pub delete: bool,
    #[serde(rename = "Verbose", default = "default_verbose")]
    pub verbose: bool,
}

fn default_verbose() -> bool {
    true
}

/// One page of read results in the flattened response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReadResponse {
    /// Cursor for the next page; `null` when the read is exhausted.
    #[serde(rename = "NextPage")]
    pub next_page: Option<String>,
    #[serde(rename = "Count")]
    pub count: usize,
    #[serde(rename = "Result")]
    pub result: Vec<HashMap<String, String>>,
}

/// Accumulator for one delete request, mutated across batch completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(rename = "ItemsFound")]
    pub items_found: u64,
    #[serde(rename = "ItemsDeleted")]
    pub items_deleted: u64,
    #[serde(rename = "AllItemsDeleted")]
    pub all_items_deleted: bool,
    #[serde(rename = "Retry")]
    pub retry: bool,
    #[serde(rename = "Warning", default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(rename = "Result")]
    pub result: Vec<HashMap<String, String>>,
}

impl DeleteResponse {
    /// A fresh accumulator; every field is set as the run progresses.
    pub fn new() -> Self {
        Self {
            items_found: 0,
            items_deleted: 0,
            all_items_deleted: false,
            retry: false,
            warning: None,
            result: Vec::new(),
        }
    }
}

impl Default for DeleteResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// What a handler returns to the invoker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Page(ReadResponse),
    Delete(DeleteResponse),
    Message(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterOp;

    #[test]
    fn get_request_deserializes_with_defaults() {
        let request: Request = serde_json::from_str(r#"{"Action":"Get","Table":"people"}"#).unwrap();
        match request {
            Request::Get(get) => {
                assert_eq!(get.table, "people");
                assert!(get.filters.is_empty());
                assert!(get.limit.is_none());
                assert!(get.next_page.is_none());
            }
            _ => panic!("expected a Get"),
        }
    }

    #[test]
    fn get_request_carries_filters_and_paging() {
        let request: Request = serde_json::from_str(
            r#"{
                "Action": "Get",
                "Table": "people",
                "Filters": [{"Attribute": "age", "Operation": ">", "CompareValue": 21}],
                "Limit": 50,
                "NextPage": "abc"
            }"#,
        )
        .unwrap();
        match request {
            Request::Get(get) => {
                assert_eq!(get.filters.len(), 1);
                assert_eq!(get.filters[0].operation, FilterOp::Gt);
                assert_eq!(get.limit, Some(50));
                assert_eq!(get.next_page.as_deref(), Some("abc"));
            }
            _ => panic!("expected a Get"),
        }
    }

    #[test]
    fn delete_request_defaults_to_preview_and_verbose() {
        let request: Request = serde_json::from_str(
            r#"{"Action":"Delete","Table":"people","Filters":[{"Attribute":"id","Operation":"=","CompareValue":"1"}]}"#,
        )
        .unwrap();
        match request {
            Request::Delete(delete) => {
                assert!(!delete.delete);
                assert!(delete.verbose);
            }
            _ => panic!("expected a Delete"),
        }
    }

    #[test]
    fn put_request_accepts_item_or_items() {
        let single: Request = serde_json::from_str(
            r#"{"Action":"Put","Table":"people","Item":{"id":"1","name":"Teddy"}}"#,
        )
        .unwrap();
        match single {
            Request::Put(put) => assert!(put.item.is_some() && put.items.is_none()),
            _ => panic!("expected a Put"),
        }

        let batch: Request = serde_json::from_str(
            r#"{"Action":"Put","Table":"people","Items":[{"id":"1"},{"id":"2"}]}"#,
        )
        .unwrap();
        match batch {
            Request::Put(put) => assert_eq!(put.items.unwrap().len(), 2),
            _ => panic!("expected a Put"),
        }
    }

    #[test]
    fn missing_table_fails_at_the_boundary() {
        let result: Result<Request, _> = serde_json::from_str(r#"{"Action":"Get"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn read_response_serializes_null_cursor_when_exhausted() {
        let response = Response::Page(ReadResponse::default());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["NextPage"], serde_json::Value::Null);
        assert_eq!(json["Count"], 0);
    }

    #[test]
    fn delete_response_omits_warning_until_one_is_set() {
        let mut response = DeleteResponse::new();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("Warning").is_none());

        response.warning = Some("partial".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["Warning"], "partial");
    }
}
