//! Pagination stream helpers
//!
//! Each helper drives repeated GET dispatches against one [`PathNode`] and
//! flattens the pages into a stream of items. Conventions assumed of the
//! API, matching what most REST backends do:
//!
//! - an array body is the item list itself;
//! - an object body carries its items under the first present key out of
//!   `items`, `results`, `data`, `records`;
//! - anything else counts as an empty page and ends the stream.
//!
//! Base query parameters, headers, and credentials carried by the supplied
//! [`RequestOptions`] are repeated on every page request; only the
//! pagination parameter changes between pages.

use futures::stream::{self, Stream};
use serde_json::Value;
use sling::{Error, PathNode, RequestOptions};

/// Collection keys probed, in order, in object-shaped page bodies
const ITEM_KEYS: [&str; 4] = ["items", "results", "data", "records"];

fn page_items(body: &Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items.clone(),
        Value::Object(map) => ITEM_KEYS
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Stream every item of a page-number paginated resource
///
/// Requests `page=1`, `page=2`, … and ends at the first page with no items.
pub fn pages(
    node: PathNode,
    options: RequestOptions,
) -> impl Stream<Item = Result<Value, Error>> {
    let state: (std::vec::IntoIter<Value>, Option<u64>) = (Vec::new().into_iter(), Some(1));
    stream::try_unfold(state, move |(mut buffer, mut next_page)| {
        let node = node.clone();
        let options = options.clone();
        async move {
            loop {
                if let Some(item) = buffer.next() {
                    return Ok(Some((item, (buffer, next_page))));
                }
                let Some(page) = next_page.take() else {
                    return Ok(None);
                };
                let response = node.get(options.clone().param("page", page)).await?;
                let body: Value = response.json()?;
                let items = page_items(&body);
                if items.is_empty() {
                    return Ok(None);
                }
                next_page = Some(page + 1);
                buffer = items.into_iter();
            }
        }
    })
}

/// Stream every item of an offset/limit paginated resource
///
/// Requests `offset=0`, `offset=limit`, … with the given `limit`; a page
/// shorter than `limit` (or empty) is the last one.
pub fn offset_limit(
    node: PathNode,
    options: RequestOptions,
    limit: u64,
) -> impl Stream<Item = Result<Value, Error>> {
    let state: (std::vec::IntoIter<Value>, Option<u64>) = (Vec::new().into_iter(), Some(0));
    stream::try_unfold(state, move |(mut buffer, mut next_offset)| {
        let node = node.clone();
        let options = options.clone();
        async move {
            loop {
                if let Some(item) = buffer.next() {
                    return Ok(Some((item, (buffer, next_offset))));
                }
                let Some(offset) = next_offset.take() else {
                    return Ok(None);
                };
                let response = node
                    .get(
                        options
                            .clone()
                            .param("offset", offset)
                            .param("limit", limit),
                    )
                    .await?;
                let body: Value = response.json()?;
                let items = page_items(&body);
                if items.is_empty() {
                    return Ok(None);
                }
                if items.len() as u64 >= limit {
                    next_offset = Some(offset + limit);
                }
                buffer = items.into_iter();
            }
        }
    })
}

/// Stream every item of a cursor-paginated resource
///
/// The first request carries no cursor; each follow-up passes the token
/// found under `cursor_field` of the previous body as the `cursor_param`
/// query parameter. The stream ends exactly when `cursor_field` is absent,
/// null, or an empty string in the response body. The items of that final
/// page are still yielded, and the termination is logged at debug level.
/// String and numeric tokens are supported.
pub fn cursor(
    node: PathNode,
    options: RequestOptions,
    cursor_param: impl Into<String>,
    cursor_field: impl Into<String>,
) -> impl Stream<Item = Result<Value, Error>> {
    let cursor_param = cursor_param.into();
    let cursor_field = cursor_field.into();
    // Pending fetch: Some(None) is the first page, Some(Some(token)) a
    // follow-up, None means the stream is drained.
    let state: (std::vec::IntoIter<Value>, Option<Option<String>>) =
        (Vec::new().into_iter(), Some(None));
    stream::try_unfold(state, move |(mut buffer, mut pending)| {
        let node = node.clone();
        let options = options.clone();
        let cursor_param = cursor_param.clone();
        let cursor_field = cursor_field.clone();
        async move {
            loop {
                if let Some(item) = buffer.next() {
                    return Ok(Some((item, (buffer, pending))));
                }
                let Some(cursor) = pending.take() else {
                    return Ok(None);
                };
                let mut page_options = options.clone();
                if let Some(token) = cursor {
                    page_options = page_options.param(cursor_param.clone(), token);
                }
                let response = node.get(page_options).await?;
                let body: Value = response.json()?;
                let items = page_items(&body);
                let next_token = match body.get(&cursor_field) {
                    Some(Value::String(token)) if !token.is_empty() => Some(token.clone()),
                    Some(Value::Number(token)) => Some(token.to_string()),
                    _ => None,
                };
                pending = match next_token {
                    Some(token) if !items.is_empty() => Some(Some(token)),
                    _ => {
                        tracing::debug!(field = %cursor_field, "no further cursor; pagination complete");
                        None
                    }
                };
                if items.is_empty() {
                    return Ok(None);
                }
                buffer = items.into_iter();
            }
        }
    })
}
