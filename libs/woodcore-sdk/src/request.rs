use http::Method;
use serde_json::{Map, Value};

use crate::error::Error;

/// Page size injected into GET queries that do not set `perPage`.
pub const DEFAULT_PER_PAGE: u64 = 10;
/// Page injected into GET queries that do not set `page`.
pub const FIRST_PAGE: u64 = 1;

pub(crate) const PAGE_PARAM: &str = "page";
pub(crate) const PER_PAGE_PARAM: &str = "perPage";

/// One intended API call: verb, resolved path, optional query and body.
///
/// Descriptors compare by value; two equal descriptors describe the same
/// request and may share one network round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Option<Map<String, Value>>,
    body: Option<Map<String, Value>>,
}

impl RequestDescriptor {
    /// Create a new descriptor builder
    #[must_use]
    pub fn builder() -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::default()
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query(&self) -> Option<&Map<String, Value>> {
        self.query.as_ref()
    }

    #[must_use]
    pub fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }

    #[must_use]
    pub fn is_get(&self) -> bool {
        self.method.as_str().eq_ignore_ascii_case("get")
    }

    /// Fill in `perPage` and `page` on GET requests that carry a query.
    #[must_use]
    pub fn with_default_pagination(mut self) -> Self {
        if !self.is_get() {
            return self;
        }
        if let Some(query) = self.query.as_mut() {
            insert_if_absent(query, PER_PAGE_PARAM, DEFAULT_PER_PAGE);
            insert_if_absent(query, PAGE_PARAM, FIRST_PAGE);
        }
        self
    }

    /// The page requested by the query, if it is a positive integer.
    pub(crate) fn page(&self) -> Option<u64> {
        self.query
            .as_ref()
            .and_then(|query| query.get(PAGE_PARAM))
            .and_then(as_page_number)
    }

    pub(crate) fn set_page(&mut self, page: u64) {
        self.query
            .get_or_insert_with(Map::new)
            .insert(PAGE_PARAM.to_owned(), Value::from(page));
    }

    /// Query string pairs in key order. Nulls are skipped.
    pub(crate) fn query_pairs(&self) -> Vec<(&str, String)> {
        let Some(query) = self.query.as_ref() else {
            return Vec::new();
        };
        query
            .iter()
            .filter_map(|(name, value)| render_query_value(value).map(|v| (name.as_str(), v)))
            .collect()
    }
}

fn insert_if_absent(query: &mut Map<String, Value>, name: &str, value: u64) {
    let present = query.get(name).is_some_and(|v| !v.is_null());
    if !present {
        query.insert(name.to_owned(), Value::from(value));
    }
}

/// Accepts `3` as well as `"3"`.
pub(crate) fn as_page_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|page| *page >= 1)
}

fn render_query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}

/// Builder for constructing request descriptors with a fluent API
#[derive(Debug, Default)]
pub struct RequestDescriptorBuilder {
    method: Option<Method>,
    path: Option<String>,
    query: Option<Map<String, Value>>,
    body: Option<Map<String, Value>>,
}

impl RequestDescriptorBuilder {
    /// Set the HTTP method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the resolved request path
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach an (initially empty) query object.
    #[must_use]
    pub fn with_query(mut self) -> Self {
        self.query.get_or_insert_with(Map::new);
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Attach an (initially empty) JSON body.
    #[must_use]
    pub fn with_body(mut self) -> Self {
        self.body.get_or_insert_with(Map::new);
        self
    }

    /// Add a JSON body field
    #[must_use]
    pub fn body(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Build the descriptor
    ///
    /// # Errors
    /// Returns [`Error::InvalidRequest`] if the path is missing or the method
    /// is neither GET nor POST.
    pub fn build(self) -> Result<RequestDescriptor, Error> {
        let method = self.method.unwrap_or(Method::GET);
        if method != Method::GET && method != Method::POST {
            return Err(Error::InvalidRequest(format!(
                "Unsupported method {method}: only GET and POST are used by the API"
            )));
        }
        let path = self
            .path
            .ok_or_else(|| Error::InvalidRequest("Request path is required".into()))?;

        Ok(RequestDescriptor {
            method,
            path,
            query: self.query,
            body: self.body,
        })
    }
}

/// Named arguments for an endpoint method.
///
/// `null` values count as absent. Names an endpoint does not declare are
/// ignored by that endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up an argument; `null` reads as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|value| !value.is_null())
    }

    /// Build params from a JSON object.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRequest`] if the value is not an object.
    pub fn from_json(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::InvalidRequest(format!(
                "Params must be a JSON object, got {other}"
            ))),
        }
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_with_query_gets_defaults() {
        let descriptor = RequestDescriptor::builder()
            .path("/clients")
            .with_query()
            .build()
            .unwrap()
            .with_default_pagination();

        let query = descriptor.query().unwrap();
        assert_eq!(query.get("perPage"), Some(&json!(10)));
        assert_eq!(query.get("page"), Some(&json!(1)));
    }

    #[test]
    fn test_caller_pagination_is_kept() {
        let descriptor = RequestDescriptor::builder()
            .path("/clients")
            .query("perPage", 50)
            .query("page", 3)
            .build()
            .unwrap()
            .with_default_pagination();

        let query = descriptor.query().unwrap();
        assert_eq!(query.get("perPage"), Some(&json!(50)));
        assert_eq!(query.get("page"), Some(&json!(3)));
        assert_eq!(descriptor.page(), Some(3));
    }

    #[test]
    fn test_post_and_queryless_get_are_untouched() {
        let post = RequestDescriptor::builder()
            .method(Method::POST)
            .path("/loans/1")
            .query("command", "undoapproval")
            .build()
            .unwrap();
        assert_eq!(post.clone().with_default_pagination(), post);

        let get = RequestDescriptor::builder().path("/ledger").build().unwrap();
        assert_eq!(get.clone().with_default_pagination().query(), None);
    }

    #[test]
    fn test_builder_validation() {
        assert!(RequestDescriptor::builder().build().is_err());
        let err = RequestDescriptor::builder()
            .method(Method::DELETE)
            .path("/clients/1")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_query_pairs_rendering() {
        let descriptor = RequestDescriptor::builder()
            .path("/loans")
            .query("status", "active")
            .query("page", 2)
            .query("officeId", Value::Null)
            .query("ids", json!([1, 2]))
            .build()
            .unwrap();

        let mut pairs = descriptor.query_pairs();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("ids", "[1,2]".to_owned()),
                ("page", "2".to_owned()),
                ("status", "active".to_owned()),
            ]
        );
    }

    #[test]
    fn test_page_number_parsing() {
        assert_eq!(as_page_number(&json!(4)), Some(4));
        assert_eq!(as_page_number(&json!("4")), Some(4));
        assert_eq!(as_page_number(&json!(0)), None);
        assert_eq!(as_page_number(&json!(null)), None);
    }

    #[test]
    fn test_params_nulls_are_absent() {
        let params = Params::new().with("clientId", 7).with("note", Value::Null);
        assert_eq!(params.get("clientId"), Some(&json!(7)));
        assert_eq!(params.get("note"), None);
        assert!(Params::from_json(json!([1])).is_err());
    }
}
