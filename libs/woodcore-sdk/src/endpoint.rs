use http::Method;
use serde_json::Value;

use crate::error::Error;
use crate::request::{Params, RequestDescriptor};

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
        }
    }
}

/// One row of an endpoint table.
///
/// `path` may contain `{name}` placeholders, filled from the call's params.
/// A declared `query`/`body` list (even an empty one) means the request
/// carries that object; `None` means it carries none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub verb: Verb,
    pub path: &'static str,
    pub query: Option<&'static [&'static str]>,
    pub body: Option<&'static [&'static str]>,
}

impl Endpoint {
    /// Placeholder names in the path template, in order.
    #[must_use]
    pub fn path_params(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else { break };
            names.push(&after[..end]);
            rest = &after[end + 1..];
        }
        names
    }

    /// Resolve the template against `params` and pick out the declared
    /// query and body fields.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRequest`] if a path parameter is missing or empty.
    pub fn descriptor(&self, params: &Params) -> Result<RequestDescriptor, Error> {
        let mut builder = RequestDescriptor::builder()
            .method(self.verb.method())
            .path(self.resolve_path(params)?);

        if let Some(names) = self.query {
            builder = builder.with_query();
            for name in names {
                if let Some(value) = params.get(name) {
                    builder = builder.query(*name, value.clone());
                }
            }
        }
        if let Some(names) = self.body {
            builder = builder.with_body();
            for name in names {
                if let Some(value) = params.get(name) {
                    builder = builder.body(*name, value.clone());
                }
            }
        }
        builder.build()
    }

    fn resolve_path(&self, params: &Params) -> Result<String, Error> {
        let mut path = String::with_capacity(self.path.len());
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            path.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                Error::InvalidRequest(format!("Unterminated placeholder in '{}'", self.path))
            })?;
            let name = &after[..end];
            let raw = match params.get(name) {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            if raw.is_empty() {
                return Err(Error::InvalidRequest(format!(
                    "{}: missing path parameter '{name}'",
                    self.name
                )));
            }
            path.push_str(&urlencoding::encode(&raw));
            rest = &after[end + 1..];
        }
        path.push_str(rest);
        Ok(path)
    }
}

/// Generates an endpoint group from a declarative table.
///
/// Each entry becomes a row of the group's static table and an async method
/// returning the response body. Entries marked `pages <name>` also get a
/// method returning a [`PageStream`](crate::PageStream).
///
/// ```ignore
/// endpoint_group! {
///     /// Client management.
///     pub struct Clients;
///     table CLIENT_ENDPOINTS;
///
///     /// Retrieve a single client.
///     fn retrieve_client => GET "/clients/{clientId}";
///     /// List clients.
///     fn retrieve_customers, pages retrieve_customer_pages => GET "/clients",
///         query ["perPage", "page"];
/// }
/// ```
macro_rules! endpoint_group {
    (@verb GET) => { $crate::endpoint::Verb::Get };
    (@verb POST) => { $crate::endpoint::Verb::Post };
    (@fields) => { None };
    (@fields [$($field:literal),*]) => { Some(&[$($field),*] as &[&str]) };
    (
        $(#[$group_meta:meta])*
        pub struct $group:ident;
        table $table:ident;
        $(
            $(#[$meta:meta])*
            fn $method:ident $(, pages $pages:ident)? => $verb:ident $path:literal
                $(, query [$($query:literal),* $(,)?])?
                $(, body [$($body:literal),* $(,)?])?
            ;
        )*
    ) => {
        $(
            #[doc(hidden)]
            mod $method {
                pub(super) const ENDPOINT: $crate::endpoint::Endpoint = $crate::endpoint::Endpoint {
                    name: stringify!($method),
                    verb: $crate::endpoint::endpoint_group!(@verb $verb),
                    path: $path,
                    query: $crate::endpoint::endpoint_group!(@fields $([$($query),*])?),
                    body: $crate::endpoint::endpoint_group!(@fields $([$($body),*])?),
                };
            }
        )*

        #[doc = concat!("Endpoint table backing [`", stringify!($group), "`].")]
        pub const $table: &[$crate::endpoint::Endpoint] = &[$($method::ENDPOINT),*];

        $(#[$group_meta])*
        #[derive(Clone)]
        pub struct $group {
            executor: $crate::executor::Executor,
        }

        impl $group {
            pub(crate) fn new(executor: $crate::executor::Executor) -> Self {
                Self { executor }
            }

            /// The declarative table this group is generated from.
            #[must_use]
            pub fn endpoints() -> &'static [$crate::endpoint::Endpoint] {
                $table
            }

            /// The executor this group dispatches through.
            #[must_use]
            pub fn executor(&self) -> &$crate::executor::Executor {
                &self.executor
            }

            $(
                $(#[$meta])*
                ///
                /// # Errors
                /// Fails with [`Error::InvalidRequest`](crate::Error::InvalidRequest)
                /// when a path parameter is missing, otherwise with the error the
                /// request produced.
                pub async fn $method(
                    &self,
                    params: $crate::request::Params,
                ) -> Result<::serde_json::Value, $crate::error::Error> {
                    self.executor.call(&$method::ENDPOINT, &params).await
                }

                $(
                    #[doc = concat!("Stream every page of [`Self::", stringify!($method), "`].")]
                    ///
                    /// # Errors
                    /// Fails with [`Error::InvalidRequest`](crate::Error::InvalidRequest)
                    /// when a path parameter is missing. Request errors are
                    /// yielded by the stream.
                    pub fn $pages(
                        &self,
                        params: $crate::request::Params,
                    ) -> Result<$crate::pages::PageStream, $crate::error::Error> {
                        let descriptor = $method::ENDPOINT.descriptor(&params)?;
                        Ok(self.executor.pages(descriptor))
                    }
                )?
            )*
        }
    };
}

pub(crate) use endpoint_group;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const APPROVE: Endpoint = Endpoint {
        name: "approve_loan_account",
        verb: Verb::Post,
        path: "/loans/{loanAccountId}/approve",
        query: None,
        body: Some(&["approvedOnDate", "expectedDisbursementDate", "comment"]),
    };

    const TRANSACTION: Endpoint = Endpoint {
        name: "retrieve_loan_account_transaction",
        verb: Verb::Get,
        path: "/loans/{loanAccountId}/transactions/{transactionId}",
        query: None,
        body: None,
    };

    #[test]
    fn test_path_params_are_listed() {
        assert_eq!(TRANSACTION.path_params(), vec!["loanAccountId", "transactionId"]);
        assert!(Endpoint { path: "/ledger", ..TRANSACTION }.path_params().is_empty());
    }

    #[test]
    fn test_descriptor_splits_params() {
        let params = Params::new()
            .with("loanAccountId", 42)
            .with("approvedOnDate", "2024-01-31")
            .with("comment", "ok")
            .with("unrelated", true);

        let descriptor = APPROVE.descriptor(&params).unwrap();
        assert_eq!(descriptor.method(), &Method::POST);
        assert_eq!(descriptor.path(), "/loans/42/approve");
        assert_eq!(descriptor.query(), None);

        let body = descriptor.body().unwrap();
        assert_eq!(body.len(), 2);
        assert_eq!(body.get("approvedOnDate"), Some(&json!("2024-01-31")));
        assert_eq!(body.get("comment"), Some(&json!("ok")));
    }

    #[test]
    fn test_declared_query_is_present_even_when_empty() {
        let list = Endpoint {
            name: "retrieve_customers",
            verb: Verb::Get,
            path: "/clients",
            query: Some(&["perPage", "page"]),
            body: None,
        };
        let descriptor = list.descriptor(&Params::new()).unwrap();
        assert_eq!(descriptor.query().map(serde_json::Map::len), Some(0));
    }

    #[test]
    fn test_missing_path_param_is_rejected() {
        let err = TRANSACTION
            .descriptor(&Params::new().with("loanAccountId", 1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(ref m) if m.contains("transactionId")));

        let err = APPROVE
            .descriptor(&Params::new().with("loanAccountId", ""))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_path_params_are_encoded() {
        let params = Params::new()
            .with("loanAccountId", "a b/c")
            .with("transactionId", 9);
        let descriptor = TRANSACTION.descriptor(&params).unwrap();
        assert_eq!(descriptor.path(), "/loans/a%20b%2Fc/transactions/9");
    }
}
