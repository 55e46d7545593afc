//! WoodCore client SDK
//!
//! Async client for the WoodCore core-banking API. The SDK is a thin layer
//! over one generic request executor:
//!
//! - Execute request descriptors with bearer authentication and JSON bodies
//! - Coalesce concurrent identical calls into one network request
//! - Inject default `page`/`perPage` on paged GET requests
//! - Stream every page of a list endpoint lazily
//! - Expose each API area as an endpoint group generated from a table
//!
//! The environment is chosen from the API key: keys starting with `wc_test`
//! go to the test host, every other key goes to production.
//!
//! # Examples
//!
//! ## Calling an endpoint
//!
//! ```no_run
//! use woodcore_sdk::{Params, WoodCore};
//!
//! # async fn example() -> Result<(), woodcore_sdk::Error> {
//! let client = WoodCore::new("wc_test_...")?;
//!
//! let loan = client
//!     .loans()
//!     .retrieve_loan_account(Params::new().with("loanAccountId", 42))
//!     .await?;
//! println!("{loan}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Iterating pages
//!
//! ```no_run
//! use futures::StreamExt;
//! use woodcore_sdk::{Params, WoodCore};
//!
//! # async fn example() -> Result<(), woodcore_sdk::Error> {
//! let client = WoodCore::from_env()?;
//!
//! let mut pages = client
//!     .clients()
//!     .retrieve_customer_pages(Params::new().with("perPage", 50))?;
//! while let Some(page) = pages.next().await {
//!     let page = page?;
//!     println!("{}", page["data"]);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Hand-built descriptors
//!
//! ```no_run
//! use woodcore_sdk::{Method, RequestDescriptor, WoodCore};
//!
//! # async fn example() -> Result<(), woodcore_sdk::Error> {
//! let client = WoodCore::new("wc_live_...")?;
//!
//! let descriptor = RequestDescriptor::builder()
//!     .method(Method::POST)
//!     .path("/savingsaccounts/7/block")
//!     .build()?;
//! let outcome = client.executor().execute(descriptor).await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod endpoint;
mod error;
mod executor;
pub mod groups;
mod pages;
mod request;
mod transport;

// Re-export public API
pub use client::WoodCore;
pub use config::{API_KEY_ENV, BASE_URL_ENV, ClientConfig, Environment, TIMEOUT_ENV};
pub use endpoint::{Endpoint, Verb};
pub use error::Error;
pub use executor::Executor;
pub use groups::{Accounting, Clients, IntraTransfer, Loans, Products, Savings};
pub use pages::PageStream;
pub use request::{DEFAULT_PER_PAGE, FIRST_PAGE, Params, RequestDescriptor, RequestDescriptorBuilder};

// Re-export commonly used types from dependencies
pub use http::{Method, StatusCode};
