//! Endpoint groups, one per API area.
//!
//! Each group is generated from a static table of [`Endpoint`] rows. The
//! tables are also reachable by name through [`GROUPS`] and [`lookup`] for
//! callers that pick endpoints at runtime.

mod accounting;
mod clients;
mod intra_transfer;
mod loans;
mod products;
mod savings;

pub use accounting::{ACCOUNTING_ENDPOINTS, Accounting};
pub use clients::{CLIENT_ENDPOINTS, Clients};
pub use intra_transfer::{INTRA_TRANSFER_ENDPOINTS, IntraTransfer};
pub use loans::{LOAN_ENDPOINTS, Loans};
pub use products::{PRODUCT_ENDPOINTS, Products};
pub use savings::{SAVINGS_ENDPOINTS, Savings};

use crate::endpoint::Endpoint;

/// Every group table, keyed by the group's name.
pub static GROUPS: &[(&str, &[Endpoint])] = &[
    ("accounting", ACCOUNTING_ENDPOINTS),
    ("clients", CLIENT_ENDPOINTS),
    ("intra_transfer", INTRA_TRANSFER_ENDPOINTS),
    ("loans", LOAN_ENDPOINTS),
    ("products", PRODUCT_ENDPOINTS),
    ("savings", SAVINGS_ENDPOINTS),
];

/// The table of a group, by name.
#[must_use]
pub fn group(name: &str) -> Option<&'static [Endpoint]> {
    GROUPS
        .iter()
        .find(|(group, _)| *group == name)
        .map(|(_, endpoints)| *endpoints)
}

/// An endpoint, by group and endpoint name.
#[must_use]
pub fn lookup(group_name: &str, endpoint_name: &str) -> Option<&'static Endpoint> {
    group(group_name)?
        .iter()
        .find(|endpoint| endpoint.name == endpoint_name)
}
