//! Filter composition and query building, free of I/O.

pub mod filter;
pub mod lists;
pub mod query;

pub use filter::{
    FilterChange, FilterComposer, FilterError, FilterField, FilterState, FilterValue,
    SearchMatch, apply_local_filters, server_fields, to_query,
};
pub use lists::{distinct_categories, distinct_parties};
pub use query::QueryDescriptor;
