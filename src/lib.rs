//! Library entry for VoteWise: locale bundles, filter composition, collection
//! sync and community voting, exposed for the binary and integration tests.

pub mod args;
pub mod community;
pub mod i18n;
pub mod logic;
pub mod session;
pub mod settings;
pub mod sources;
pub mod state;
pub mod sync;
pub mod util;

#[cfg(test)]
pub mod test_utils;
