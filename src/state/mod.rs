//! Value types shared by every layer.
//!
//! Entities mirror the remote collection service; [`Domain`] names the four
//! information tabs and [`DomainItems`] is the per-domain cached result set.

pub mod types;

pub use types::{
    Candidate, CommunityPost, Constituency, Domain, DomainItems, FactCheck, Fulfillment,
    ManifestoPromise, PostId, Reply, Verdict, VoteType,
};
