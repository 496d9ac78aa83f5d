//! History ordering policy.

pub mod policy;
