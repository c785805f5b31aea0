//! # AutoApply Supabase profile
//!
//! Reads the applicant profile from the hosted backend's REST interface
//! (PostgREST), one row per user.

mod row;
mod store;

pub use row::ProfileRow;
pub use store::SupabaseProfileStore;
