//! # AutoApply Protocols
//!
//! Shared definitions for the AutoApply workspace.
//! Contains types and traits only - no implementations.
//!
//! ## Core Traits
//!
//! - [`Page`] - The seam through which the engine reads and writes a job-board document
//! - [`ProfileStore`] - Source of the applicant's auto-fill data
//!
//! ## Core Types
//!
//! - [`BoardId`] / [`BoardSelectors`] - Supported job boards and their field selectors
//! - [`Profile`] - Applicant data
//! - [`RuntimeMessage`] / [`AutoApplyResponse`] - The message contract between a caller and the engine

pub mod board;
pub mod error;
pub mod message;
pub mod page;
pub mod profile;
pub mod store;

pub use board::{BoardId, BoardSelectors, FieldKind};
pub use error::{ApplyError, PageError, StoreError};
pub use message::{AdapterOutcome, ApplyDetails, ApplyStatus, AutoApplyResponse, RuntimeMessage};
pub use page::{ElementHandle, MutationSignal, Page, SyntheticEvent};
pub use profile::Profile;
pub use store::ProfileStore;
