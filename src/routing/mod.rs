//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (load current RouteTable snapshot)
//!     → matcher.rs (exact routes, in registration order)
//!     → matcher.rs (prefixes, in registration order)
//!     → CORS policy wraps the selected handler
//!     → handler writes the response, or 404 "not found"
//!
//! Registration (any time):
//!     register_route / register_prefix / set_cors_policy
//!     → copy current RouteTable
//!     → apply change
//!     → atomic swap; in-flight requests keep their snapshot
//! ```
//!
//! # Design Decisions
//! - Deterministic: same path and same registrations always pick the same handler
//! - First match wins (registration order)
//! - Exact routes always beat prefixes
//! - No regex in hot path

pub mod matcher;
pub mod router;

pub use matcher::{Matcher, PathPrefixMatcher, Route};
pub use router::{Resolution, RouteTable, Router, RouterService};
