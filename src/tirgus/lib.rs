//! # Tirgus Architecture
//!
//! Tirgus is a **UI-agnostic marketplace browsing library**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! ## The Layer Stack
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs + main.rs, binary only)                 │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - TirgusApi: one facade over the stores and the engine     │
//! │  - Accepts user intents (search, tab, favorite, filters)    │
//! │  - view() recomputes every derived output in one pass       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State Stores (listings.rs, favorites.rs, notifications.rs) │
//! │  - Each owns exactly one collection and its mutations       │
//! │  - Persist after every mutation, in-memory copy is          │
//! │    authoritative                                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract KvStore trait over JSON key/value snapshots     │
//! │  - FileStore (production), MemoryStore (testing)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine ([`engine`]) sits beside the stores: it is a pure function from
//! (listings, favorite ids, search text, active tab, criteria) to the four
//! derived outputs—annotated listings, filtered listings, dashboard stats and
//! tab counts. It holds no state and never mutates a store, so there is no
//! way for a render to observe a stale partial result.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular
//! Rust types, never writes to stdout/stderr and never assumes a terminal.
//! The same core could serve a REST API or a desktop shell.
//!
//! Persistence is deliberately forgiving: a corrupt or missing snapshot falls
//! back to a default and a failed write is logged and dropped. The user's
//! current session always runs off the in-memory state; disk is a best-effort
//! mirror for the next session.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`engine`]: Pure aggregation and filter pipeline
//! - [`panel`]: Filter form state machine (draft vs. committed criteria)
//! - [`listings`], [`favorites`], [`notifications`]: the three state stores
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Listing`, `Specs`, `Notification`)
//! - [`remote`]: Boundary traits for the listing source and favorite sync
//! - [`seed`]: Bundled demo data
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod listings;
pub mod model;
pub mod notifications;
pub mod panel;
pub mod remote;
pub mod seed;
pub mod store;
