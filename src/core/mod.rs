//! Core engine - framework-agnostic aggregation, classification, navigation
//! and projection over the client → store → employee hierarchy.

/// Roll-up of ledger values through the hierarchy
pub mod aggregate;
/// Calendar helpers, periods and the reference-date clock
pub mod calendar;
/// Goal tier classification
pub mod classify;
/// Session facade tying navigation, views and edits together
pub mod dashboard;
/// In-memory entities and fact tables
pub mod entity_store;
/// Goal resolution with overrides
pub mod goals;
/// Export and import contracts
pub mod hooks;
/// Amount parsing at the edit boundary
pub mod input;
/// Discrete sales and per-day grid cells
pub mod ledger;
/// Drill-down state machine
pub mod navigator;
/// Single-day performance of a node
pub mod performance;
/// Row projection, display groups and pagination
pub mod projector;
/// Plain-text formatting for reports
pub mod report;
