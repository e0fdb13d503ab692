//! Domain layer containing the mapping model and storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait and error taxonomy
//! - [`delete_event`] - Queued soft-delete request
//! - [`delete_worker`] - Asynchronous delete processing worker
//!
//! # Delete Flow
//!
//! 1. HTTP handler receives `DELETE /api/user/urls`
//! 2. [`delete_event::DeleteRequest`] is sent to an async channel
//! 3. The handler answers `202 Accepted` without waiting
//! 4. [`delete_worker::run_delete_worker`] applies it via
//!    [`repositories::MappingRepository::mark_deleted`]

pub mod delete_event;
pub mod delete_worker;
pub mod entities;
pub mod repositories;
