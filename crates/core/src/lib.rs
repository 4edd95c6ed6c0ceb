#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Shared primitives for the ephemeris diagnostic facility: the message
//! model consumed by the `logging` crate's emitters, and the exit codes the
//! batch binary reports to its caller.
//!
//! # Design
//!
//! Diagnostics are owned values. A [`message::Message`] carries its payload
//! as an independently allocated string clamped to a fixed capacity class,
//! so no two logical messages ever share storage and formatting one message
//! can never corrupt another that is still in flight. Call sites that must
//! be identified in fatal diagnostics capture a
//! [`message::SourceLocation`] through the [`message_source!`] macro.
//!
//! # Invariants
//!
//! - Message payloads never exceed [`message::LONG_TEXT_CAPACITY`] bytes;
//!   oversized input is truncated on a UTF-8 character boundary, never
//!   copied past capacity.
//! - Rendering reuses a caller-held [`message::MessageScratch`] buffer, so
//!   emitting a batch of diagnostics performs no per-message allocation
//!   once the scratch has grown to the working line length.

/// Centralized exit code definitions for the batch binary.
pub mod exit_code;
/// Message formatting utilities shared across workspace binaries.
pub mod message;
