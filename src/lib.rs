//! Gangway - Conversational HR Onboarding Assistant
//!
//! This crate implements the message-orchestration pipeline and session
//! lifecycle behind an HR onboarding assistant: intent classification,
//! knowledge retrieval, prompt assembly, reply refinement, and durable
//! append-only conversations between participants and configured agents.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
