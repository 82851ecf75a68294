//! quizrun-core — Quiz model, importer, engine, and review report.
//!
//! This crate defines the data model and the quiz state machine that the
//! quizrun front ends drive. Rendering is left to the caller: the engine
//! exposes view data and consumes discrete events.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod shuffle;
pub mod view;
