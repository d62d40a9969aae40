//! Subfill - Subtitle Coverage Completion
//!
//! Scans a media library and guarantees that every video asset has subtitle
//! sidecars in a configured set of target languages, obtained by translating
//! subtitles already present or by transcribing the asset's audio when none
//! exist. The resolver decides what to do; the executor does it with
//! write-once, partial-failure-isolated discipline.

pub mod asset;
pub mod capability;
pub mod cli;
pub mod config;
pub mod error;
pub mod execute;
pub mod language;
pub mod media;
pub mod resolve;
pub mod scan;
pub mod transcribe;
pub mod translate;
pub mod workflow;
