// lib.rs
pub mod alignment_record;
pub mod commands;
pub mod config;
pub mod contig_store;
pub mod error;
pub mod faidx;
pub mod locate;
pub mod maf;
pub mod report;
pub mod resolve;
pub mod sequence_index;
pub mod verify;
pub mod xmfa;
