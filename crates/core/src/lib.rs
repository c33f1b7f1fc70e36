//! noisemix-core — noisy-speech corpus synthesis.
//!
//! Mixes clean speech recordings with categorized noise at balanced,
//! randomized SNR levels and writes a labeled output corpus
//! (mixed / clean-copy / noise-copy triples joined by a file id).

pub mod audio;
pub mod config;
pub mod corpus;
pub mod error;
pub mod mix;
pub mod organize;
