//! Filesystem tree walking and content fingerprinting

pub mod hasher;
pub mod walker;

pub use hasher::fingerprint;
pub use walker::regular_files;
