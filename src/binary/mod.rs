//! Binary file detection
//!
//! Layered decision for a single repository blob: inline API hint, then the
//! known-text extension list, then a range fetch of the file prefix sniffed
//! for NUL bytes.

pub mod classifier;
pub mod extension;
pub mod fetch;
pub mod sniff;

pub use classifier::{BinaryChecker, Evidence};
pub use extension::is_known_text_extension;
pub use fetch::{PrefixFetcher, RawContentFetcher};
pub use sniff::looks_binary;
