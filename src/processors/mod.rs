//! Path transforms and the conversion service.

pub mod convert;
pub mod reverse;

// Re-export key types for convenience
pub use convert::{convert, inspect, ConversionRequest, ConvertError, HomeLocationProvider};
pub use reverse::{detect_loop_length, reverse_perimeter};
