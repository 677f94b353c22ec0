//! Command-line configuration surface for a pulsar-search sub-band
//! preprocessor.
//!
//! The argument vector is parsed once at process start into a read-only
//! [`Cmdline`]: the output-file prefix, the raw-data format selection,
//! the dispersion-measure sweep, sub-banding and downsampling factors,
//! masking and clipping controls, and whatever positional arguments are
//! left over. The heavy lifting those options describe (raw-data
//! decoding, de-dispersion, barycentric correction, output writing)
//! happens in the surrounding pipeline, not here.
//!
//! | Module    | Purpose                                             |
//! |-----------|-----------------------------------------------------|
//! | [`cli`]   | Option registry and the parsed [`Cmdline`] value    |
//! | [`parse`] | One-pass argument-vector parser                     |
//! | [`usage`] | Usage/help text rendered from the registry          |
//! | [`error`] | Parse failure taxonomy                              |

pub mod cli;
pub mod error;
pub mod parse;
pub mod usage;

pub use cli::{Cmdline, Counts, RawFormat};
pub use error::ParseError;
pub use parse::{parse_cmdline, parse_env_args};
pub use usage::usage;
