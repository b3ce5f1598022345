//! On-disk formats: the input property file and the generated-properties output file.
pub mod output;
pub mod properties;

pub use output::{read_output, write_output};
pub use properties::{load, parse};
