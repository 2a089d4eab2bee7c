// src/lib.rs

pub mod args;
pub mod commands;
pub mod error;
pub mod options;
pub mod ordered;
pub mod problem;
pub mod wrapper;
pub mod xml;
pub mod xml_input;
pub mod xml_output;

pub use args::parse_args;
pub use commands::run;
pub use error::{Error, Result};
pub use ordered::{Extensions, OrderedMap, ValidationErrors};
pub use problem::{ProblemDetails, ValidationProblemDetails};
pub use wrapper::{ProblemDetailsWrapper, ProblemRecord, ValidationProblemDetailsWrapper};
pub use xml::{decode_local_name, encode_local_name};
