#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

pub mod import;
