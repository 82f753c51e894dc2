#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

#[cfg(test)]
pub mod runner;
#[cfg(test)]
pub mod test_fixtures;
#[cfg(test)]
pub mod test_helpers;
