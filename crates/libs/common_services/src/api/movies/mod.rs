pub mod error;
pub mod filter;
pub mod interfaces;
pub mod pagination;
pub mod service;
pub mod sort;
