//! The upstream catalog client.

mod gbooks;

pub use gbooks::{GoogleBooksClient, Page};
