// shopchat library - ecommerce chat with guarded sql underneath

pub mod cli;
mod core;
mod error;
mod server;
pub mod session;

pub use crate::core::{
    Classification, Db, Gemini, Product, Rejection, ValidatedQuery, classify, extract_text,
    product_listing, prompt, validate,
};
pub use error::Error;
pub use server::Server;
