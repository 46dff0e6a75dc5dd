// core pipeline - classification, guarding, execution, formatting

mod ai;
mod classify;
mod db;
mod format;
mod guard;
pub mod prompt;

pub use ai::{Gemini, extract_text};
pub use classify::{Classification, classify};
pub use db::{Db, Product};
pub use format::product_listing;
pub use guard::{Rejection, ValidatedQuery, validate};
