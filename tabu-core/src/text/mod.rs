//! Text primitives shared by every pipeline stage

pub mod filter;
mod normalize;
pub mod tokens;

pub use filter::ContentFilter;
pub use normalize::normalize;
pub use tokens::{letter_tokens, Tokenizer};
