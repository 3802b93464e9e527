//! Domain types for Streamboard.
//!
//! - [`StreamReference`]: identifies a stream contract and its parties
//! - [`StreamSummary`]: derived cap/percent numbers for one stream
//! - [`StreamView`]: a reference merged with its summary, the view-model element

mod stream;
mod summary;

pub use stream::{is_hex_address, StreamReference, StreamView};
pub use summary::StreamSummary;
