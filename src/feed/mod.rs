mod decode;
pub mod types;

pub use decode::decode_feed;
pub use types::Entry;
