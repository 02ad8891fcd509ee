pub mod config;
pub mod presenter;
pub mod text;
pub mod types;

pub use presenter::Emitter;
