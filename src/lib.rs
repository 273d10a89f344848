#[macro_use]
pub mod macros;

pub mod api;
pub mod dom;
pub mod error;
pub mod parser;
pub mod player;
pub mod schema;
pub mod select;
