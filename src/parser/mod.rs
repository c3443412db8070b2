pub mod menu_parser;

pub use menu_parser::{CategoryExtractor, MenuParser};
