pub mod extractor;
pub mod handlers;
pub mod parser;
pub mod schema;
pub mod sections;
