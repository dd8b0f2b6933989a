pub mod ast;
pub mod config;
pub mod error;
pub mod export;
pub mod inference;
pub mod loader;
pub mod resolver;
pub mod store;
pub mod utils;

pub use ast::{Document, Node, Value};
pub use config::Config;
pub use error::{ConfigError, Location};
pub use loader::{Loader, LoaderBuilder, Source, load};
pub use resolver::{Extension, Tag, TagTable};
pub use store::VariableStore;
