// Author: Dustin Pilgrim
// License: MIT

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::ast::Document;
use crate::resolver::{Extension, TagTable};
use crate::store::VariableStore;
use crate::{ConfigError, Value};

mod include;
mod resolution;
mod source;

pub use resolution::Resolution;
pub use source::Source;

/// Resolves configuration documents against one tag table and one
/// variable store.
///
/// # Example
/// ```no_run
/// use tfexp_cfg::Loader;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let loader = Loader::builder().run_mode("fit").build();
/// let value = loader.load_file("experiments/mnist.yaml")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Loader {
    store: Arc<VariableStore>,
    table: TagTable,
    run_mode: Option<String>,
    max_include_depth: Option<usize>,
}

/// Builder for [`Loader`].
#[derive(Debug, Clone, Default)]
pub struct LoaderBuilder {
    store: Option<Arc<VariableStore>>,
    extensions: Vec<Extension>,
    max_include_depth: Option<usize>,
}

impl LoaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `store` instead of the process-wide store.
    pub fn store(mut self, store: Arc<VariableStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Register `!switchcmd` selecting by `run_mode`.
    pub fn run_mode(self, run_mode: impl Into<String>) -> Self {
        self.extension(Extension::SwitchCmd {
            run_mode: Some(run_mode.into()),
        })
    }

    pub fn extension(mut self, extension: Extension) -> Self {
        // a later registration of the same tag replaces the earlier one
        self.extensions
            .retain(|e| std::mem::discriminant(e) != std::mem::discriminant(&extension));
        self.extensions.push(extension);
        self
    }

    /// Fail includes nested deeper than `depth` levels. Off by default, in
    /// which case an include cycle recurses until the stack is exhausted.
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = Some(depth);
        self
    }

    pub fn build(self) -> Loader {
        let run_mode = self.extensions.iter().find_map(|e| match e {
            Extension::SwitchCmd { run_mode } => run_mode.clone(),
        });
        Loader {
            store: self.store.unwrap_or_else(VariableStore::global),
            table: TagTable::new(&self.extensions),
            run_mode,
            max_include_depth: self.max_include_depth,
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// A loader with the base tags and the process-wide store.
    pub fn new() -> Self {
        LoaderBuilder::new().build()
    }

    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::new()
    }

    pub fn store(&self) -> &Arc<VariableStore> {
        &self.store
    }

    pub fn tags(&self) -> &TagTable {
        &self.table
    }

    pub fn run_mode(&self) -> Option<&str> {
        self.run_mode.as_deref()
    }

    pub fn max_include_depth(&self) -> Option<usize> {
        self.max_include_depth
    }

    /// Parse and fully resolve `source`.
    pub fn load(&self, source: impl Into<Source>) -> Result<Value, ConfigError> {
        let document = source.into().into_document()?;
        self.resolve_document(&document)
    }

    pub fn load_str(&self, text: &str) -> Result<Value, ConfigError> {
        self.load(Source::text(text))
    }

    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Value, ConfigError> {
        self.load(Source::path(path.as_ref()))
    }

    pub fn load_reader<R: Read + 'static>(&self, reader: R) -> Result<Value, ConfigError> {
        self.load(Source::reader(reader))
    }

    /// Resolve an already parsed document as a top-level load.
    pub fn resolve_document(&self, document: &Document) -> Result<Value, ConfigError> {
        debug!(
            "Resolving document {}",
            document
                .origin
                .as_ref()
                .map_or_else(|| "<memory>".to_string(), |p| p.display().to_string())
        );
        Resolution::new(self, document, 0).run()
    }
}

/// Load `source` with the process-wide store. `!switchcmd` is always
/// registered; without a run mode it picks the `default` case.
pub fn load(source: impl Into<Source>, run_mode: Option<&str>) -> Result<Value, ConfigError> {
    Loader::builder()
        .extension(Extension::SwitchCmd {
            run_mode: run_mode.map(str::to_string),
        })
        .build()
        .load(source)
}

#[cfg(test)]
mod tests;
