//! Application fault code catalogs loaded from TOML.
//!
//! A catalog file lists the host program's fault codes, one table per
//! entry, keyed by a lowercase entry name:
//!
//! ```toml
//! [codes.user_not_found]
//! code = "app.user.NotFound"
//! num_args = 1
//! template = "User {0} was not found."
//! ```
//!
//! Every entry is validated exactly like [`FaultCode::new`].
//! [`FaultCatalog::load`] also honours environment overrides addressed by
//! entry name, e.g. `PAHAKIA__CODES__USER_NOT_FOUND__TEMPLATE`.

use std::collections::BTreeMap;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{debug, info};

use crate::code::FaultCode;
use crate::codes;
use crate::fault::{Fault, ResultExt};

/// One `[codes.<name>]` entry of a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeEntry {
    /// The fault code identifier.
    pub code: String,
    /// Number of template arguments. Signed so negative values are
    /// reported as a fault rather than a parse error.
    #[serde(default)]
    pub num_args: i64,
    /// The message template.
    pub template: String,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    codes: BTreeMap<String, CodeEntry>,
}

/// A set of application fault codes, keyed by code.
#[derive(Debug, Clone, Default)]
pub struct FaultCatalog {
    codes: BTreeMap<String, FaultCode>,
}

impl FaultCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a TOML file.
    ///
    /// Variables of the form `PAHAKIA__CODES__<NAME>__<FIELD>` override a
    /// field of the entry named `<name>`.
    ///
    /// # Errors
    ///
    /// - [`CATALOG_NOT_FOUND`](codes::CATALOG_NOT_FOUND) if the file does not exist
    /// - a naturalized `config::ConfigError` if it cannot be parsed
    /// - any fault from [`register`](Self::register) for an invalid entry
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Fault> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Fault::raise(
                &codes::CATALOG_NOT_FOUND,
                [path.display().to_string()],
            ));
        }

        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix("PAHAKIA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .naturalize()?;

        let catalog = Self::from_config(config)?;
        info!(path = %path.display(), codes = catalog.len(), "loaded fault catalog");
        Ok(catalog)
    }

    /// Parses a catalog from TOML text.
    pub fn from_toml_str(toml: &str) -> Result<Self, Fault> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .naturalize()?;
        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self, Fault> {
        let file: CatalogFile = config.try_deserialize().naturalize()?;
        let mut catalog = Self::new();
        for (name, entry) in file.codes {
            debug!(entry = %name, code = %entry.code, "validating catalog entry");
            let code = FaultCode::new(entry.code, entry.num_args, entry.template)?;
            catalog.register(code)?;
        }
        Ok(catalog)
    }

    /// Adds a code to the catalog.
    ///
    /// # Errors
    ///
    /// [`RESERVED_CODE`](codes::RESERVED_CODE) for codes in the framework's
    /// namespace, [`DUPLICATE_CODE`](codes::DUPLICATE_CODE) if the
    /// identifier is already registered.
    pub fn register(&mut self, code: FaultCode) -> Result<(), Fault> {
        if codes::is_reserved(code.code()) {
            return Err(Fault::raise(&codes::RESERVED_CODE, [code.code()]));
        }
        if self.codes.contains_key(code.code()) {
            return Err(Fault::raise(&codes::DUPLICATE_CODE, [code.code()]));
        }
        debug!(code = %code.code(), num_args = code.num_args(), "registered fault code");
        self.codes.insert(code.code().to_string(), code);
        Ok(())
    }

    /// Looks up a code.
    pub fn get(&self, code: &str) -> Option<&FaultCode> {
        self.codes.get(code)
    }

    /// Creates a fault for the registered code `code`.
    ///
    /// # Errors
    ///
    /// [`UNKNOWN_CODE`](codes::UNKNOWN_CODE) if `code` is not registered,
    /// otherwise as [`Fault::create`].
    pub fn create<I, S>(&self, code: &str, args: I) -> Result<Fault, Fault>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fault_code = self
            .get(code)
            .ok_or_else(|| Fault::raise(&codes::UNKNOWN_CODE, [code]))?;
        Fault::create(fault_code, args)
    }

    /// Registered codes in identifier order.
    pub fn codes(&self) -> impl Iterator<Item = &FaultCode> {
        self.codes.values()
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if no code is registered.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
