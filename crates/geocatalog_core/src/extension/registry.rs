//! In-process service extension registry.

use crate::extension::spi::{ExtensionKind, ServiceExtension};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Registered extension snapshot with its registration-time kind.
#[derive(Clone)]
pub struct RegisteredExtension {
    pub extension: Arc<dyn ServiceExtension>,
    pub kind: ExtensionKind,
}

impl RegisteredExtension {
    pub fn new(extension: Arc<dyn ServiceExtension>) -> Self {
        let kind = extension.kind();
        Self { extension, kind }
    }

    pub fn with_kind(extension: Arc<dyn ServiceExtension>, kind: ExtensionKind) -> Self {
        Self { extension, kind }
    }

    pub fn extension_id(&self) -> &str {
        self.extension.extension_id()
    }

    pub fn is_generic(&self) -> bool {
        self.kind.is_generic()
    }
}

impl Debug for RegisteredExtension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredExtension")
            .field("extension_id", &self.extension_id())
            .field("kind", &self.kind)
            .finish()
    }
}

/// Supplies the ordered extension list the catalog resolves against.
///
/// Hosts with their own plugin runtime implement this directly; others use
/// `ExtensionRegistry`.
pub trait ExtensionSource: Send + Sync {
    fn service_extensions(&self) -> Vec<RegisteredExtension>;
}

impl ExtensionSource for Vec<RegisteredExtension> {
    fn service_extensions(&self) -> Vec<RegisteredExtension> {
        self.clone()
    }
}

/// Extension registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionRegistryError {
    InvalidExtensionId(String),
    DuplicateExtensionId(String),
}

impl Display for ExtensionRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidExtensionId(value) => write!(f, "extension id is invalid: {value}"),
            Self::DuplicateExtensionId(value) => {
                write!(f, "extension id already registered: {value}")
            }
        }
    }
}

impl Error for ExtensionRegistryError {}

/// Ordered in-process registry. Resolution order is registration order.
#[derive(Default)]
pub struct ExtensionRegistry {
    entries: Vec<RegisteredExtension>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one extension using its declared kind.
    pub fn register(
        &mut self,
        extension: Arc<dyn ServiceExtension>,
    ) -> Result<(), ExtensionRegistryError> {
        let kind = extension.kind();
        self.register_with_kind(extension, kind)
    }

    /// Registers one extension, overriding its declared kind.
    ///
    /// # Errors
    /// - `InvalidExtensionId` when the id is malformed, including ids with
    ///   surrounding whitespace.
    /// - `DuplicateExtensionId` when the id is already registered.
    pub fn register_with_kind(
        &mut self,
        extension: Arc<dyn ServiceExtension>,
        kind: ExtensionKind,
    ) -> Result<(), ExtensionRegistryError> {
        let extension_id = extension.extension_id().to_string();
        if !is_valid_extension_id(&extension_id) {
            return Err(ExtensionRegistryError::InvalidExtensionId(extension_id));
        }
        if self.get(&extension_id).is_some() {
            return Err(ExtensionRegistryError::DuplicateExtensionId(extension_id));
        }

        log::debug!(
            "event=extension_register module=registry status=ok extension_id={} kind={}",
            extension_id,
            kind.as_str()
        );
        self.entries.push(RegisteredExtension::with_kind(extension, kind));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns extension ids in registration order.
    pub fn extension_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.extension_id().to_string())
            .collect()
    }

    pub fn generic_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_generic()).count()
    }

    /// Returns one entry by id.
    pub fn get(&self, extension_id: &str) -> Option<&RegisteredExtension> {
        let normalized = extension_id.trim();
        self.entries
            .iter()
            .find(|entry| entry.extension_id() == normalized)
    }
}

impl ExtensionSource for ExtensionRegistry {
    fn service_extensions(&self) -> Vec<RegisteredExtension> {
        self.entries.clone()
    }
}

fn is_valid_extension_id(value: &str) -> bool {
    let mut chars = value.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if !first.is_ascii_lowercase() && !first.is_ascii_digit() {
        return false;
    }

    let mut prev_separator = false;
    for c in chars {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            prev_separator = false;
            continue;
        }
        if c == '.' || c == '_' || c == '-' {
            if prev_separator {
                return false;
            }
            prev_separator = true;
            continue;
        }
        return false;
    }
    !prev_separator
}
