//! Cache key naming convention.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key de cache siguiendo la convencion `<coleccion>[-<sufijo>]`.
///
/// El cache acepta cualquier `&str` como key; este tipo solo ayuda a que
/// los consumers escriban keys consistentes (`students-list`,
/// `students-42`) y a invalidar una familia completa con su coleccion.
/// No normaliza mayusculas: la key es opaca para el cache.
///
/// # Examples
///
/// ```
/// use pizarra_core::QueryKey;
///
/// assert_eq!(QueryKey::list("students").to_string(), "students-list");
/// assert_eq!(QueryKey::new("students").with_id(42).to_string(), "students-42");
/// assert_eq!(QueryKey::new("courses").to_string(), "courses");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    collection: String,
    suffix: Option<String>,
}

impl QueryKey {
    /// Key para una coleccion completa.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            suffix: None,
        }
    }

    /// Key para el listado de una coleccion (`<coleccion>-list`).
    pub fn list(collection: impl Into<String>) -> Self {
        Self::new(collection).with_filter("list")
    }

    /// Agrega un identificador como sufijo.
    pub fn with_id(self, id: impl fmt::Display) -> Self {
        self.with_filter(id.to_string())
    }

    /// Agrega un filtro arbitrario como sufijo.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.suffix = Some(filter.into());
        self
    }

    /// Retorna la coleccion; sirve como patron para invalidar toda la familia.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Retorna el sufijo, si existe.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suffix {
            Some(suffix) => write!(f, "{}-{}", self.collection, suffix),
            None => f.write_str(&self.collection),
        }
    }
}

impl From<QueryKey> for String {
    fn from(key: QueryKey) -> Self {
        key.to_string()
    }
}

impl From<&QueryKey> for String {
    fn from(key: &QueryKey) -> Self {
        key.to_string()
    }
}
