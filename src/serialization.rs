//! Byte-level persistence of encoder artifacts.
//!
//! Anything that is `Serialize + Deserialize` (schemas, feature layouts,
//! configs) gets [`SerializableParams`] through a bincode blanket impl, plus
//! file helpers on top of it.

use std::error::Error;
use std::path::Path;

/// Types that can be written to and read from a byte buffer.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;

    /// Write the encoded bytes to `path`.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let bytes = self.to_bytes().map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }

    /// Read a value previously written with [`SerializableParams::save_to_file`].
    fn load_from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes).map_err(std::io::Error::other)
    }
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaColumn, SchemaDefinition};

    #[test]
    fn test_schema_bytes() {
        let schema = SchemaDefinition::new(vec![
            SchemaColumn::categorical("color", ["red", "green"]),
            SchemaColumn::numeric("y"),
        ])
        .unwrap();
        let bytes = schema.to_bytes().unwrap();
        assert_eq!(SchemaDefinition::from_bytes(&bytes).unwrap(), schema);
    }

    #[test]
    fn test_from_bytes_garbage() {
        let bad_bytes: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        assert!(SchemaDefinition::from_bytes(bad_bytes).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("tabular_features_missing.bin");
        std::fs::remove_file(&path).ok();
        let err = SchemaDefinition::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
