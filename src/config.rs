//! Writer configuration

use crate::error::{Result, TbfError};
use crate::types::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// Writer configuration
///
/// Serializable so host applications can embed it in their own config files;
/// missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Alignment of every tensor payload in bytes
    pub page_size: u32,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl WriterConfig {
    /// Set page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(TbfError::InvalidPageSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WriterConfig::default();
        assert_eq!(config.page_size, 4096);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = WriterConfig::default().with_page_size(0);
        assert!(matches!(config.validate(), Err(TbfError::InvalidPageSize)));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: WriterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WriterConfig::default());

        let config: WriterConfig = serde_json::from_str(r#"{"page_size": 512}"#).unwrap();
        assert_eq!(config.page_size, 512);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&WriterConfig::default().with_page_size(8192)).unwrap();
        assert_eq!(json, r#"{"page_size":8192}"#);
    }
}
