//! Sign configuration
//!
//! Holds the serial settings and the message shown at power-up. The
//! configuration is serialized with postcard and carries a magic number and
//! version so stale or foreign data is rejected on load.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::message::ROW_COUNT;

/// Magic number to identify valid configuration data
pub const CONFIG_MAGIC: u32 = 0x5452_4C58; // "TRLX"

/// Current configuration data version
pub const CONFIG_VERSION: u8 = 1;

/// Serial baud rate used by the sign's command port
pub const DEFAULT_BAUD: u32 = 9600;

/// Maximum length of one boot line (one row of the sign)
pub const MAX_LINE_LEN: usize = 32;

/// Upper bound on the serialized configuration size
pub const MAX_CONFIG_SIZE: usize = 160;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Invalid magic or version
    InvalidFormat,
    /// Boot line longer than [`MAX_LINE_LEN`]
    LineTooLong,
    /// Row index out of range
    InvalidRow,
}

/// Complete sign configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignConfig {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Command port baud rate
    pub baud: u32,
    /// Text loaded into each row at power-up
    pub boot_lines: [String<MAX_LINE_LEN>; ROW_COUNT],
}

impl Default for SignConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SignConfig {
    /// Create a configuration with blank boot lines
    pub fn new() -> Self {
        Self {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            baud: DEFAULT_BAUD,
            boot_lines: core::array::from_fn(|_| String::new()),
        }
    }

    /// Check if the data is valid (magic and version match)
    pub fn is_valid(&self) -> bool {
        self.magic == CONFIG_MAGIC && self.version == CONFIG_VERSION
    }

    /// Set the boot text of one row
    pub fn set_boot_line(&mut self, row: usize, text: &str) -> Result<(), ConfigError> {
        let line = self.boot_lines.get_mut(row).ok_or(ConfigError::InvalidRow)?;
        let mut new_line = String::new();
        new_line
            .push_str(text)
            .map_err(|_| ConfigError::LineTooLong)?;
        *line = new_line;
        Ok(())
    }

    /// Boot lines as byte slices, ready for [`MessageBuffer::load_rows`]
    ///
    /// [`MessageBuffer::load_rows`]: crate::message::MessageBuffer::load_rows
    pub fn boot_rows(&self) -> [&[u8]; ROW_COUNT] {
        core::array::from_fn(|row| self.boot_lines[row].as_bytes())
    }

    /// Serialize into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, ConfigError> {
        let used = postcard::to_slice(self, buffer).map_err(|_| ConfigError::Serialize)?;
        Ok(used.len())
    }

    /// Deserialize and validate stored configuration
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: SignConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        if !config.is_valid() {
            return Err(ConfigError::InvalidFormat);
        }
        Ok(config)
    }

    /// Stored configuration, or defaults if it is missing or invalid
    pub fn load_or_default(bytes: &[u8]) -> Self {
        match Self::decode(bytes) {
            Ok(config) => config,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Failed to load sign config: {:?}, using defaults", _e);
                Self::new()
            }
        }
    }
}
