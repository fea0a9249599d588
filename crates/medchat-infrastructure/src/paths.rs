//! Unified path management for persisted chat state.
//!
//! Session identity and conversation history live as two small files
//! under the platform config directory, resolved via the `dirs` crate so
//! the location is correct on Linux, macOS and Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for medchat.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/medchat/           # Config directory
/// ├── session_id               # Opaque session identifier (plain text)
/// └── messages.json            # Conversation log (JSON array of Message)
/// ```
pub struct MedchatPaths;

impl MedchatPaths {
    /// Returns the medchat configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/medchat/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("medchat"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the persisted session identifier.
    pub fn session_id_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session_id"))
    }

    /// Returns the path to the persisted conversation log.
    pub fn messages_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("messages.json"))
    }
}
