use serde::Deserialize;

use crate::envversion::EnvVersion;

/// Manifest format this build understands.
pub const MANIFEST_VERSION: u32 = 1;

/// `manifest.json`: what to index.
#[derive(Deserialize, Clone, Debug)]
pub struct InputManifest {
    pub version: u32,
    /// Document files, relative to the manifest's directory.
    pub documents: Vec<String>,
    /// Replaces the built-in environment versions when present.
    #[serde(default)]
    pub envversion: Option<EnvVersion>,
}

impl InputManifest {
    /// Environment versions to stamp on the built index.
    pub fn envversion(&self) -> EnvVersion {
        self.envversion.clone().unwrap_or_else(EnvVersion::sphinx3)
    }
}
