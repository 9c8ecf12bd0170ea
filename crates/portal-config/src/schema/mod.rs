//! Configuration schema types for the portal.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod gemini;
mod logging;

pub use chat::*;
pub use gemini::*;
pub use logging::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub gemini: GeminiSection,
    pub chat: ChatSection,
    pub logging: LoggingSection,
}
