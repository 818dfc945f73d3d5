//! Password hashing configuration.

use serde::{Deserialize, Serialize};

/// Argon2id cost parameters.
///
/// The same parameters are used for every newly created hash. Verification
/// reads the parameters embedded in the stored PHC string, so raising these
/// values does not invalidate existing hashes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory")]
    pub argon2_memory_kib: u32,
    /// Number of iterations.
    #[serde(default = "default_iterations")]
    pub argon2_iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub argon2_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            argon2_memory_kib: default_memory(),
            argon2_iterations: default_iterations(),
            argon2_parallelism: default_parallelism(),
        }
    }
}

fn default_memory() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
