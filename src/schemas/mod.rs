// Plain data shared between the pipeline stages.

// Injected configuration: target platform, install root, listing URL.
pub mod config;
// Values produced while scanning the listing and the final run outcome.
pub mod release;
