// Application commands.

// Fetch, extract and activate the newest Go release.
pub mod install;
