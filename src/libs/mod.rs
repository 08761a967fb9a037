// Building blocks used by the install command.

pub mod errors;
pub mod listing;
pub mod paths;
pub mod utilities;
