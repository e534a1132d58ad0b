pub mod metadata_utils;
pub mod release_utils;
