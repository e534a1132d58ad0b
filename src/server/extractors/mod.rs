mod addon_config_extractor;

pub use addon_config_extractor::*;
