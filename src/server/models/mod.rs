mod request_model;
mod subtitle_model;

pub use request_model::*;
pub use subtitle_model::*;
