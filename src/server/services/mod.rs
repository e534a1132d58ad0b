pub mod app_services;
pub mod ranking_services;
pub mod source_services;
pub mod subtitle_services;

pub use source_services::DynSubtitleSource;
pub use subtitle_services::DynSubtitleService;
