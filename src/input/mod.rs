//! Input processing module
//! Delivers raw resume and job text from files to the scoring core

pub mod file_detector;
pub mod text_extractor;
pub mod manager;
