//! Lecture viewer logic for the course site, independent of any browser API.
//!
//! The browser build (`lectern-wasm`) and the staff CLI (`lectern-cli`) both
//! drive the same [`viewer::LectureViewer`] through the [`ui::UiTree`] seam.

pub mod announcements;
pub mod config;
pub mod embed;
pub mod error;
pub mod lecture;
pub mod media;
pub mod navigation;
pub mod present;
pub mod ui;
pub mod viewer;

pub use config::SiteConfig;
pub use error::LecternError;
pub use lecture::{lecture_key, LectureKey};
pub use media::{MediaDirectory, MediaRecord, Recording};
pub use viewer::{EventOutcome, LectureViewer, ViewerEvent, ViewerState};
