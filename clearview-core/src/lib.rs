//! Clearview accessibility core
//!
//! Platform-agnostic preference logic for the low-vision version of a site:
//! contrast themes, font scaling, image hiding and screen reader
//! announcements. Rendering and persistence are reached through the
//! [`PageSurface`] and [`PreferenceStore`] traits so the state machine runs
//! the same way in the browser and in tests.

pub mod action;
pub mod config;
pub mod controller;
pub mod error;
pub mod font;
pub mod messages;
pub mod prefs;
pub mod storage;
pub mod surface;
pub mod theme;
pub mod virtual_page;

// Re-export commonly used types
pub use action::AccessibilityAction;
pub use config::{ClearviewConfig, StorageKeys};
pub use controller::AccessibilityController;
pub use error::{ConfigError, PreferenceError};
pub use font::{FontAdjust, FontScale};
pub use messages::{Locale, Messages};
pub use prefs::AccessibilityPreferences;
pub use storage::{MemoryStore, PreferenceStore};
pub use surface::PageSurface;
pub use theme::ContrastTheme;
pub use virtual_page::{ThemeControl, VirtualImage, VirtualPage};
