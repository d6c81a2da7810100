// Domain core shared by the dashboard binary and the integration tests
pub mod animation;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod playback;
pub mod registry;
pub mod spatial;
pub mod stats;

pub use dispatch::{ModeSelection, Visual};
pub use domain::{DayType, ModeFamily};
pub use error::AnalyticsError;
pub use filter::{FilterEditor, FilterSnapshot};
pub use registry::VisualizationMode;
