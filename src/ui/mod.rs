//! Presenters that draw latency snapshots.
pub mod model;
mod presenter;
mod render;


pub use model::{LatencyStatus, PanelData, SeriesPanel};
pub use presenter::{
    DefaultPresenterFactory, LogPresenter, NullPresenter, Presenter, PresenterFactory,
};
pub use render::TerminalPresenter;
