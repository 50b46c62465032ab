//! # Presentation Layer
//!
//! Turns engine results into terminal output. Data flows one way:
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] --> [ Output ]
//! ```
//!
//! * `view_models/`: the data contract. Plain `Serialize` structs; the JSON
//!   output is exactly these, wrapped in `{"content": ...}`.
//! * `presenters/`: pure functions from engine/runtime types to view models.
//!   Totals and orderings are decided here.
//! * `views/`: `Display` implementations for the plain format.
//! * `renderers/`: picks JSON or plain and decides on colour.
//! * `formatters/`: small shared helpers (grid layout, count cells).

pub mod formatters;
pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;

pub use renderers::{ConsoleRenderer, Renderer};
pub use view_models::{CommandResultViewModel, Guidance, StatusBadge};
pub use views::{CreateView, Style};
