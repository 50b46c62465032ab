mod info;
mod listing;
mod pivot;

use std::fmt;

/// Terminal capabilities the plain views adapt to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

/// Plain-format rendering of a view model.
pub trait CreateView {
    fn create_view<'a>(&'a self, style: Style) -> Box<dyn fmt::Display + 'a>;
}
