pub mod grid;
pub mod number;

pub use grid::Grid;
pub use number::count_cell;
