pub mod state;
mod terminal;

pub use terminal::show;
