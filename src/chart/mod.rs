mod bitmap;
mod ticks;

pub use bitmap::render_png;
pub use ticks::PriceTicks;
