mod ring_renderer;
mod utils;

pub use ring_renderer::RingRenderer;
