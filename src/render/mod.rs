//! Pixel-level rendering: buffers, rasterization and shading.

pub mod frame;
pub mod framebuffer;
pub mod rasterizer;

pub use frame::Frame;
pub use framebuffer::FrameBuffer;
pub use rasterizer::shader::{FlatShader, PhongShader, PixelShader};
pub use rasterizer::{FragmentBuffer, PixelSink, ScanlineRasterizer, ShadingPoint};
