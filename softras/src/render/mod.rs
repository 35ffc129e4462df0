pub(crate) mod framebuffer;
pub(crate) mod line;
pub(crate) mod msaa;
pub(crate) mod rasterizer;
