pub mod batch;
pub mod camera;
pub mod gpu_context;
pub mod quad_pipeline;
pub mod quad_renderer;
pub mod vertex;

pub use batch::QuadBatch;
pub use camera::{Camera2D, CameraUniform};
pub use gpu_context::GpuContext;
pub use quad_pipeline::QuadPipeline;
pub use quad_renderer::QuadRenderer;
pub use vertex::QuadVertex;
