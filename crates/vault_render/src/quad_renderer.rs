//! `wgpu` backend for [`vault_core::draw::Renderer`].
//!
//! Frame protocol: `clear` resets the CPU batch and remembers the background,
//! `present` appends one quad per call in draw order, `flip` grows the GPU
//! buffers if needed (power-of-two, never shrinking), uploads the batch and
//! submits a single render pass. Sprites are drawn as their fallback color.

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use vault_core::draw::{Appearance, Renderer, Rgba};
use vault_core::geometry::Rect;

use crate::batch::QuadBatch;
use crate::camera::Camera2D;
use crate::gpu_context::GpuContext;
use crate::quad_pipeline::QuadPipeline;
use crate::vertex::QuadVertex;

pub struct QuadRenderer {
    gpu: GpuContext,
    pipeline: QuadPipeline,
    camera: Camera2D,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
    batch: QuadBatch,
    background: Rgba,
    linear_output: bool,
}

impl QuadRenderer {
    /// `display` is the simulation's coordinate space, independent of the
    /// window's physical size.
    pub fn new(window: Arc<Window>, display: (u32, u32)) -> Result<Self, String> {
        let gpu = GpuContext::new(window)?;
        let pipeline = QuadPipeline::new(&gpu.device, gpu.surface_format);
        let camera = Camera2D::new(display.0, display.1);

        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);
        let linear_output = gpu.surface_format.is_srgb();

        log::info!(
            "Quad renderer ready: display {}x{}, surface {:?}",
            display.0,
            display.1,
            gpu.surface_format
        );

        Ok(Self {
            gpu,
            pipeline,
            camera,
            camera_buffer,
            camera_bind_group,
            vertex_buffer,
            index_buffer,
            vertex_capacity: 1,
            index_capacity: 1,
            batch: QuadBatch::new(),
            background: [1.0, 1.0, 1.0, 1.0],
            linear_output,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    fn output_color(&self, color: Rgba) -> Rgba {
        if self.linear_output {
            srgb_to_linear(color)
        } else {
            color
        }
    }

    fn ensure_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.vertex_capacity {
            self.vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.index_capacity {
            self.index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.index_capacity);
        }
    }
}

impl Renderer for QuadRenderer {
    fn clear(&mut self, background: Rgba) {
        self.batch.clear();
        self.background = background;
    }

    fn present(&mut self, rect: &Rect, appearance: &Appearance) {
        let color = self.output_color(appearance.color);
        self.batch.push_rect(rect, color);
    }

    fn flip(&mut self) {
        self.ensure_capacity(self.batch.vertices.len(), self.batch.indices.len());
        if !self.batch.is_empty() {
            self.gpu.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&self.batch.vertices),
            );
            self.gpu.queue.write_buffer(
                &self.index_buffer,
                0,
                bytemuck::cast_slice(&self.batch.indices),
            );
        }
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_uniform()]),
        );

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let [r, g, b, a] = self.output_color(self.background);
        let clear_color = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: f64::from(a),
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if !self.batch.is_empty() {
                render_pass.set_pipeline(&self.pipeline.render_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..self.batch.indices.len() as u32, 0, 0..1);
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        log::trace!("Presented {} quads", self.batch.quad_count());
    }
}

impl Drop for QuadRenderer {
    fn drop(&mut self) {
        log::info!("Releasing display resources");
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<QuadVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn srgb_to_linear(color: Rgba) -> Rgba {
    fn channel(c: f32) -> f32 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    [channel(color[0]), channel(color[1]), channel(color[2]), color[3]]
}
