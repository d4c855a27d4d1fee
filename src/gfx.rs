use crate::{
    demo::Demo,
    error::{Error, Result},
    rectangle_brush::RectangleBrush,
    render::{scissor, RenderContext},
};
use std::sync::Arc;
use wgpu_glyph::{ab_glyph::FontArc, GlyphBrush, GlyphBrushBuilder};
use winit::{dpi::PhysicalSize, window::Window};

pub struct Gfx {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    glyph_brush: GlyphBrush<()>,
    rectangle_brush: RectangleBrush,
    staging_belt: wgpu::util::StagingBelt,
}

impl Gfx {
    pub fn new(window: Arc<Window>, fonts: Vec<FontArc>) -> Result<Gfx> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(Error::NoAdapter)?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        ))?;

        let capabilities = surface.get_capabilities(&adapter);
        let render_format = capabilities
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .or_else(|| capabilities.formats.first().copied())
            .ok_or(Error::NoAdapter)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: render_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let glyph_brush = GlyphBrushBuilder::using_fonts(fonts).build(&device, render_format);
        let rectangle_brush = RectangleBrush::new(&device, render_format);

        Ok(Gfx {
            surface,
            device,
            queue,
            config,
            glyph_brush,
            rectangle_brush,
            staging_belt: wgpu::util::StagingBelt::new(1024),
        })
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, demo: &mut Demo) -> Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("timed out waiting for the next frame");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let size = (self.config.width, self.config.height);

        let ops = demo.layout(&mut self.glyph_brush);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame"),
            });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(demo.theme().bg),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let mut context = RenderContext::new(&mut self.glyph_brush, &mut self.rectangle_brush);
        for op in ops {
            context.draw(op);
        }
        let clipped = context.take_clipped();

        self.rectangle_brush
            .draw(&self.device, &self.queue, &mut encoder, &view, size);

        self.glyph_brush
            .draw_queued(
                &self.device,
                &mut self.staging_belt,
                &mut encoder,
                &view,
                size.0,
                size.1,
            )
            .map_err(Error::DrawText)?;

        let transform = wgpu_glyph::orthographic_projection(size.0, size.1);
        for (clip, texts) in clipped {
            let region = match scissor(clip, size) {
                Some(region) => region,
                None => continue,
            };
            for (block, origin, width) in &texts {
                self.glyph_brush.queue(block.section(*origin, *width));
            }
            self.glyph_brush
                .draw_queued_with_transform_and_scissoring(
                    &self.device,
                    &mut self.staging_belt,
                    &mut encoder,
                    &view,
                    transform,
                    region,
                )
                .map_err(Error::DrawText)?;
        }

        self.staging_belt.finish();
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        self.staging_belt.recall();

        Ok(())
    }
}
