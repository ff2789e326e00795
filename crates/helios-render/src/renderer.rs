use crate::renderable::Side;
use crate::rig::SkyRig;
use bytemuck::Zeroable;
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

/// Star cells per unit of view direction; higher means smaller, denser stars.
const STAR_GRID_SIZE: f32 = 180.0;

/// Fraction of star cells left empty.
const STAR_THRESHOLD: f32 = 0.996;

/// Albedo of the ground plane lit by the sun light.
const GROUND_ALBEDO: [f32; 3] = [0.22, 0.2, 0.16];

/// Per-frame sky state (192 bytes, matches WGSL SkyFrame).
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyFrameUniforms {
    pub inv_view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub sky_top: [f32; 3],
    pub sky_offset: f32,
    pub sky_bottom: [f32; 3],
    pub sky_exponent: f32,
    pub sun_direction: [f32; 3],
    pub sun_visible: f32,
    pub sun_color: [f32; 3],
    pub sun_angular_radius: f32,
    pub light_color: [f32; 3],
    pub light_intensity: f32,
    pub star_tint: [f32; 3],
    pub star_rotation: f32,
    pub stars_visible: f32,
    pub dome_radius: f32,
    pub _padding: [f32; 2],
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

impl SkyFrameUniforms {
    /// Collect the presentation state of every actor for one frame.
    pub fn from_rig(rig: &SkyRig, inv_view_proj: Mat4, camera_position: Vec3) -> Self {
        let dome = rig.sky_dome.mesh();
        let sphere = rig.sun_sphere.mesh();
        let light = rig.sun_light.light();
        let stars = rig.star_field.mesh();

        let sun_offset = sphere.transform.position;
        let orbit = sun_offset.length().max(f32::EPSILON);
        let sun_angular_radius = (sphere.geometry.radius / orbit).atan();

        // Back-side domes are seen from inside; a front-side dome would be culled.
        let dome_visible = dome.visible && dome.side == Side::Back;
        let (sky_top, sky_bottom) = if dome_visible {
            (dome.uniforms.top_color, dome.uniforms.bottom_color)
        } else {
            ([0.0; 3], [0.0; 3])
        };

        let light_intensity = if light.visible { light.intensity } else { 0.0 };

        Self {
            inv_view_proj: inv_view_proj.to_cols_array_2d(),
            camera_position: camera_position.extend(1.0).to_array(),
            sky_top,
            sky_offset: dome.uniforms.offset,
            sky_bottom,
            sky_exponent: dome.uniforms.exponent,
            sun_direction: sun_offset.normalize_or_zero().to_array(),
            sun_visible: flag(sphere.visible),
            sun_color: sphere.material.color.to_array(),
            sun_angular_radius,
            light_color: light.color.to_array(),
            light_intensity,
            star_tint: stars.material.color.to_array(),
            star_rotation: stars.transform.rotation.y,
            stars_visible: flag(stars.visible),
            dome_radius: dome.geometry.radius,
            _padding: [0.0; 2],
        }
    }
}

/// Draws the sky as a fullscreen triangle from `SkyFrameUniforms`.
/// All GPU resources are created at init; per frame only the uniform buffer is written.
pub struct SkyRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
}

impl SkyRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        // -- Shader source composition --
        let constants_preamble = format!(
            "const STAR_GRID_SIZE: f32 = {:.1};\nconst STAR_THRESHOLD: f32 = {:.4};\nconst GROUND_ALBEDO: vec3<f32> = vec3<f32>({:.3}, {:.3}, {:.3});\n",
            STAR_GRID_SIZE, STAR_THRESHOLD, GROUND_ALBEDO[0], GROUND_ALBEDO[1], GROUND_ALBEDO[2],
        );
        let gradient_wgsl = include_str!("../../../shaders/sky/gradient.wgsl");
        let sky_pass_wgsl = include_str!("../../../shaders/sky/sky_pass.wgsl");
        let source = format!("{constants_preamble}\n{gradient_wgsl}\n{sky_pass_wgsl}");

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sky-pass-shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sky-frame-uniforms"),
            contents: bytemuck::bytes_of(&SkyFrameUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky-bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky-pipeline-layout"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sky-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });

        log::info!("Sky renderer created ({:?})", surface_format);

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
        }
    }

    /// Upload this frame's sky state. Called once per frame.
    pub fn upload(&self, queue: &wgpu::Queue, frame: &SkyFrameUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(frame));
    }

    /// Record the sky draw into an open render pass.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}
