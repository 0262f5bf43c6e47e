use crate::constants::path::RGB_SHIFT_SHADER_PATH;
use bevy::image::BevyDefault;
use bevy::{
    core_pipeline::{
        core_3d::graph::{Core3d, Node3d},
        fullscreen_vertex_shader::fullscreen_shader_vertex_state,
    },
    ecs::query::QueryItem,
    ecs::system::lifetimeless::Read,
    prelude::*,
    render::{
        RenderApp,
        extract_component::{
            ComponentUniforms, DynamicUniformIndex, ExtractComponent, ExtractComponentPlugin,
            UniformComponentPlugin,
        },
        render_graph::{
            NodeRunError, RenderGraphApp, RenderGraphContext, RenderLabel, ViewNode, ViewNodeRunner,
        },
        render_resource::{
            binding_types::{sampler, texture_2d, uniform_buffer},
            *,
        },
        renderer::{RenderContext, RenderDevice},
        view::ViewTarget,
    },
};

/// Fullscreen pass offsetting the red and blue channels in opposite
/// directions. Runs on every camera carrying `RgbShiftSettings`.
pub struct RgbShiftPostProcessPlugin;

impl Plugin for RgbShiftPostProcessPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ExtractComponentPlugin::<RgbShiftSettings>::default(),
            UniformComponentPlugin::<RgbShiftUniform>::default(),
        ));

        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app
            .add_render_graph_node::<ViewNodeRunner<RgbShiftPostProcessNode>>(
                Core3d,
                RgbShiftPostProcessLabel,
            )
            .add_render_graph_edges(
                Core3d,
                (
                    Node3d::Tonemapping,
                    RgbShiftPostProcessLabel,
                    Node3d::EndMainPassPostProcessing,
                ),
            );
    }

    fn finish(&self, app: &mut App) {
        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app.init_resource::<RgbShiftPostProcessPipeline>();
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, RenderLabel)]
struct RgbShiftPostProcessLabel;

/// Shift distance in UV units and its direction in radians.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq)]
pub struct RgbShiftSettings {
    pub amount: f32,
    pub angle: f32,
}

impl RgbShiftSettings {
    /// UV offset applied to the red channel; blue gets the negation.
    pub fn offset(&self) -> Vec2 {
        Vec2::from_angle(self.angle) * self.amount
    }
}

/// Render-world form of `RgbShiftSettings`, with the offset resolved once per
/// frame on the CPU. Padded to 16 bytes for WebGL uniform alignment.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct RgbShiftUniform {
    pub offset: Vec2,
    pub _padding: Vec2,
}

impl ExtractComponent for RgbShiftSettings {
    type QueryData = Read<RgbShiftSettings>;
    type QueryFilter = ();
    type Out = RgbShiftUniform;

    fn extract_component(settings: QueryItem<'_, Self::QueryData>) -> Option<Self::Out> {
        Some(RgbShiftUniform {
            offset: settings.offset(),
            _padding: Vec2::ZERO,
        })
    }
}

#[derive(Default)]
struct RgbShiftPostProcessNode;

impl ViewNode for RgbShiftPostProcessNode {
    type ViewQuery = (
        &'static ViewTarget,
        &'static DynamicUniformIndex<RgbShiftUniform>,
    );

    fn run(
        &self,
        _graph: &mut RenderGraphContext,
        render_context: &mut RenderContext,
        (view_target, settings_index): QueryItem<Self::ViewQuery>,
        world: &World,
    ) -> Result<(), NodeRunError> {
        let rgb_shift_pipeline = world.resource::<RgbShiftPostProcessPipeline>();
        let pipeline_cache = world.resource::<PipelineCache>();

        // Pipeline compiles asynchronously; skip frames until it is ready.
        let Some(pipeline) = pipeline_cache.get_render_pipeline(rgb_shift_pipeline.pipeline_id)
        else {
            return Ok(());
        };

        let settings_uniforms = world.resource::<ComponentUniforms<RgbShiftUniform>>();
        let Some(settings_binding) = settings_uniforms.uniforms().binding() else {
            return Ok(());
        };

        let post_process = view_target.post_process_write();

        let bind_group = render_context.render_device().create_bind_group(
            "rgb_shift_bind_group",
            &rgb_shift_pipeline.layout,
            &BindGroupEntries::sequential((
                post_process.source,
                &rgb_shift_pipeline.sampler,
                settings_binding.clone(),
            )),
        );

        let mut render_pass = render_context.begin_tracked_render_pass(RenderPassDescriptor {
            label: Some("rgb_shift_pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: post_process.destination,
                resolve_target: None,
                ops: Operations::default(),
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_render_pipeline(pipeline);
        render_pass.set_bind_group(0, &bind_group, &[settings_index.index()]);
        render_pass.draw(0..3, 0..1);

        Ok(())
    }
}

#[derive(Resource)]
struct RgbShiftPostProcessPipeline {
    layout: BindGroupLayout,
    sampler: Sampler,
    pipeline_id: CachedRenderPipelineId,
}

impl FromWorld for RgbShiftPostProcessPipeline {
    fn from_world(world: &mut World) -> Self {
        let render_device = world.resource::<RenderDevice>();

        let layout = render_device.create_bind_group_layout(
            "rgb_shift_bind_group_layout",
            &BindGroupLayoutEntries::sequential(
                ShaderStages::FRAGMENT,
                (
                    texture_2d(TextureSampleType::Float { filterable: true }),
                    sampler(SamplerBindingType::Filtering),
                    uniform_buffer::<RgbShiftUniform>(true),
                ),
            ),
        );

        // Shifted lookups land between texels, and off-screen ones clamp to the edge.
        let sampler = render_device.create_sampler(&SamplerDescriptor {
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            ..default()
        });

        let shader = world.load_asset(RGB_SHIFT_SHADER_PATH);

        let pipeline_id =
            world
                .resource_mut::<PipelineCache>()
                .queue_render_pipeline(RenderPipelineDescriptor {
                    label: Some("rgb_shift_pipeline".into()),
                    layout: vec![layout.clone()],
                    vertex: fullscreen_shader_vertex_state(),
                    fragment: Some(FragmentState {
                        shader,
                        shader_defs: vec![],
                        entry_point: "fragment".into(),
                        targets: vec![Some(ColorTargetState {
                            format: TextureFormat::bevy_default(),
                            blend: None,
                            write_mask: ColorWrites::ALL,
                        })],
                    }),
                    primitive: PrimitiveState::default(),
                    depth_stencil: None,
                    multisample: MultisampleState::default(),
                    push_constant_ranges: vec![],
                    zero_initialize_workgroup_memory: false,
                });

        Self {
            layout,
            sampler,
            pipeline_id,
        }
    }
}
