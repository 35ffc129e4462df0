use super::*;
use std::sync::Arc;

use crate::foundation::core::{BLACK, BLUE, GREEN, RED};
use crate::mesh::buffer::Mesh;
use crate::mesh::primitives;
use crate::mesh::vertex::Vertex;
use crate::shading::builtin::{AlphaTestShader, UnlitShader};
use crate::shading::state::{BlendMode, RenderQueue, RenderState, ZTest};
use crate::transform::model::Transform;
use crate::transform::projection::perspective;
use crate::transform::space::object_to_clip;
use glam::Vec4;

/// NDC coordinate that lands exactly on screen coordinate `s` in a 64 pixel axis.
fn ndc64(s: f32) -> f32 {
    s / 32.0 - 1.0
}

fn state(cull: CullMode, z_test: ZTest) -> RenderState {
    RenderState {
        cull,
        z_test,
        ..RenderState::default()
    }
}

fn tri(name: &str, positions: [Vec3; 3], color: Color, state: RenderState) -> Drawable {
    let vertices = positions.iter().map(|p| Vertex::from_position(*p)).collect();
    let mesh = Mesh::from_parts(vertices, vec![0, 1, 2]).unwrap();
    let program = ShaderProgram::new(UnlitShader::default())
        .with_base_color(color)
        .with_state(state);
    Drawable::new(name, Arc::new(mesh), program)
}

fn screen_tri64(a: (f32, f32), b: (f32, f32), c: (f32, f32), z: f32) -> [Vec3; 3] {
    [
        Vec3::new(ndc64(a.0), ndc64(a.1), z),
        Vec3::new(ndc64(b.0), ndc64(b.1), z),
        Vec3::new(ndc64(c.0), ndc64(c.1), z),
    ]
}

fn raster(size: u32, msaa: MsaaMode) -> Rasterizer {
    let mut r = Rasterizer::new(
        Viewport::new(size, size).unwrap(),
        RasterizerOpts {
            msaa,
            ..RasterizerOpts::default()
        },
    );
    r.clear(ClearFlags::ALL, BLACK);
    r
}

#[test]
fn single_red_triangle_covers_exactly_its_pixels() {
    let mut r = raster(64, MsaaMode::None);
    let mut d = tri(
        "red",
        screen_tri64((10.0, 10.0), (50.0, 10.0), (10.0, 50.0), 0.0),
        RED,
        RenderState {
            z_test: ZTest::Always,
            blend: BlendMode::None,
            cull: CullMode::None,
            ..RenderState::default()
        },
    );
    r.draw(&mut d, &FrameContext::default());
    r.resolve();

    let fb = r.framebuffer();
    for y in 0..64u32 {
        for x in 0..64u32 {
            // Left and bottom edges own their pixels; the hypotenuse does not.
            let inside = x >= 10 && y >= 10 && x + y < 60;
            let expected = if inside { RED } else { BLACK };
            assert_eq!(fb.pixel(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn nearer_triangle_wins_regardless_of_draw_order() {
    let near = || {
        tri(
            "near",
            screen_tri64((0.0, 0.0), (0.0, 60.0), (60.0, 0.0), 0.2),
            GREEN,
            state(CullMode::None, ZTest::Less),
        )
    };
    let far = || {
        tri(
            "far",
            screen_tri64((4.0, 4.0), (4.0, 63.0), (63.0, 4.0), 0.6),
            BLUE,
            state(CullMode::None, ZTest::Less),
        )
    };
    let frame = FrameContext::default();

    for near_first in [true, false] {
        let mut r = raster(64, MsaaMode::None);
        let (mut a, mut b) = if near_first {
            (near(), far())
        } else {
            (far(), near())
        };
        r.draw(&mut a, &frame);
        r.draw(&mut b, &frame);
        r.resolve();
        assert_eq!(r.framebuffer().pixel(20, 20), Some(GREEN), "near_first={near_first}");
        // Only the far triangle reaches this corner.
        assert_eq!(r.framebuffer().pixel(5, 58), Some(BLUE));
    }
}

#[test]
fn depth_buffer_holds_screen_linear_ndc_depth() {
    let viewport = Viewport::new(64, 64).unwrap();
    let vp = perspective(0.5, 20.0, 60.0, 1.0);
    let positions = [
        Vec3::new(-1.0, -1.0, 3.0),
        Vec3::new(1.0, -1.0, 6.0),
        Vec3::new(0.0, 1.0, 4.0),
    ];
    let mut r = raster(64, MsaaMode::None);
    r.set_view_projection(vp);
    let mut d = tri("slanted", positions, RED, state(CullMode::None, ZTest::Less));
    r.draw(&mut d, &FrameContext::default());

    let sp = positions.map(|p| clip_to_screen(object_to_clip(p, &vp), viewport));
    let depths = Vec3::new(sp[0].depth(), sp[1].depth(), sp[2].depth());
    let mut checked = 0;
    for y in 0..64u32 {
        for x in 0..64u32 {
            let p = Vec2::new(x as f32, y as f32);
            let b = barycentric(p, sp[0].xy(), sp[1].xy(), sp[2].xy());
            if b.min_element() < 0.01 {
                continue;
            }
            let stored = r.framebuffer().depth(x, y).unwrap();
            assert!((stored - b.dot(depths)).abs() < 1e-5, "({x}, {y})");
            assert!(stored > -1.0 && stored < 1.0);
            checked += 1;
        }
    }
    assert!(checked > 50);
}

#[test]
fn cull_modes_follow_screen_winding() {
    let frame = FrameContext::default();
    // Counter-clockwise on screen: a back face.
    let ccw = screen_tri64((10.0, 10.0), (50.0, 10.0), (10.0, 50.0), 0.0);
    let cw = [ccw[0], ccw[2], ccw[1]];

    let mut r = raster(64, MsaaMode::None);
    r.draw(&mut tri("ccw", ccw, RED, state(CullMode::Back, ZTest::Always)), &frame);
    assert_eq!(r.stats().triangles_culled, 1);
    r.draw(&mut tri("cw", cw, RED, state(CullMode::Back, ZTest::Always)), &frame);
    assert_eq!(r.stats().triangles_rasterized, 1);
    r.draw(&mut tri("cw", cw, RED, state(CullMode::Front, ZTest::Always)), &frame);
    assert_eq!(r.stats().triangles_culled, 2);
}

#[test]
fn triangles_outside_the_frustum_are_clipped_away() {
    let mut r = raster(32, MsaaMode::None);
    let mut d = tri(
        "offscreen",
        [
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(3.0, -1.0, 0.0),
        ],
        RED,
        state(CullMode::None, ZTest::Always),
    );
    r.draw(&mut d, &FrameContext::default());
    assert_eq!(r.stats().triangles_clipped, 1);
    assert_eq!(r.stats().fragments_shaded, 0);
}

#[test]
fn near_plane_crossing_triangle_renders_finite_colors() {
    let mut r = raster(32, MsaaMode::None);
    r.set_view_projection(perspective(0.5, 50.0, 90.0, 1.0));
    let mut d = tri(
        "crossing",
        [
            Vec3::new(-2.0, -1.0, -3.0),
            Vec3::new(0.0, -1.0, 8.0),
            Vec3::new(2.0, -1.0, -3.0),
        ],
        RED,
        state(CullMode::None, ZTest::Less),
    );
    r.draw(&mut d, &FrameContext::default());
    r.resolve();
    assert!(r.stats().fragments_shaded > 0);
    assert!(r.framebuffer().resolved().iter().all(|c| c.is_finite()));
}

#[test]
fn discarded_fragments_write_nothing() {
    let mut r = raster(16, MsaaMode::None);
    let mesh = Mesh::from_parts(
        screen_tri64((0.0, 0.0), (0.0, 60.0), (60.0, 0.0), 0.0)
            .iter()
            .map(|p| Vertex::from_position(*p))
            .collect(),
        vec![0, 1, 2],
    )
    .unwrap();
    let program = ShaderProgram::new(AlphaTestShader::default())
        .with_base_color(Vec4::new(1.0, 0.0, 0.0, 0.2));
    let mut d = Drawable::new("cutout", Arc::new(mesh), program);
    r.draw(&mut d, &FrameContext::default());
    r.resolve();
    let stats = r.stats();
    assert!(stats.fragments_discarded > 0);
    assert_eq!(stats.fragments_discarded, stats.fragments_shaded);
    assert_eq!(r.framebuffer().depth(2, 2), Some(f32::INFINITY));
    assert_eq!(r.framebuffer().pixel(2, 2), Some(BLACK));
}

#[test]
fn alpha_blend_without_depth_write() {
    let mut r = raster(8, MsaaMode::None);
    let mut d = tri(
        "glass",
        [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(3.0, -1.0, 0.0),
        ],
        Vec4::new(1.0, 0.0, 0.0, 0.5),
        glass_state(),
    );
    r.draw(&mut d, &FrameContext::default());
    r.resolve();
    let c = r.framebuffer().pixel(3, 3).unwrap();
    assert!((c - Vec4::new(0.5, 0.0, 0.0, 0.75)).abs().max_element() < 1e-6);
    assert_eq!(r.framebuffer().depth(3, 3), Some(f32::INFINITY));
}

fn glass_state() -> RenderState {
    RenderState {
        queue: RenderQueue::TRANSPARENT,
        cull: CullMode::None,
        z_write: false,
        blend: BlendMode::AlphaBlend,
        ..RenderState::default()
    }
}

fn assert_uniform(r: &Rasterizer, expected: Vec4) {
    let vp = r.viewport();
    for y in 0..vp.height {
        for x in 0..vp.width {
            let c = r.framebuffer().pixel(x, y).unwrap();
            assert!((c - expected).abs().max_element() < 1e-6, "pixel ({x}, {y}) = {c}");
        }
    }
}

#[test]
fn blended_fan_blends_each_pixel_once() {
    let mut r = raster(8, MsaaMode::None);
    let mut d = tri(
        "glass",
        [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(3.0, -1.0, 0.0),
        ],
        Vec4::new(1.0, 0.0, 0.0, 0.5),
        glass_state(),
    );
    r.draw(&mut d, &FrameContext::default());
    r.resolve();

    // The clipped polygon is fanned, so the diagonal is shared by two triangles.
    assert_eq!(r.stats().triangles_rasterized, 2);
    assert_eq!(r.stats().fragments_shaded, 64);
    assert_uniform(&r, Vec4::new(0.5, 0.0, 0.0, 0.75));
}

#[test]
fn blended_quad_has_no_diagonal_seam() {
    let mut r = raster(8, MsaaMode::None);
    let program = ShaderProgram::new(UnlitShader::default())
        .with_base_color(Vec4::new(1.0, 0.0, 0.0, 0.5))
        .with_state(glass_state());
    let scale = Transform {
        scale: Vec3::new(4.0, 4.0, 1.0),
        ..Transform::default()
    };
    let mut d =
        Drawable::new("pane", primitives::quad().into_shared(), program).with_transform(scale);
    r.draw(&mut d, &FrameContext::default());
    r.resolve();

    assert_eq!(r.stats().triangles_submitted, 2);
    assert_eq!(r.stats().fragments_shaded, 64);
    assert_uniform(&r, Vec4::new(0.5, 0.0, 0.0, 0.75));
}

#[test]
fn shared_edge_samples_belong_to_one_triangle() {
    // Both halves of the screen split along x == y. Pixels on the diagonal sit exactly on the edge.
    let a = (0.0, 0.0);
    let b = (64.0, 64.0);
    let halves = [
        screen_tri64(a, (64.0, 0.0), b, 0.0),
        screen_tri64(a, b, (0.0, 64.0), 0.0),
    ];
    let mut r = raster(64, MsaaMode::None);
    for (i, half) in halves.into_iter().enumerate() {
        let mut d = tri(
            &format!("half{i}"),
            half,
            Vec4::new(0.0, 0.0, 1.0, 0.5),
            glass_state(),
        );
        r.draw(&mut d, &FrameContext::default());
    }
    r.resolve();
    assert_uniform(&r, Vec4::new(0.0, 0.0, 0.5, 0.75));
}

#[test]
fn msaa_edge_pixels_resolve_to_partial_coverage() {
    let mut r = raster(8, MsaaMode::X4);
    // Screen (0, 0), (8, 0), (0, 8): hypotenuse x + y = 8.
    let mut d = tri(
        "half",
        [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ],
        RED,
        state(CullMode::None, ZTest::Less),
    );
    r.draw(&mut d, &FrameContext::default());
    r.resolve();
    let fb = r.framebuffer();
    assert_eq!(fb.pixel(2, 2), Some(RED));
    // Two of the four rotated-grid samples fall inside.
    assert_eq!(fb.pixel(4, 4), Some(Vec4::new(0.5, 0.0, 0.0, 1.0)));
    assert_eq!(fb.pixel(6, 6), Some(BLACK));
    // Shaded once per pixel, not once per sample.
    assert!(r.stats().fragments_shaded <= 64);
}

#[test]
fn wireframe_draws_outline_only() {
    let mut r = raster(64, MsaaMode::None);
    r.set_primitive_mode(PrimitiveMode::Line);
    let mut d = tri(
        "wire",
        screen_tri64((10.0, 10.0), (50.0, 10.0), (10.0, 50.0), 0.0),
        GREEN,
        state(CullMode::Back, ZTest::Less),
    );
    r.draw(&mut d, &FrameContext::default());
    r.resolve();
    let fb = r.framebuffer();
    assert_eq!(fb.pixel(10, 10), Some(GREEN));
    assert_eq!(fb.pixel(30, 10), Some(GREEN));
    assert_eq!(fb.pixel(10, 30), Some(GREEN));
    assert_eq!(fb.pixel(30, 30), Some(GREEN));
    assert_eq!(fb.pixel(20, 20), Some(BLACK));
    assert_eq!(r.stats().fragments_shaded, 0);
}

#[test]
fn render_sorts_and_honours_debug_index() {
    let mut r = raster(16, MsaaMode::None);
    let full = [
        Vec3::new(-1.0, -1.0, 0.5),
        Vec3::new(-1.0, 3.0, 0.5),
        Vec3::new(3.0, -1.0, 0.5),
    ];
    let mut overlay_state = state(CullMode::None, ZTest::Always);
    overlay_state.queue = RenderQueue::OVERLAY;
    let mut ds = vec![
        tri("overlay", full, GREEN, overlay_state),
        tri("base", full, RED, state(CullMode::None, ZTest::Always)),
    ];
    r.set_debug_index(Some(0));
    r.render(&mut ds, &FrameContext::default());
    assert_eq!(ds[0].name, "base");
    assert_eq!(r.stats().drawables, 1);
    assert_eq!(r.framebuffer().pixel(8, 8), Some(RED));

    r.set_debug_index(None);
    r.render(&mut ds, &FrameContext::default());
    assert_eq!(r.stats().drawables, 2);
    assert_eq!(r.framebuffer().pixel(8, 8), Some(GREEN));
}

#[test]
fn resize_and_msaa_change_reallocate() {
    let mut r = raster(8, MsaaMode::None);
    r.resize(Viewport::new(16, 4).unwrap());
    assert_eq!(r.framebuffer().width(), 16);
    assert_eq!(r.framebuffer().height(), 4);
    r.set_msaa(MsaaMode::X8);
    assert_eq!(r.framebuffer().sample_count(), 8);
    assert_eq!(r.viewport(), Viewport::new(16, 4).unwrap());
}
