// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scenario tests driving `Gpu::rasterize_triangle` end to end

use super::{vertex, BLUE, RED, WHITE};
use crate::core::fixed::Fixed;
use crate::core::gpu::render::blend::blend_rgba;
use crate::core::gpu::render::setup::TriangleSetup;
use crate::core::gpu::{
    AlphaSource, BlendFactor, BlendState, DepthFunc, DrawCommand, Gpu, RenderConfig, Rgba8,
    TextureFilter, TextureFormat, Vertex,
};
use crate::core::memory::TextureMemory;

const RED_565: u16 = 0xF800;
const BLUE_565: u16 = 0x001F;

fn no_depth() -> RenderConfig {
    let mut config = RenderConfig::default();
    config.depth.test_enable = false;
    config
}

// ============================================================================
// Coverage
// ============================================================================

#[test]
fn test_quad_shared_edge_covers_each_pixel_once() {
    // Convex quad split along the a-c diagonal
    let a = vertex(3, 1, WHITE, 0.0);
    let b = vertex(14, 4, WHITE, 0.0);
    let c = vertex(12, 13, WHITE, 0.0);
    let d = vertex(2, 10, WHITE, 0.0);
    let corners = [(3.0, 1.0), (14.0, 4.0), (12.0, 13.0), (2.0, 10.0)];

    let t1 = TriangleSetup::new(&a, &b, &c, 16, 16);
    let t2 = TriangleSetup::new(&a, &c, &d, 16, 16);

    for y in 0..16 {
        for x in 0..16 {
            let count = t1.covers(x, y) as u32 + t2.covers(x, y) as u32;
            assert!(count <= 1, "pixel ({}, {}) covered twice", x, y);

            let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
            let strictly_inside = (0..4).all(|i| {
                let (x0, y0) = corners[i];
                let (x1, y1) = corners[(i + 1) % 4];
                (x1 - x0) * (py - y0) - (y1 - y0) * (px - x0) > 0.0
            });
            if strictly_inside {
                assert_eq!(count, 1, "pixel ({}, {}) missed", x, y);
            }
        }
    }

    // Same through the full pipeline: additive blending would expose overdraw
    let mut gpu = Gpu::new(16, 16);
    let mut config = no_depth();
    config.blend = BlendState {
        enable: true,
        src_factor: BlendFactor::One,
        dst_factor: BlendFactor::One,
        ..BlendState::default()
    };
    gpu.draw_indexed_triangles(&[a, b, c, d], &[0, 1, 2, 0, 2, 3], &config);

    let expected: u64 = (0..16)
        .flat_map(|y| (0..16).map(move |x| (x, y)))
        .filter(|&(x, y)| t1.covers(x, y) || t2.covers(x, y))
        .count() as u64;
    assert_eq!(gpu.stats().pixels_drawn, expected);
}

#[test]
fn test_subpixel_diagonal_split_leaves_no_gap() {
    // Square just over 5 pixels wide, split along its main diagonal. The
    // odd raw coordinates put every diagonal pixel center on a half ulp.
    let far = Fixed::from_raw(0x5_0001);
    let a = Vertex::new(Fixed::ZERO, Fixed::ZERO);
    let b = Vertex::new(far, far);
    let c = Vertex::new(Fixed::ZERO, far);
    let d = Vertex::new(far, Fixed::ZERO);

    let t1 = TriangleSetup::new(&a, &b, &c, 8, 8);
    let t2 = TriangleSetup::new(&b, &a, &d, 8, 8);

    for y in 0..8 {
        for x in 0..8 {
            let count = t1.covers(x, y) as u32 + t2.covers(x, y) as u32;
            let expected = u32::from(x < 5 && y < 5);
            assert_eq!(count, expected, "pixel ({}, {}) covered {} times", x, y, count);
        }
    }

    let mut gpu = Gpu::new(8, 8);
    gpu.draw_triangles(&[a, b, c, b, a, d], &no_depth());
    assert_eq!(gpu.stats().pixels_drawn, 25);
    for i in 0..5 {
        assert_eq!(gpu.read_pixel(i, i), 0xFFFF, "diagonal pixel ({}, {})", i, i);
    }
}

#[test]
fn test_axis_aligned_quad_fills_rectangle() {
    let mut gpu = Gpu::new(16, 16);
    let quad = [
        vertex(2, 2, RED, 0.5),
        vertex(10, 2, RED, 0.5),
        vertex(10, 6, RED, 0.5),
        vertex(2, 6, RED, 0.5),
    ];
    gpu.draw_indexed_triangles(&quad, &[0, 1, 2, 0, 2, 3], &RenderConfig::default());

    for y in 0..16 {
        for x in 0..16 {
            let inside = (2..10).contains(&x) && (2..6).contains(&y);
            let expected = if inside { RED_565 } else { 0 };
            assert_eq!(gpu.read_pixel(x, y), expected, "pixel ({}, {})", x, y);
        }
    }
    assert_eq!(gpu.stats().pixels_drawn, 32);
}

#[test]
fn test_degenerate_triangle_is_culled() {
    let mut gpu = Gpu::new(16, 16);
    let v = vertex(4, 4, RED, 0.5);
    gpu.rasterize_triangle(&v, &vertex(8, 8, RED, 0.5), &vertex(12, 12, RED, 0.5), &RenderConfig::default());

    let stats = gpu.stats();
    assert_eq!(stats.triangles_submitted, 1);
    assert_eq!(stats.triangles_culled, 1);
    assert_eq!(stats.pixels_drawn, 0);
    assert!(gpu.color_buffer().pixels().iter().all(|&p| p == 0));
}

#[test]
fn test_offscreen_parts_are_dropped_not_clamped() {
    let mut gpu = Gpu::new(16, 16);
    let v0 = vertex(4, -6, RED, 0.5);
    let v1 = vertex(24, 8, RED, 0.5);
    let v2 = vertex(-4, 20, RED, 0.5);
    gpu.rasterize_triangle(&v0, &v1, &v2, &no_depth());

    // Every stored pixel matches direct coverage, including the last column
    // and row, which would be smeared by clamping
    let setup = TriangleSetup::new(&v0, &v1, &v2, 16, 16);
    let mut covered = 0;
    for y in 0..16 {
        for x in 0..16 {
            let expected = if setup.covers(x, y) { RED_565 } else { 0 };
            assert_eq!(gpu.read_pixel(x, y), expected, "pixel ({}, {})", x, y);
            covered += setup.covers(x, y) as u64;
        }
    }
    assert_eq!(gpu.stats().pixels_drawn, covered);
    // The triangle crosses the last column rather than filling it
    assert!((0..16).any(|y| setup.covers(15, y)));
    assert!((0..16).any(|y| !setup.covers(15, y)));
}

#[test]
fn test_entirely_offscreen_triangle_draws_nothing() {
    let mut gpu = Gpu::new(16, 16);
    gpu.rasterize_triangle(
        &vertex(20, 20, RED, 0.5),
        &vertex(30, 20, RED, 0.5),
        &vertex(20, 30, RED, 0.5),
        &RenderConfig::default(),
    );
    assert_eq!(gpu.stats().pixels_drawn, 0);
    assert_eq!(gpu.stats().triangles_culled, 0);
}

// ============================================================================
// Depth
// ============================================================================

fn overlapping_pair() -> ([Vertex; 3], [Vertex; 3]) {
    let front = [
        vertex(0, 0, RED, 0.3),
        vertex(12, 0, RED, 0.3),
        vertex(0, 12, RED, 0.3),
    ];
    let back = [
        vertex(4, 4, BLUE, 0.7),
        vertex(16, 4, BLUE, 0.7),
        vertex(4, 16, BLUE, 0.7),
    ];
    (front, back)
}

#[test]
fn test_depth_less_keeps_front_triangle() {
    let (front, back) = overlapping_pair();
    let config = RenderConfig::default();

    for order in [[&back, &front], [&front, &back]] {
        let mut gpu = Gpu::new(16, 16);
        for tri in order {
            gpu.rasterize_triangle(&tri[0], &tri[1], &tri[2], &config);
        }
        // (5, 5) lies in both triangles
        assert_eq!(gpu.read_pixel(5, 5), RED_565);
        assert_eq!(gpu.read_depth(5, 5), Fixed::from_f32(0.3).raw() as u16);
        // Back-only pixel
        assert_eq!(gpu.read_pixel(7, 7), BLUE_565);
        // Front-only pixel
        assert_eq!(gpu.read_pixel(1, 1), RED_565);
    }
}

#[test]
fn test_depth_disabled_is_painters_order() {
    let (front, back) = overlapping_pair();
    let config = no_depth();

    let mut gpu = Gpu::new(16, 16);
    gpu.rasterize_triangle(&front[0], &front[1], &front[2], &config);
    gpu.rasterize_triangle(&back[0], &back[1], &back[2], &config);
    assert_eq!(gpu.read_pixel(5, 5), BLUE_565);
    // Depth buffer untouched
    assert_eq!(gpu.read_depth(5, 5), 0xFFFF);
}

#[test]
fn test_depth_rejections_are_counted() {
    let (front, back) = overlapping_pair();
    let config = RenderConfig::default();

    let mut gpu = Gpu::new(16, 16);
    gpu.rasterize_triangle(&front[0], &front[1], &front[2], &config);
    let front_pixels = gpu.stats().pixels_drawn;
    gpu.rasterize_triangle(&back[0], &back[1], &back[2], &config);

    let stats = gpu.stats();
    assert!(stats.pixels_rejected > 0);
    assert_eq!(stats.triangles_submitted, 2);
    assert!(stats.pixels_drawn > front_pixels);
}

#[test]
fn test_depth_func_never_and_write_disable() {
    let (front, _) = overlapping_pair();
    let mut config = RenderConfig::default();

    config.depth.func = DepthFunc::Never;
    let mut gpu = Gpu::new(16, 16);
    gpu.rasterize_triangle(&front[0], &front[1], &front[2], &config);
    assert_eq!(gpu.stats().pixels_drawn, 0);

    config.depth.func = DepthFunc::Always;
    config.depth.write_enable = false;
    gpu.rasterize_triangle(&front[0], &front[1], &front[2], &config);
    assert_eq!(gpu.read_pixel(1, 1), RED_565);
    assert_eq!(gpu.read_depth(1, 1), 0xFFFF);
}

// ============================================================================
// Blending
// ============================================================================

#[test]
fn test_half_alpha_red_over_blue() {
    let state = BlendState {
        enable: true,
        src_factor: BlendFactor::SrcAlpha,
        dst_factor: BlendFactor::OneMinusSrcAlpha,
        alpha_source: AlphaSource::Constant,
        constant_alpha: 128,
    };
    let mixed = blend_rgba(&state, Rgba8::new(255, 0, 0, 128), Rgba8::new(0, 0, 255, 255));
    assert!((mixed.r as i32 - 128).abs() <= 1, "red = {}", mixed.r);
    assert!((mixed.b as i32 - 128).abs() <= 1, "blue = {}", mixed.b);
    assert_eq!(mixed.g, 0);

    // End to end the same mix lands in the buffer packed to RGB565
    let mut gpu = Gpu::new(16, 16);
    gpu.clear_color(BLUE_565);
    let mut config = no_depth();
    config.blend = state;
    gpu.rasterize_triangle(
        &vertex(0, 0, RED, 0.0),
        &vertex(16, 0, RED, 0.0),
        &vertex(0, 16, RED, 0.0),
        &config,
    );
    assert_eq!(gpu.read_pixel(2, 2), mixed.to_rgb565());
}

#[test]
fn test_vertex_alpha_blending() {
    let mut gpu = Gpu::new(16, 16);
    gpu.clear_color(0xFFFF);
    let config = RenderConfig::alpha_blended();
    let clear = |x: i32, y: i32| {
        Vertex::new(Fixed::from_int(x), Fixed::from_int(y))
            .with_color(Fixed::ZERO, Fixed::ZERO, Fixed::ZERO, Fixed::ZERO)
    };
    gpu.rasterize_triangle(&clear(0, 0), &clear(16, 0), &clear(0, 16), &config);
    // Fully transparent black leaves white untouched
    assert_eq!(gpu.read_pixel(1, 1), 0xFFFF);
}

// ============================================================================
// Texturing
// ============================================================================

fn textured_quad() -> [Vertex; 4] {
    let corner = |x: i32, y: i32, u: f32, v: f32| {
        Vertex::new(Fixed::from_int(x), Fixed::from_int(y)).with_uv(Fixed::from_f32(u), Fixed::from_f32(v))
    };
    [
        corner(0, 0, 0.0, 0.0),
        corner(8, 0, 1.0, 0.0),
        corner(8, 8, 1.0, 1.0),
        corner(0, 8, 0.0, 1.0),
    ]
}

#[test]
fn test_checkerboard_texture_nearest() {
    let mut gpu = Gpu::new(8, 8);
    gpu.set_texture(TextureMemory::checkerboard(2, 1, 0xFFFF, 0x0000).unwrap());

    let mut config = no_depth();
    config.texture.enable = true;
    config.texture.modulate = false;
    gpu.draw_indexed_triangles(&textured_quad(), &[0, 1, 2, 0, 2, 3], &config);

    assert_eq!(gpu.read_pixel(1, 1), 0xFFFF);
    assert_eq!(gpu.read_pixel(5, 1), 0x0000);
    assert_eq!(gpu.read_pixel(1, 5), 0x0000);
    assert_eq!(gpu.read_pixel(5, 5), 0xFFFF);
}

#[test]
fn test_uniform_texture_bilinear_modulated_by_white() {
    let mut gpu = Gpu::new(8, 8);
    gpu.load_texture(4, 4, &[0x07E0; 16], TextureFormat::Rgb565).unwrap();

    let mut config = no_depth();
    config.texture.enable = true;
    config.texture.filter = TextureFilter::Bilinear;
    config.texture.modulate = false;
    gpu.draw_indexed_triangles(&textured_quad(), &[0, 1, 2, 0, 2, 3], &config);

    assert!(gpu.color_buffer().pixels().iter().all(|&p| p == 0x07E0));
}

#[test]
fn test_texture_alpha_source_without_texture_is_opaque() {
    let mut gpu = Gpu::new(8, 8);
    gpu.clear_color(BLUE_565);
    let mut config = no_depth();
    config.blend = BlendState {
        enable: true,
        src_factor: BlendFactor::SrcAlpha,
        dst_factor: BlendFactor::OneMinusSrcAlpha,
        alpha_source: AlphaSource::Texture,
        constant_alpha: 0,
    };
    gpu.rasterize_triangle(
        &vertex(0, 0, RED, 0.0),
        &vertex(8, 0, RED, 0.0),
        &vertex(0, 8, RED, 0.0),
        &config,
    );
    // Alpha 255: (255*255 + 128) >> 8 = 254 red, (255*0 + 128) >> 8 = 0 blue
    assert_eq!(gpu.read_pixel(1, 1), RED_565);
}

// ============================================================================
// Command submission
// ============================================================================

#[test]
fn test_indexed_draw_skips_bad_indices() {
    let mut gpu = Gpu::new(16, 16);
    let verts = [vertex(0, 0, RED, 0.5), vertex(8, 0, RED, 0.5), vertex(0, 8, RED, 0.5)];
    gpu.draw_indexed_triangles(&verts, &[0, 1, 2, 0, 1, 9], &RenderConfig::default());
    assert_eq!(gpu.stats().triangles_submitted, 1);
    assert!(gpu.stats().pixels_drawn > 0);
}

#[test]
fn test_submit_commands_in_order() {
    let (front, back) = overlapping_pair();
    let config = no_depth();
    let commands = [
        DrawCommand::new(back[0], back[1], back[2], config),
        DrawCommand::new(front[0], front[1], front[2], config),
    ];

    let mut gpu = Gpu::new(16, 16);
    gpu.submit_all(&commands);
    assert_eq!(gpu.read_pixel(5, 5), RED_565);
    assert_eq!(gpu.stats().triangles_submitted, 2);
}

#[test]
fn test_triangle_list_ignores_trailing_vertices() {
    let mut gpu = Gpu::new(16, 16);
    let verts = [
        vertex(0, 0, RED, 0.5),
        vertex(8, 0, RED, 0.5),
        vertex(0, 8, RED, 0.5),
        vertex(9, 9, RED, 0.5),
    ];
    gpu.draw_triangles(&verts, &RenderConfig::default());
    assert_eq!(gpu.stats().triangles_submitted, 1);
}

#[test]
fn test_reset_clears_buffers_and_stats() {
    let (front, _) = overlapping_pair();
    let mut gpu = Gpu::new(16, 16);
    gpu.rasterize_triangle(&front[0], &front[1], &front[2], &RenderConfig::default());
    gpu.reset();
    assert_eq!(gpu.stats().pixels_drawn, 0);
    assert_eq!(gpu.read_pixel(1, 1), 0);
    assert_eq!(gpu.read_depth(1, 1), 0xFFFF);
}
