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

//! celery-render entry point
//!
//! Renders the rotating textured cube through the fixed-point pipeline and
//! writes each frame as a binary PPM image.

use std::path::PathBuf;

use celery3d::core::gpu::{Gpu, RasterizerStats, TextureFilter};
use celery3d::scene::{CubeScene, SceneConfig};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    Nearest,
    Bilinear,
}

impl From<FilterArg> for TextureFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Nearest => TextureFilter::Nearest,
            FilterArg::Bilinear => TextureFilter::Bilinear,
        }
    }
}

/// Render the celery3d cube demo to PPM frames
#[derive(Debug, Parser)]
#[command(name = "celery-render", version, about)]
struct Args {
    /// Scene configuration file (TOML)
    #[arg(short, long, env = "CELERY_CONFIG")]
    config: Option<PathBuf>,

    /// Framebuffer width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Framebuffer height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Number of frames to render
    #[arg(short = 'n', long)]
    frames: Option<u32>,

    /// Directory for frame_NNN.ppm output
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Texture filter
    #[arg(long, value_enum)]
    filter: Option<FilterArg>,

    /// Draw with vertex colors only
    #[arg(long)]
    no_texture: bool,

    /// Write accumulated rasterizer statistics to this JSON file
    #[arg(long)]
    stats_json: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Command-line values override the configuration file
    fn apply(&self, config: &mut SceneConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(filter) = self.filter {
            config.render.texture.filter = filter.into();
        }
        if self.no_texture {
            config.render.texture.enable = false;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading scene config: {}", path.display());
            SceneConfig::load(path)?
        }
        None => SceneConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    log::info!(
        "Rendering {} frame(s) at {}x{} into {}",
        config.frames,
        config.width,
        config.height,
        config.output_dir.display()
    );

    std::fs::create_dir_all(&config.output_dir)?;

    let mut gpu = Gpu::new(config.width, config.height);
    gpu.set_texture(config.texture.build()?);

    let mut scene = CubeScene::new(config.width, config.height);
    let clear_color = config.clear_color.to_rgb565();
    let mut totals = RasterizerStats::default();

    for frame in 0..config.frames {
        gpu.clear_buffers(clear_color, config.clear_depth);
        gpu.reset_stats();

        scene.advance();
        scene.draw(&mut gpu, &config.render);

        let path = config.frame_path(frame);
        gpu.color_buffer().save_ppm(&path)?;

        let stats = gpu.stats();
        log::info!(
            "Frame {:03}: {} triangles, {} pixels drawn, {} rejected -> {}",
            frame,
            stats.triangles_submitted,
            stats.pixels_drawn,
            stats.pixels_rejected,
            path.display()
        );
        totals.accumulate(&stats);
    }

    if let Some(path) = &args.stats_json {
        let json = serde_json::to_string_pretty(&totals)?;
        std::fs::write(path, json)?;
        log::info!("Wrote statistics to {}", path.display());
    }

    log::info!(
        "Done: {} triangles, {} pixels, fragment pass rate {:.1}%",
        totals.triangles_submitted,
        totals.pixels_drawn,
        totals.pass_rate() * 100.0
    );

    Ok(())
}
