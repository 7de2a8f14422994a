//! Gauge viewer: renders one sample scene into a window.
//!
//! `--style needle` (default) or `--style donut`, `--value N` to move the
//! needle/progress, `--font PATH` to enable text, `--title S` for the
//! window title.

use std::env;
use std::fs;
use std::time::Instant;

use pixels::{Pixels, SurfaceTexture};
use tracing::info;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use gaugekit::render::{Canvas, Renderer};
use gaugekit::{
    Color, DonutGauge, DonutGaugeInput, DonutStyle, MilestoneScale, NeedleGauge,
    NeedleGaugeInput, NeedleStyle, Scene, SectionScale,
};

fn sample_needle_scene(value: f64) -> Result<Scene, gaugekit::GaugeError> {
    let rows = vec![
        ("Milestone".to_string(), "Target".to_string()),
        ("Bronze".to_string(), "10".to_string()),
        ("Silver".to_string(), "30".to_string()),
        ("Gold".to_string(), "60".to_string()),
    ];
    let gauge = NeedleGauge::new(NeedleStyle::builder().build());
    gauge.render(&NeedleGaugeInput {
        value,
        label: "Progress".to_string(),
        current_milestone: "Silver".to_string(),
        milestones: MilestoneScale::from_rows(&rows, 0.0)?,
    })
}

fn sample_donut_scene(value: f64) -> Result<Scene, gaugekit::GaugeError> {
    let rows = vec![
        ("Section".to_string(), "Span".to_string(), "Color".to_string()),
        ("Low".to_string(), "40".to_string(), "#e74c3c".to_string()),
        ("Mid".to_string(), "35".to_string(), "#f1c40f".to_string()),
        ("High".to_string(), "25".to_string(), "#2ecc71".to_string()),
    ];
    let gauge = DonutGauge::new(DonutStyle::builder().build());
    gauge.render(&DonutGaugeInput {
        value,
        format_mode: "percent0".to_string(),
        decimal_separator: "dot".to_string(),
        sections: SectionScale::from_rows(&rows, 0.0)?,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut style = "needle".to_string();
    let mut value: Option<f64> = None;
    let mut font_path: Option<String> = None;
    let mut window_title = "Gauge".to_string();
    let mut args = env::args();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--style" => {
                if let Some(s) = args.next() {
                    style = s;
                }
            }
            "--value" => {
                if let Some(v) = args.next() {
                    if let Ok(v) = v.parse::<f64>() {
                        value = Some(v);
                    }
                }
            }
            "--font" => {
                font_path = args.next();
            }
            "--title" => {
                if let Some(t) = args.next() {
                    window_title = t;
                }
            }
            _ => {}
        }
    }

    let scene = match style.as_str() {
        "donut" => sample_donut_scene(value.unwrap_or(65.0))?,
        _ => sample_needle_scene(value.unwrap_or(45.0))?,
    };
    info!(style = %style, commands = scene.commands().len(), "scene built");

    let renderer = match font_path {
        Some(path) => Renderer::with_font(fs::read(path)?)?,
        None => Renderer::new(),
    };

    let logical_width = 640.0;
    let logical_height = 360.0;
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&window_title)
        .with_inner_size(LogicalSize::new(logical_width, logical_height))
        .with_resizable(false)
        .build(&event_loop)?;
    let window = std::sync::Arc::new(window);
    let window_clone = window.clone();

    let size = window.inner_size();
    let mut fb_width = size.width as usize;
    let mut fb_height = size.height as usize;
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

    let frame_duration = std::time::Duration::from_secs_f64(1.0 / 30.0);
    let mut last_frame = Instant::now();

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    let _ = pixels.resize_buffer(new_size.width, new_size.height);
                    let _ = pixels.resize_surface(new_size.width, new_size.height);
                }
                WindowEvent::RedrawRequested => {
                    let frame = pixels.frame_mut();
                    let mut canvas = Canvas::new(frame, fb_width, fb_height);
                    renderer.paint(&scene, &mut canvas, Color::WHITE);
                    let _ = pixels.render();
                }
                _ => {}
            },
            Event::AboutToWait => {
                if last_frame.elapsed() >= frame_duration {
                    window_clone.request_redraw();
                    last_frame = Instant::now();
                }
            }
            _ => {}
        }
    })?;

    Ok(())
}
