use std::cell::Cell;
use std::f32::consts::TAU;
use std::rc::Rc;

use anyhow::Result;
use easel_bridge::{BridgeConfig, ClosureHandlers, GeometryBatch, Phase};
use easel_engine::canvas::color;
use easel_engine::capture::ScreenshotHook;
use easel_engine::device::GpuInit;
use easel_engine::logging::{LoggingConfig, init_logging};
use easel_engine::{Runtime, RuntimeConfig, SketchHandle};

const ARMS: usize = 5;
const DOTS_PER_ARM: usize = 120;

/// Spiral of `ARMS * DOTS_PER_ARM` points around the canvas center.
fn spiral(cx: f32, cy: f32, radius: f32, phase: f32) -> GeometryBatch {
    let mut rows = Vec::with_capacity(ARMS * DOTS_PER_ARM);
    for arm in 0..ARMS {
        let offset = arm as f32 * TAU / ARMS as f32;
        for i in 0..DOTS_PER_ARM {
            let t = i as f32 / DOTS_PER_ARM as f32;
            let angle = offset + phase + t * TAU * 1.5;
            rows.push([cx + angle.cos() * radius * t, cy + angle.sin() * radius * t]);
        }
    }
    GeometryBatch::from_rows(&rows)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let sketch = SketchHandle::default();
    let speed = Rc::new(Cell::new(0.02_f32));
    let phase = Rc::new(Cell::new(0.0_f32));

    let handlers = ClosureHandlers::new().profile_draw();
    let hooks = handlers.hooks();
    let profiler = handlers.profiler();

    let handlers = handlers
        .settings({
            let s = sketch.clone();
            move || {
                s.size(480, 360);
                Ok(())
            }
        })
        .setup({
            let s = sketch.clone();
            move || {
                s.set_frame_rate(60.0);
                s.background(color::gray(20));
                log::info!("canvas {}x{}", s.width(), s.height());
                Ok(())
            }
        })
        .draw({
            let (s, speed, phase) = (sketch.clone(), speed.clone(), phase.clone());
            move || {
                phase.set(phase.get() + speed.get());
                s.background(color::gray(20));

                s.stroke(color::rgb(0x6A, 0xD3, 0xFF));
                s.stroke_weight(2.0);
                let (w, h) = (s.width() as f32, s.height() as f32);
                s.points(&spiral(w / 2.0, h / 2.0, h * 0.45, phase.get()))?;

                s.stroke(color::rgb(0xFF, 0xA0, 0x40));
                s.stroke_weight(1.0);
                s.line(w / 2.0, h / 2.0, s.mouse_x(), s.mouse_y());
                Ok(())
            }
        })
        .mouse_wheel({
            let speed = speed.clone();
            move |ev| {
                let next = (speed.get() + ev.count as f32 * 0.005).clamp(-0.2, 0.2);
                speed.set(next);
                log::info!("spin speed {next:.3}");
                Ok(())
            }
        })
        .on(Phase::MouseClicked, {
            let s = sketch.clone();
            move || {
                // Invert the finished frame in place through the byte interface.
                let mut bytes = s.load_and_get_pixels();
                for px in bytes.chunks_exact_mut(4) {
                    for c in &mut px[1..] {
                        *c = 255 - *c;
                    }
                }
                s.set_and_update_pixels(&bytes)?;
                s.redraw();
                Ok(())
            }
        })
        .on(Phase::KeyTyped, {
            let s = sketch.clone();
            move || {
                match s.key() {
                    Some(' ') if s.is_looping() => s.no_loop(),
                    Some(' ') => s.resume_loop(),
                    Some('s') => {
                        // Save once, right after the next frame is drawn.
                        ScreenshotHook::attach(&hooks, &s, "easel-#####.png");
                        s.redraw();
                    }
                    Some('r') => {
                        if let Some(rec) = s.end_record() {
                            log::info!("recorded {} geometry calls", rec.len());
                        } else {
                            s.begin_record();
                        }
                    }
                    Some('q') => s.exit(),
                    _ => {}
                }
                Ok(())
            }
        })
        .exiting({
            let s = sketch.clone();
            move || {
                log::info!("exiting after {} frames ({:.1} fps)", s.frame_count(), s.frame_rate());
                profiler.log_stats();
                Ok(())
            }
        });

    let config = RuntimeConfig {
        title: "Easel Studio".to_string(),
        ..RuntimeConfig::default()
    };
    let gpu = GpuInit {
        present_mode: wgpu::PresentMode::AutoVsync,
        ..GpuInit::default()
    };

    let end = Runtime::run(config, gpu, BridgeConfig::default(), sketch, handlers)?;
    if end.dead_from_error {
        log::warn!("sketch stopped after a handler error ({} frames)", end.frame_count);
    }
    if let Some(report) = &end.teardown {
        for fault in report.faults() {
            log::warn!("teardown: {fault}");
        }
    }
    Ok(())
}
