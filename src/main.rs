mod config;
mod demo;
mod error;
mod fonts;
mod gfx;
mod greetings;
mod layout;
mod list;
mod page;
mod rectangle_brush;
mod render;
mod text;
mod theme;
mod unit;

use config::Config;
use demo::Demo;
use gfx::Gfx;
use std::{path::Path, sync::Arc, time::Instant};
use theme::Theme;
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key, ModifiersState},
    window::WindowBuilder,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run()?;
    Ok(())
}

fn run() -> error::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {}", path);
            Config::load(Path::new(&path))?
        }
        None => Config::default(),
    };

    let theme = Theme::new(fonts::load(&config)?)?;

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .build(&event_loop)?,
    );

    let mut gfx = Gfx::new(window.clone(), theme.fonts.glyph_fonts())?;
    let mut demo = Demo::new(&config, theme, window.inner_size(), window.scale_factor());

    window.request_redraw();

    let mut modifiers = ModifiersState::empty();
    let mut last_frame = Instant::now();
    event_loop.run(move |event, target| {
        let event = match event {
            Event::WindowEvent { event, .. } => event,
            _ => return,
        };

        match event {
            WindowEvent::CloseRequested => target.exit(),

            WindowEvent::ModifiersChanged(new_modifiers) => modifiers = new_modifiers.state(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                let quit = modifiers.super_key()
                    && matches!(&logical_key, Key::Character(c) if c.as_str() == "q");
                if quit {
                    target.exit();
                } else if demo.handle_key(&logical_key) {
                    window.request_redraw();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                demo.handle_mouse_wheel(delta);
                window.request_redraw();
            }

            WindowEvent::Resized(new_size) => {
                gfx.resize(new_size);
                demo.update_size(new_size);
                window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                demo.update_scale_factor(scale_factor);
                window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let dt = last_frame.elapsed();
                last_frame = Instant::now();
                log::trace!("redraw {:.2} ms after the last frame", dt.as_secs_f32() * 1000.0);

                if let Err(err) = gfx.render(&mut demo) {
                    log::error!("{}", err);
                    target.exit();
                }
            }

            _ => {}
        }
    })?;

    Ok(())
}
