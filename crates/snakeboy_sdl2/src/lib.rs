use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use typed_builder::TypedBuilder;

pub use sdl2;
pub use snakeboy_common;
pub use snakeboy_common::App;

use snakeboy_common::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    RGB24,
}

#[derive(TypedBuilder)]
pub struct SdlInitInfo {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub title: String,
    #[builder(default = PixelFormat::RGB24)]
    pub pixel_format: PixelFormat,
    /// Fixed pacing interval for the poll/update/present loop. One frame
    /// is one `App::update` call, so this doubles as the game tick rate.
    #[builder(default = Duration::from_micros(16_667))]
    pub frame_interval: Duration,
}

pub struct SdlContext;

impl SdlContext {
    pub fn run(sdl_init_info: SdlInitInfo, mut app: impl App) -> Result<()> {
        let SdlInitInfo {
            width,
            height,
            scale,
            title,
            pixel_format,
            frame_interval,
        } = sdl_init_info;

        log::debug!(
            "Opening {}x{} window ({}x{} logical, scale {scale})",
            width * scale,
            height * scale,
            width,
            height
        );

        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
        let window = video_subsystem
            .window(&title, width * scale, height * scale)
            .position_centered()
            .build()?;

        let mut canvas = window.into_canvas().build()?;
        canvas
            .set_scale(scale as f32, scale as f32)
            .map_err(|e| anyhow!(e))?;

        let texture_creator = canvas.texture_creator();
        let sdl_pixel_format = map_pixel_format(pixel_format);
        let mut texture =
            texture_creator.create_texture_streaming(sdl_pixel_format, width, height)?;

        let color_size = map_pixel_format_size(pixel_format);
        let mut screen_state = vec![0u8; (width * color_size * height) as usize];

        app.init();
        let mut event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;

        let mut current_title = title;
        let mut last_frame = Instant::now();

        loop {
            if app.should_exit() {
                app.exit();
                break;
            }

            for event in event_pump.poll_iter() {
                match event {
                    Event::Quit { .. } => {
                        app.exit();
                        return Ok(());
                    }
                    Event::KeyDown {
                        keycode: Some(keycode),
                        repeat: false,
                        ..
                    } => {
                        let key = map_keycode(keycode);
                        app.handle_key_event(key, true);
                    }
                    Event::KeyUp {
                        keycode: Some(keycode),
                        ..
                    } => {
                        let key = map_keycode(keycode);
                        app.handle_key_event(key, false);
                    }
                    _ => {}
                }
            }

            app.update(&mut screen_state);

            texture.update(None, &screen_state, (width * color_size) as usize)?;
            canvas.clear();
            canvas.copy(&texture, None, None).map_err(|e| anyhow!(e))?;
            canvas.present();

            // The game surfaces score and game-over text through the
            // window caption, so refresh it whenever it changes.
            let next_title = app.title();
            if next_title != current_title {
                canvas.window_mut().set_title(&next_title)?;
                current_title = next_title;
            }

            // Sleep out the remainder of the fixed frame interval.
            let elapsed = last_frame.elapsed();
            if elapsed < frame_interval {
                std::thread::sleep(frame_interval - elapsed);
            }
            last_frame = Instant::now();
        }

        Ok(())
    }
}

pub fn map_pixel_format(pixel_format: PixelFormat) -> PixelFormatEnum {
    match pixel_format {
        PixelFormat::RGB24 => PixelFormatEnum::RGB24,
    }
}

pub fn map_pixel_format_size(pixel_format: PixelFormat) -> u32 {
    match pixel_format {
        PixelFormat::RGB24 => 3,
    }
}

pub fn map_keycode(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Return => Key::Return,
        Keycode::Escape => Key::Escape,
        _ => Key::None,
    }
}
