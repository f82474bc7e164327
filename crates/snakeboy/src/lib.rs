use std::time::Duration;

use anyhow::Result;
use snakeboy_core::SnakeApp;
use snakeboy_sdl2::{App, SdlContext, SdlInitInfo};

/// Build the game app and hand it to the SDL2 frontend.
///
/// One frontend frame is one game tick, so `tick_interval` sets both the
/// input polling and the movement cadence.
pub fn run(tick_interval: Duration) -> Result<()> {
    let app = SnakeApp::default();
    let width = app.width();
    let height = app.height();
    let scale = app.scale();
    let title = app.title();
    let init_info = SdlInitInfo::builder()
        .width(width)
        .height(height)
        .scale(scale)
        .title(title)
        .frame_interval(tick_interval)
        .build();
    SdlContext::run(init_info, app)?;
    Ok(())
}
