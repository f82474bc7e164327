use std::time::Duration;

use snakeboy_core::DEFAULT_TICK_MS;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tick_ms = match args.next() {
        Some(arg) => match arg.parse::<u64>() {
            Ok(ms) if ms > 0 => ms,
            _ => {
                eprintln!("Usage: snakeboy [tick-interval-ms]");
                std::process::exit(1);
            }
        },
        None => DEFAULT_TICK_MS,
    };

    log::info!("Starting snake with a {tick_ms} ms tick");
    snakeboy::run(Duration::from_millis(tick_ms)).unwrap();
}
