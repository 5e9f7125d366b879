use fern::colors::{Color as TermColor, ColoredLevelConfig};
use log::{LevelFilter, SetLoggerError};

/// Install a stdout logger with coloured levels and a wall-clock timestamp.
///
/// Fails if another logger has already been installed.
pub fn setup_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    let colors_line = ColoredLevelConfig::new()
        .error(TermColor::Red)
        .warn(TermColor::Yellow)
        .info(TermColor::White)
        .debug(TermColor::White)
        .trace(TermColor::BrightBlack);

    let colors_level = colors_line
        .info(TermColor::Green)
        .debug(TermColor::Blue);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{time} {level} {target}] {color_line}{message}\x1B[0m",
                time = chrono::offset::Local::now().format("%H:%M:%S%.3f"),
                level = colors_level.color(record.level()),
                target = record.target(),
                color_line = format_args!("\x1B[{}m", colors_line.get_color(&record.level()).to_fg_str()),
                message = message,
            ));
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
}
