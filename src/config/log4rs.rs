use ::log4rs::append::console::{ConsoleAppender, Target};
use ::log4rs::config::{Appender, Config, Logger, Root};
use ::log4rs::encode::pattern::PatternEncoder;
use log::LevelFilter;

use crate::bridge::LAUNCH_MDC_KEY;

fn pattern() -> String {
    format!(
        "{{T}}=>threadbridge[{}]@{{d(%Y-%m-%d %H:%M:%S)}}=>{{t}}[launch {{X({})(-)}}]: {{m}}{{n}}",
        env!("CARGO_PKG_VERSION"),
        LAUNCH_MDC_KEY
    )
}

/// The console logging config.
///
/// Everything at `Info` and above goes to stdout, `app::error` also goes to stderr.
/// Lines logged by a worker carry its launch id.
pub fn config() -> Config {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(&pattern())))
        .build();
    let stdout = ConsoleAppender::builder()
        .target(Target::Stdout)
        .encoder(Box::new(PatternEncoder::new(&pattern())))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .logger(Logger::builder()
            .appender("stderr")
            .build("app::error", LevelFilter::Error))
        .build(Root::builder()
            .appender("stdout")
            .build(LevelFilter::Info))
        .expect("the console appenders are always valid")
}
