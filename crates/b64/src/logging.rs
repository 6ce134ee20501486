//! Console logging on stderr. Stdout is left to `--print`.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;

const PATTERN: &str = "[{h({l:<5})} {t}] {m}{n}";
const APPENDER: &str = "stderr";

pub fn init_logging(level: LevelFilter) -> anyhow::Result<()> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build(APPENDER, Box::new(stderr)))
        .build(Root::builder().appender(APPENDER).build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}
