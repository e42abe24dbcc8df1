use crate::performance::TimeUnit;
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};
use std::{fs, path::PathBuf};

pub fn validator_is_file() -> ValueParser {
    ValueParser::from(move |s: &str| -> std::result::Result<PathBuf, String> {
        if let Ok(metadata) = fs::metadata(s) {
            if metadata.is_file() {
                return Ok(PathBuf::from(s));
            }
        }

        Err(format!("Invalid file path or file does not exist: '{s}'"))
    })
}

pub fn validator_time_unit() -> ValueParser {
    ValueParser::from(move |s: &str| -> std::result::Result<TimeUnit, String> {
        s.parse::<TimeUnit>()
            .map_err(|_| format!("Invalid time unit: '{s}', expected s, ms, us or ns"))
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("perftrack")
        .about("Time a list of steps and print a performance table ⏱")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to the configuration file")
                .default_value("perftrack.yml")
                .value_parser(validator_is_file())
                .value_name("FILE"),
        )
        .arg(
            Arg::new("title")
                .short('t')
                .long("title")
                .help("Title of the report, overrides the configuration")
                .value_name("TITLE"),
        )
        .arg(
            Arg::new("unit")
                .short('u')
                .long("unit")
                .help("Default time unit for steps: s, ms, us, ns")
                .value_parser(validator_time_unit())
                .value_name("UNIT"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase verbosity, -vv for debug")
                .action(ArgAction::Count),
        )
}
