use crate::{cli::actions::Action, performance::TimeUnit};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let config = matches
        .get_one::<PathBuf>("config")
        .context("missing configuration file")?
        .to_path_buf();

    let title = matches.get_one::<String>("title").cloned();

    let unit = matches.get_one::<TimeUnit>("unit").copied();

    Ok(Action::Run {
        config,
        title,
        unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use std::io::Write;

    #[test]
    fn test_handler() -> Result<()> {
        let mut tmp_file = tempfile::NamedTempFile::new()?;
        tmp_file.write_all(b"steps: []\n")?;
        let path = tmp_file.path().to_str().context("invalid path")?;

        let matches =
            commands::new().try_get_matches_from(["perftrack", "-c", path, "-u", "ns"])?;

        let Action::Run {
            config,
            title,
            unit,
        } = handler(&matches)?;

        assert_eq!(config, tmp_file.path());
        assert_eq!(title, None);
        assert_eq!(unit, Some(TimeUnit::Nanoseconds));

        Ok(())
    }
}
