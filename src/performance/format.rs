use std::{env, fmt::Debug};

/// Formats the integer column of the report.
pub trait IntegerFormat: Debug {
    fn format(&self, value: u128) -> String;
}

impl<F: IntegerFormat + ?Sized> IntegerFormat for Box<F> {
    fn format(&self, value: u128) -> String {
        (**self).format(value)
    }
}

/// Inserts a separator every three digits, counting from the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grouped {
    separator: char,
}

impl Grouped {
    #[must_use]
    pub const fn new(separator: char) -> Self {
        Self { separator }
    }

    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }
}

impl Default for Grouped {
    fn default() -> Self {
        Self::new(',')
    }
}

impl IntegerFormat for Grouped {
    fn format(&self, value: u128) -> String {
        let digits = value.to_string();
        let len = digits.len();

        let mut grouped = String::with_capacity(len + len / 3);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                grouped.push(self.separator);
            }
            grouped.push(digit);
        }

        grouped
    }
}

/// Digits only, the way the `C` locale prints integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plain;

impl IntegerFormat for Plain {
    fn format(&self, value: u128) -> String {
        value.to_string()
    }
}

/// Picks the format of the host locale (`LC_ALL`, `LC_NUMERIC`, then `LANG`).
#[must_use]
pub fn from_env() -> Box<dyn IntegerFormat + Send + Sync> {
    let locale = ["LC_ALL", "LC_NUMERIC", "LANG"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty());

    match locale {
        Some(locale) => for_locale(&locale),
        None => Box::new(Plain),
    }
}

/// Maps a locale name such as `de_DE.UTF-8` to its thousands separator.
#[must_use]
pub fn for_locale(locale: &str) -> Box<dyn IntegerFormat + Send + Sync> {
    let language = locale
        .split(['_', '.', '@', '-'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match language.as_str() {
        "" | "c" | "posix" => Box::new(Plain),
        "de" | "es" | "it" | "nl" | "pt" | "da" | "id" | "tr" => Box::new(Grouped::new('.')),
        "fr" | "ru" | "pl" | "cs" | "sv" | "fi" | "nb" | "uk" => Box::new(Grouped::new(' ')),
        _ => Box::new(Grouped::default()),
    }
}
