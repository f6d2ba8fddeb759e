use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use netscape_bookmarks::options::DEFAULT_FOLDER_PATH_SEPARATOR;
use netscape_bookmarks::Options;

/// CLI defaults, overridable through `BOOKMARKS_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub separator: String,
    pub descriptions: bool,
    pub keep_bookmarklets: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("BOOKMARKS"))
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("separator", DEFAULT_FOLDER_PATH_SEPARATOR)?
            .set_default("descriptions", false)?
            .set_default("keep_bookmarklets", false)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn options(&self) -> Options {
        Options {
            folder_path_separator: self.separator.clone(),
            parse_description: self.descriptions,
            ignore_bookmarklets: !self.keep_bookmarklets,
        }
    }
}
