use std::fs;
use std::path::Path;

use config::Config;
use config::ConfigError as ExternalConfigError;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
    #[error("Failed to read pyproject.toml")]
    PyprojectIo(#[from] std::io::Error),
    #[error("Failed to parse pyproject.toml TOML")]
    PyprojectParse(#[from] toml::de::Error),
    #[error("Failed to serialize extracted pyproject data")]
    PyprojectSerialize(#[from] toml::ser::Error),
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct Settings {
    pub debug: bool,
    /// Language ids the server answers requests for.
    pub document_types: Vec<String>,
    /// Advertise and answer range formatting requests.
    pub format_on_range: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            document_types: vec![
                "django-html".to_string(),
                "htmldjango".to_string(),
                "html".to_string(),
            ],
            format_on_range: true,
        }
    }
}

impl Settings {
    /// Load settings for a project, layering (lowest first) the user config,
    /// `[tool.djt]` in `pyproject.toml`, `.djt.toml` and `djt.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be read or parsed, or the
    /// merged values do not deserialize into [`Settings`].
    pub fn new(project_root: &Path) -> Result<Self, ConfigError> {
        let user_config_file =
            ProjectDirs::from("", "", "djt").map(|dirs| dirs.config_dir().join("djt.toml"));

        Self::load_from_paths(project_root, user_config_file.as_deref())
    }

    fn load_from_paths(
        project_root: &Path,
        user_config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let pyproject_path = project_root.join("pyproject.toml");
        if pyproject_path.exists() {
            let content = fs::read_to_string(&pyproject_path)?;
            let pyproject: toml::Value = toml::from_str(&content)?;

            let table = ["tool", "djt"]
                .iter()
                .try_fold(&pyproject, |value, &key| value.get(key))
                .and_then(toml::Value::as_table);

            if let Some(table) = table {
                let serialized = toml::to_string(table)?;
                builder = builder.add_source(File::from_str(&serialized, FileFormat::Toml));
            }
        }

        for name in [".djt.toml", "djt.toml"] {
            builder = builder.add_source(
                File::from(project_root.join(name))
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let settings = builder.build()?.try_deserialize()?;
        tracing::debug!(?settings, root = %project_root.display(), "loaded settings");
        Ok(settings)
    }

    /// Like [`Settings::new`], but a broken config yields the defaults.
    #[must_use]
    pub fn load_or_default(project_root: &Path) -> Self {
        Self::new(project_root).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load settings, using defaults");
            Self::default()
        })
    }

    /// Whether documents with this language id are handled.
    #[must_use]
    pub fn applies_to(&self, language_id: &str) -> bool {
        self.document_types.iter().any(|id| id == language_id)
    }
}
