use crate::config::{merge::Merge, types::*};
use crate::diff::ErrorPolicy;
use anyhow::{Result, anyhow};

/// Environment fallback for `diff.on_error`
pub const ON_ERROR_ENV: &str = "PGSNAP_ON_ERROR";

pub struct ConfigBuilder {
    config_input: ConfigInput,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    pub fn resolve(self) -> Result<Config> {
        let defaults = Config::default();

        Ok(Config {
            objects: self.resolve_objects(&defaults.objects),
            diff: self.resolve_diff(&defaults.diff)?,
            output: self.resolve_output(&defaults.output),
        })
    }

    fn resolve_objects(&self, defaults: &Objects) -> Objects {
        let obj_input = self.config_input.objects.as_ref();

        let include = obj_input
            .and_then(|o| o.include.as_ref())
            .map(|i| ObjectInclude {
                schemas: i.schemas.as_ref().cloned().unwrap_or_default(),
                tables: i.tables.as_ref().cloned().unwrap_or_default(),
            })
            .unwrap_or_else(|| defaults.include.clone());

        let exclude = obj_input
            .and_then(|o| o.exclude.as_ref())
            .map(|e| ObjectExclude {
                schemas: e
                    .schemas
                    .as_ref()
                    .cloned()
                    .unwrap_or_else(|| defaults.exclude.schemas.clone()),
                tables: e
                    .tables
                    .as_ref()
                    .cloned()
                    .unwrap_or_else(|| defaults.exclude.tables.clone()),
            })
            .unwrap_or_else(|| defaults.exclude.clone());

        Objects { include, exclude }
    }

    fn resolve_diff(&self, defaults: &Diff) -> Result<Diff> {
        let diff_input = self.config_input.diff.as_ref();

        let on_error = match diff_input.and_then(|d| d.on_error) {
            Some(policy) => policy,
            None => match std::env::var(ON_ERROR_ENV) {
                Ok(value) => parse_error_policy(&value)?,
                Err(_) => defaults.on_error,
            },
        };

        Ok(Diff {
            on_error,
            report_ambiguous_renames: diff_input
                .and_then(|d| d.report_ambiguous_renames)
                .unwrap_or(defaults.report_ambiguous_renames),
        })
    }

    fn resolve_output(&self, defaults: &Output) -> Output {
        Output {
            format: self
                .config_input
                .output
                .as_ref()
                .and_then(|o| o.format)
                .unwrap_or(defaults.format),
        }
    }
}

pub(crate) fn parse_error_policy(value: &str) -> Result<ErrorPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "abort" => Ok(ErrorPolicy::Abort),
        "skip" => Ok(ErrorPolicy::Skip),
        other => Err(anyhow!(
            "Invalid {} value '{}': expected 'abort' or 'skip'",
            ON_ERROR_ENV,
            other
        )),
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
