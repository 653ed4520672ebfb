use crate::OutputMode;
use serde_json::Value;
use telerisk_core::{canonical, ConfigError, ExitCode, MachineError};
use telerisk_ingest::LoadError;
use telerisk_query::QueryError;

pub(crate) fn emit_ok(output_mode: OutputMode, payload: Value) -> Result<(), String> {
    let text = if output_mode.json {
        String::from_utf8(canonical::stable_json_bytes(&payload).map_err(|e| e.to_string())?)
            .map_err(|e| e.to_string())?
    } else {
        serde_json::to_string_pretty(&payload).map_err(|e| e.to_string())?
    };
    println!("{text}");
    Ok(())
}

#[derive(Debug)]
pub(crate) struct CliError {
    pub(crate) exit_code: ExitCode,
    pub(crate) machine: MachineError,
}

impl CliError {
    pub(crate) fn internal(message: String) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message),
        }
    }

    pub(crate) fn usage(message: &str) -> Self {
        Self {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("usage_error", message),
        }
    }

    pub(crate) fn input(message: String) -> Self {
        Self {
            exit_code: ExitCode::Input,
            machine: MachineError::new("input_error", &message),
        }
    }

    pub(crate) fn validation(code: &str, message: &str) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            machine: MachineError::new(code, message),
        }
    }

    pub(crate) fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.machine = self.machine.with_detail(key, value);
        self
    }
}

impl From<LoadError> for CliError {
    fn from(value: LoadError) -> Self {
        match value {
            LoadError::Io(message) => Self::input(message),
            LoadError::Schema(schema) => {
                let mut err = Self::validation("schema_error", &schema.to_string());
                for (key, names) in [
                    ("missing", &schema.missing),
                    ("unexpected", &schema.unexpected),
                    ("duplicated", &schema.duplicated),
                ] {
                    if !names.is_empty() {
                        err = err.with_detail(key, &names.join(","));
                    }
                }
                err
            }
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<QueryError> for CliError {
    fn from(value: QueryError) -> Self {
        Self {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("query_error", &value.message)
                .with_detail("kind", value.code.as_str()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self {
            exit_code: ExitCode::Input,
            machine: MachineError::new("config_error", &value.to_string()),
        }
    }
}

pub(crate) fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
    }
}
