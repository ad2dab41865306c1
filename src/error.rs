use crate::color::PaletteError;
use crate::io::ingest::DatasetError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Input and schema problems exit with 2; an empty cleaned dataset exits with 3.
impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        let exit_code = match err {
            DatasetError::NoValidRows => 3,
            _ => 2,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl From<PaletteError> for AppError {
    fn from(err: PaletteError) -> Self {
        AppError::new(2, err.to_string())
    }
}
