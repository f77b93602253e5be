/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn terminal_io_failure_converts_and_displays() {
        let err = AppError::from(io::Error::new(io::ErrorKind::BrokenPipe, "tty closed"));
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: tty closed");
    }
}
