use std::process::ExitCode;

/// Outcome of a command: a status plus an optional closing message.
#[derive(Debug)]
pub struct Exit {
    status: Status,
    message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Error,
}

impl Exit {
    pub fn success() -> Self {
        Self {
            status: Status::Success,
            message: None,
        }
    }

    /// The command ran, but what it checked failed.
    pub fn error() -> Self {
        Self {
            status: Status::Error,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Print the message (unless `quiet`) and map the status to an exit code.
    pub fn report(self, quiet: bool) -> ExitCode {
        if let Some(message) = self.message.filter(|_| !quiet) {
            match self.status {
                Status::Success => println!("{message}"),
                Status::Error => eprintln!("{message}"),
            }
        }

        match self.status {
            Status::Success => ExitCode::SUCCESS,
            Status::Error => ExitCode::FAILURE,
        }
    }
}
