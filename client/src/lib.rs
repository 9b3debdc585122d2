use dailyflo::task::TaskId;

pub mod configuration;
pub mod form;
pub mod observability;
pub mod store;

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }
    Ok(())
}

impl std::fmt::Debug for DailyfloClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum DailyfloClientError {
    #[error("Invalid input data: {user_error}")]
    InvalidInputData { field: String, user_error: String },
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("Unauthorized access: {0}")]
    Unauthorized(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
