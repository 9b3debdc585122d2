use async_trait::async_trait;

use super::RecurringSaveChoice;

pub static RECURRING_UPDATE_TITLE: &str = "Update recurring task";
pub static RECURRING_UPDATE_MESSAGE: &str =
    "Do you want to update this occurrence only, or all future occurrences?";
pub static RECURRING_UPDATE_OPTIONS: [&str; 3] =
    ["This occurrence only", "All occurrences", "Cancel"];

/// Seam for the three-option modal dialog shown when saving a recurring
/// task. The UI supplies the real implementation; tests supply a canned one.
#[async_trait]
pub trait ConfirmationPrompt {
    async fn choose_recurring_update(
        &self,
        title: &str,
        message: &str,
        options: &[&str; 3],
    ) -> RecurringSaveChoice;
}
