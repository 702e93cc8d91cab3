//! Operator-facing capabilities: choosing an action and hearing about results.

use async_trait::async_trait;

use crate::action::FixActionType;
use crate::registry::FixOption;

/// Presents one finding and waits for the operator's pick.
///
/// The orchestrator awaits each call before touching the next finding, so
/// implementations never see two prompts at once.
#[async_trait]
pub trait ChoicePresenter: Send {
    /// `None` means the operator declined to choose.
    async fn present_choice(
        &mut self,
        prompt: &str,
        options: &[FixOption],
    ) -> Option<FixActionType>;
}

/// Channel for per-finding progress and failure messages.
pub trait Diagnostics: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Declines every prompt. Used for non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAll;

#[async_trait]
impl ChoicePresenter for DeclineAll {
    async fn present_choice(
        &mut self,
        _prompt: &str,
        _options: &[FixOption],
    ) -> Option<FixActionType> {
        None
    }
}
