//! Command Pattern implementation for the ledit front end
//!
//! Every command typed at the prompt is a struct implementing [`Command`],
//! registered by name in [`crate::core::commands::register_all`]. The
//! dispatcher only splits off the name and looks it up; parsing the rest of
//! the line is the command's own business.

use crate::core::app::EditorApp;
use crate::core::dispatcher::DispatchResult;

/// Core command trait implementing the Command Pattern
///
/// # Parameters
/// - `app`: Mutable reference to editor state (workspace, storage, config)
/// - `args`: Everything after the command name, leading whitespace removed
///
/// # Returns
/// `DispatchResult` carrying the text to show the user, or an exit request
pub trait Command: Send + Sync + CloneCommand {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult;

    /// One-line synopsis shown by `help`
    fn usage(&self) -> &'static str;
}

/// Helper trait for cloning boxed commands
/// This trait is automatically implemented for all Command types
pub trait CloneCommand {
    /// Create a boxed clone of this command
    fn clone_box(&self) -> Box<dyn Command>;
}

impl<T> CloneCommand for T
where
    T: 'static + Command + Clone,
{
    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Box<dyn Command> {
        self.as_ref().clone_box()
    }
}
