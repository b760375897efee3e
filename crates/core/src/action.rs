//! Task actions
//!
//! An [`Action`] is the unit of work attached to a task. Anything that can be
//! executed and may fail qualifies: plain closures get a blanket
//! implementation, and richer stateful actions such as
//! [`CommandAction`](crate::execution::CommandAction) implement the trait
//! directly.

/// A side-effecting operation run when its task is reached in an execution plan
pub trait Action {
    /// Execute the action. Any error aborts the run.
    fn execute(&self) -> anyhow::Result<()>;
}

impl<F> Action for F
where
    F: Fn() -> anyhow::Result<()>,
{
    fn execute(&self) -> anyhow::Result<()> {
        self()
    }
}
