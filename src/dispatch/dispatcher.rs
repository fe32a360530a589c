use crate::adapter::capability::{ArgValue, Verb};
use crate::adapter::registry::adapter_for;
use crate::script::error::ReplayError;
use crate::tree::tree_model::{ElementHandle, UiDriver};

/// Validates arguments against the adapter's declared shape, invokes the
/// matching primitive, then waits for the toolkit to settle.
///
/// The settle wait is a single bounded wait, not condition polling: the
/// driver drains its event queue and returns once the tree is stable, so
/// the next script line observes a consistent snapshot.
pub struct ActionDispatcher {
    settle_timeout_ms: u64,
}

impl ActionDispatcher {
    pub fn new(settle_timeout_ms: u64) -> Self {
        ActionDispatcher { settle_timeout_ms }
    }

    /// Dispatch one action against a freshly-resolved element.
    pub fn dispatch(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        let adapter = adapter_for(handle.kind);

        let shape = adapter
            .shape_for(verb)
            .ok_or(ReplayError::UnsupportedAction {
                verb,
                kind: handle.kind,
            })?;

        shape
            .validate(args)
            .map_err(|reason| ReplayError::InvalidArgument { verb, reason })?;

        adapter.invoke(driver, handle, verb, args)?;
        driver.settle(self.settle_timeout_ms)
    }
}
