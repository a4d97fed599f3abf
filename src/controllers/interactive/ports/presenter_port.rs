use crate::controllers::interactive::events::render_event::RenderEvent;

pub trait InteractiveControllerPresenterPort: Send + Sync {
    /// Called from the render worker while it holds the controller's request
    /// lock, so `event` is never older than the latest submission. Must not
    /// submit requests to the same controller.
    fn present(&self, event: RenderEvent);
}
