/// Positioning subsystem control.
///
/// Fixes and failures flow back into the session as
/// [`SessionEvent`](crate::session::SessionEvent)s; this trait only covers the
/// calls the session makes in the other direction.
pub trait LocationSource: Send {
    /// Ask the user for when-in-use access. Called once at session start.
    fn request_authorization(&mut self) {}

    fn start(&mut self);

    /// Stop delivering fixes. Called once, after the first acceptable fix.
    fn stop(&mut self);
}
