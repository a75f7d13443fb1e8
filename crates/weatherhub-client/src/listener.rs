/// Notified when the server rejects the stored credential.
///
/// The client has already cleared the credential by the time this runs.
/// Hosts use it to send the user back to the login entry point.
pub trait SessionListener: Send + Sync {
    fn session_invalidated(&self);
}

impl<F> SessionListener for F
where
    F: Fn() + Send + Sync,
{
    fn session_invalidated(&self) {
        self()
    }
}

/// Listener that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl SessionListener for NoopListener {
    fn session_invalidated(&self) {}
}
