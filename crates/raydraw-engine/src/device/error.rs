/// What the frame loop does after `get_current_texture` fails.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface lost or outdated and has been configured again; the next
    /// frame can proceed normally.
    Reconfigured,
    /// Timeout or driver hiccup; drop this frame only.
    SkipFrame,
    /// Out of memory. The app stops.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn is_fatal(self) -> bool {
        self == SurfaceErrorAction::Fatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fatal_is_fatal() {
        assert!(SurfaceErrorAction::Fatal.is_fatal());
        assert!(!SurfaceErrorAction::SkipFrame.is_fatal());
        assert!(!SurfaceErrorAction::Reconfigured.is_fatal());
    }
}
