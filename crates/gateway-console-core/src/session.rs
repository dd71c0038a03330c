//! Session identity shared by all requests of one client run.

/// Identity and message-id counter for a running client instance.
///
/// The session id is stable for the process lifetime. The message-id
/// counter starts at 1 and is consumed only by the JSON-RPC driver;
/// allocation happens before the request goes out, so a failed call
/// still uses up its id (ids are a monotonic counter, not a delivery
/// guarantee).
#[derive(Debug, Clone)]
pub struct Session {
    session_id: String,
    next_message_id: u64,
}

impl Session {
    /// Create a session identified by the current process.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(format!("console-{}", std::process::id()))
    }

    /// Create a session with an explicit id.
    #[must_use]
    pub fn with_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            next_message_id: 1,
        }
    }

    /// The session identifier sent with every request.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.session_id
    }

    /// The id the next JSON-RPC request will carry.
    #[must_use]
    pub fn next_message_id(&self) -> u64 {
        self.next_message_id
    }

    /// Consume and return the next message id.
    pub fn allocate_message_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_stable_for_lifetime() {
        let session = Session::new();
        assert!(session.id().starts_with("console-"));
        assert_eq!(session.id(), session.id());
    }

    #[test]
    fn test_message_ids_start_at_one_and_increment() {
        let mut session = Session::with_id("test");
        assert_eq!(session.allocate_message_id(), 1);
        assert_eq!(session.allocate_message_id(), 2);
        assert_eq!(session.allocate_message_id(), 3);
        assert_eq!(session.next_message_id(), 4);
    }
}
