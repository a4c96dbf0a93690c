use crate::api::ApiError;

/// Success / error banner content, held in an `RwSignal` by each panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<ApiError>,
}

impl MessageState {
    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.success = Some(msg.into());
        self.error = None;
    }

    pub fn set_error(&mut self, err: ApiError) {
        log::error!("{} ({})", err.error, err.code);
        self.error = Some(err);
        self.success = None;
    }

    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_error_are_mutually_exclusive() {
        let mut messages = MessageState::default();
        messages.set_error(ApiError::validation("bad"));
        assert!(messages.error.is_some());
        messages.set_success("saved");
        assert_eq!(messages.success.as_deref(), Some("saved"));
        assert!(messages.error.is_none());
        messages.clear();
        assert_eq!(messages, MessageState::default());
    }
}
