//! Which dialog, if any, the console is showing

use ridedesk_core::{NewRequest, RequestId, RequestRecord};

/// Console interaction mode
///
/// Exactly one dialog can be open at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiMode {
    /// No dialog open
    #[default]
    Idle,
    /// Create form open with its draft
    CreateOpen(Box<NewRequest>),
    /// Details view open
    DetailsOpen(Box<RequestRecord>),
    /// Approve dialog open for a request
    ApprovePending {
        /// Request being approved
        request_id: RequestId,
    },
    /// Reject dialog open for a request
    RejectPending {
        /// Request being rejected
        request_id: RequestId,
    },
}

impl UiMode {
    /// Short name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CreateOpen(_) => "create",
            Self::DetailsOpen(_) => "details",
            Self::ApprovePending { .. } => "approve",
            Self::RejectPending { .. } => "reject",
        }
    }

    /// Whether no dialog is open
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Record shown in the details view
    #[must_use]
    pub fn details(&self) -> Option<&RequestRecord> {
        match self {
            Self::DetailsOpen(record) => Some(&**record),
            _ => None,
        }
    }

    /// Draft held by the create form
    pub fn draft_mut(&mut self) -> Option<&mut NewRequest> {
        match self {
            Self::CreateOpen(draft) => Some(&mut **draft),
            _ => None,
        }
    }

    /// Request targeted by an open approve/reject dialog
    #[must_use]
    pub fn pending_request(&self) -> Option<&str> {
        match self {
            Self::ApprovePending { request_id } | Self::RejectPending { request_id } => {
                Some(request_id.as_str())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_idle() {
        let mode = UiMode::default();
        assert!(mode.is_idle());
        assert_eq!(mode.name(), "idle");
        assert!(mode.details().is_none());
    }

    #[test]
    fn test_draft_only_in_create_mode() {
        let mut mode = UiMode::CreateOpen(Box::default());
        if let Some(draft) = mode.draft_mut() {
            draft.user_name = "Asha".to_string();
        }
        assert!(matches!(mode, UiMode::CreateOpen(ref d) if d.user_name == "Asha"));

        let mut idle = UiMode::Idle;
        assert!(idle.draft_mut().is_none());
    }

    #[test]
    fn test_pending_request() {
        let approve = UiMode::ApprovePending {
            request_id: "R1".to_string(),
        };
        let reject = UiMode::RejectPending {
            request_id: "R2".to_string(),
        };
        assert_eq!(approve.pending_request(), Some("R1"));
        assert_eq!(reject.pending_request(), Some("R2"));
        assert_eq!(reject.name(), "reject");
        assert!(UiMode::Idle.pending_request().is_none());
    }
}
