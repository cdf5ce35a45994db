//! One request in flight per form.
//!
//! A form asks the guard for a [`SubmitTicket`] before it sends anything and
//! keeps the ticket alive until the request settles. Dropping the ticket frees
//! the form again, whichever way the request ended.
use contracts::shared::validation::ValidationErrors;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

/// Held for the lifetime of one request.
#[must_use = "the form is released as soon as the ticket is dropped"]
pub struct SubmitTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// What a submit click should do.
pub enum Submit<P> {
    /// Validation failed; nothing is sent.
    Invalid(ValidationErrors),
    /// A previous request is still in flight; the click is ignored.
    InFlight,
    /// Send `P`, holding the ticket until the response arrives.
    Send(P, SubmitTicket),
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while a previous submit has not finished.
    pub fn try_begin(&self) -> Option<SubmitTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitTicket {
                busy: self.busy.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Validation runs before the in-flight check.
    pub fn submit<P>(&self, validated: Result<P, ValidationErrors>) -> Submit<P> {
        match validated {
            Err(errors) => Submit::Invalid(errors),
            Ok(payload) => match self.try_begin() {
                Some(ticket) => Submit::Send(payload, ticket),
                None => Submit::InFlight,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_click_is_ignored_while_in_flight() {
        let guard = SubmitGuard::new();
        let ticket = guard.try_begin();
        assert!(ticket.is_some());
        assert!(guard.is_busy());
        assert!(guard.try_begin().is_none());
        drop(ticket);
        assert!(!guard.is_busy());
        assert!(guard.try_begin().is_some());
    }

    #[test]
    fn test_ticket_released_when_request_fails() {
        let guard = SubmitGuard::new();
        let send = |ticket: SubmitTicket| -> Result<(), String> {
            let _ticket = ticket;
            Err("Something went wrong".to_string())
        };
        let result = guard.try_begin().map(send);
        assert_eq!(result, Some(Err("Something went wrong".to_string())));
        assert!(!guard.is_busy());
    }

    #[test]
    fn test_invalid_form_does_not_take_the_guard() {
        let guard = SubmitGuard::new();
        let mut errors = ValidationErrors::new();
        errors.add("price", "required", "Price is required");
        assert!(matches!(guard.submit::<u32>(Err(errors)), Submit::Invalid(_)));
        assert!(!guard.is_busy());
    }

    #[test]
    fn test_submit_sends_once_until_released() {
        let guard = SubmitGuard::new();
        let ticket = match guard.submit::<u32>(Ok(7)) {
            Submit::Send(payload, ticket) => {
                assert_eq!(payload, 7);
                ticket
            }
            _ => panic!("first click must send"),
        };
        assert!(matches!(guard.submit::<u32>(Ok(7)), Submit::InFlight));
        drop(ticket);
        assert!(matches!(guard.submit::<u32>(Ok(7)), Submit::Send(7, _)));
    }
}
