use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const MAX_TOASTS: usize = 3;
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub enum ToastAction {
    Push {
        kind: ToastKind,
        message: String,
        now: Instant,
    },
    Dismiss(u64),
    /// Drop every toast whose deadline has passed
    Expire(Instant),
}

/// Bounded toast stack. The oldest toast is evicted when a push overflows it.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    next_id: u64,
    capacity: usize,
    lifetime: Duration,
}

impl ToastQueue {
    pub fn new(capacity: usize, lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::with_capacity(capacity),
            next_id: 0,
            capacity: capacity.max(1),
            lifetime,
        }
    }

    pub fn dispatch(&mut self, action: ToastAction) {
        match action {
            ToastAction::Push { kind, message, now } => {
                self.next_id += 1;
                if self.toasts.len() == self.capacity {
                    self.toasts.pop_front();
                }
                self.toasts.push_back(Toast {
                    id: self.next_id,
                    kind,
                    message,
                    expires_at: now + self.lifetime,
                });
            }
            ToastAction::Dismiss(id) => self.toasts.retain(|t| t.id != id),
            ToastAction::Expire(now) => self.toasts.retain(|t| t.expires_at > now),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.dispatch(ToastAction::Push {
            kind,
            message: message.into(),
            now: Instant::now(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Earliest deadline, for scheduling the next repaint
    pub fn next_expiry(&self) -> Option<Instant> {
        self.toasts.iter().map(|t| t.expires_at).min()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(MAX_TOASTS, TOAST_LIFETIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn push(queue: &mut ToastQueue, message: &str, now: Instant) {
        queue.dispatch(ToastAction::Push {
            kind: ToastKind::Info,
            message: message.to_string(),
            now,
        });
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let now = Instant::now();
        let mut queue = ToastQueue::default();
        for message in ["one", "two", "three", "four"] {
            push(&mut queue, message, now);
        }
        let messages: Vec<&str> = queue.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three", "four"]);
    }

    #[test]
    fn test_independent_expiry() {
        let start = Instant::now();
        let mut queue = ToastQueue::new(3, Duration::from_secs(4));
        push(&mut queue, "early", start);
        push(&mut queue, "late", start + Duration::from_secs(2));

        queue.dispatch(ToastAction::Expire(start + Duration::from_secs(3)));
        assert_eq!(queue.len(), 2);

        queue.dispatch(ToastAction::Expire(start + Duration::from_secs(5)));
        let messages: Vec<&str> = queue.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["late"]);
        assert_eq!(queue.next_expiry(), Some(start + Duration::from_secs(6)));

        queue.dispatch(ToastAction::Expire(start + Duration::from_secs(6)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss() {
        let now = Instant::now();
        let mut queue = ToastQueue::default();
        push(&mut queue, "a", now);
        push(&mut queue, "b", now);
        let first = queue.iter().next().unwrap().id;

        queue.dispatch(ToastAction::Dismiss(first));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().unwrap().message, "b");
    }
}
