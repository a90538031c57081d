//! Uniform outcome of a call into the attendance service.
//!
//! Every dashboard fetch and every submission ends as an [`Outcome`]:
//! `Loading` while the call is in flight, then exactly one of `Success` or
//! `Error`. [`OutcomeChannel`] publishes that sequence through a
//! `tokio::sync::watch` channel so a screen can render progress and the
//! terminal value from the same subscription.

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::{Failure, ServiceError};

pub const NETWORK_MESSAGE: &str =
    "Unable to reach the attendance service. Check the connection and try again.";
pub const REJECTED_MESSAGE: &str = "The attendance service rejected the request.";
pub const MALFORMED_MESSAGE: &str = "The attendance service sent an unexpected response.";

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Loading,
    Success(T),
    Error {
        cause: Failure,
        /// Human message to show as-is when present.
        message: Option<String>,
    },
}

impl<T> Outcome<T> {
    /// Builds an error outcome. API rejections keep the service's own
    /// message; everything else leaves the message to [`Self::user_message`].
    pub fn failed(cause: impl Into<Failure>) -> Self {
        let cause = cause.into();
        let message = match &cause {
            Failure::Service(ServiceError::Api { message, .. }) => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
            _ => None,
        };
        Outcome::Error { cause, message }
    }

    pub fn from_service_result(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(e) => Outcome::failed(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Outcome::Loading)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn cause(&self) -> Option<&Failure> {
        match self {
            Outcome::Error { cause, .. } => Some(cause),
            _ => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Loading => Outcome::Loading,
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Error { cause, message } => Outcome::Error { cause, message },
        }
    }

    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Loading => Outcome::Loading,
            Outcome::Success(value) => f(value),
            Outcome::Error { cause, message } => Outcome::Error { cause, message },
        }
    }

    /// `None` while loading.
    pub fn into_result(self) -> Option<Result<T, Failure>> {
        match self {
            Outcome::Loading => None,
            Outcome::Success(value) => Some(Ok(value)),
            Outcome::Error { cause, .. } => Some(Err(cause)),
        }
    }

    /// Message for the user: the verbatim message if one was given,
    /// otherwise one derived from the cause. `None` unless this is an error.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Outcome::Error { message: Some(m), .. } => Some(m.clone()),
            Outcome::Error {
                cause,
                message: None,
            } => Some(derive_message(cause)),
            _ => None,
        }
    }
}

fn derive_message(cause: &Failure) -> String {
    match cause {
        Failure::Service(e) if e.is_network() => NETWORK_MESSAGE.to_string(),
        Failure::Service(ServiceError::Api { .. }) => REJECTED_MESSAGE.to_string(),
        Failure::Service(_) => MALFORMED_MESSAGE.to_string(),
        Failure::Validation(e) => e.to_string(),
    }
}

/// Publishes `Loading` followed by exactly one terminal [`Outcome`].
pub struct OutcomeChannel<T> {
    sender: watch::Sender<Outcome<T>>,
}

impl<T: Clone> OutcomeChannel<T> {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Outcome::Loading);
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<Outcome<T>> {
        self.sender.subscribe()
    }

    /// Awaits the call and publishes its result. Consumes the channel, so
    /// a second terminal value cannot be sent.
    pub async fn run<F>(self, call: F) -> Outcome<T>
    where
        F: Future<Output = Outcome<T>>,
    {
        let mut outcome = call.await;
        if outcome.is_loading() {
            log::warn!("Attendance call finished without a terminal outcome");
            outcome = Outcome::failed(ServiceError::Malformed(
                "call finished while still loading".to_string(),
            ));
        }
        // send_replace keeps the value even when nobody is subscribed.
        self.sender.send_replace(outcome.clone());
        outcome
    }
}

impl<T> OutcomeChannel<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Runs the call on the Tokio runtime. Dropping the returned receiver
    /// only discards interest; the call itself keeps running.
    pub fn spawn<F>(call: F) -> (JoinHandle<Outcome<T>>, watch::Receiver<Outcome<T>>)
    where
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        let channel = OutcomeChannel::new();
        let receiver = channel.subscribe();
        let handle = tokio::spawn(channel.run(call));
        (handle, receiver)
    }
}

impl<T: Clone> Default for OutcomeChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits until the channel holds a terminal value.
pub async fn wait_terminal<T: Clone>(receiver: &mut watch::Receiver<Outcome<T>>) -> Outcome<T> {
    match receiver.wait_for(|outcome| outcome.is_terminal()).await {
        Ok(value) => value.clone(),
        Err(_) => Outcome::failed(ServiceError::Network(
            "outcome channel closed before completion".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_api_message_is_kept_verbatim() {
        let outcome: Outcome<()> = Outcome::from_service_result(Err(ServiceError::api(
            403,
            "Anda bukan wali kelas rombel ini",
        )));
        assert_eq!(
            outcome.user_message().as_deref(),
            Some("Anda bukan wali kelas rombel ini")
        );
    }

    #[test]
    fn test_network_message_is_generic() {
        let outcome: Outcome<()> =
            Outcome::failed(ServiceError::Network("connection refused".to_string()));
        assert!(matches!(outcome, Outcome::Error { message: None, .. }));
        assert_eq!(outcome.user_message().as_deref(), Some(NETWORK_MESSAGE));
    }

    #[test]
    fn test_api_without_message_derives_one() {
        let outcome: Outcome<()> = Outcome::failed(ServiceError::Api {
            status: Some(500),
            message: Some("   ".to_string()),
        });
        assert_eq!(outcome.user_message().as_deref(), Some(REJECTED_MESSAGE));
    }

    #[test]
    fn test_validation_message() {
        let outcome: Outcome<()> =
            Outcome::failed(ValidationError::MissingAttendeeId { index: 2 });
        assert_eq!(
            outcome.user_message().as_deref(),
            Some("Entry 2: attendee id is required")
        );
    }

    #[test]
    fn test_map_and_into_result() {
        let outcome = Outcome::Success(2).map(|n| n * 10);
        assert_eq!(outcome, Outcome::Success(20));
        assert_eq!(outcome.into_result(), Some(Ok(20)));
        assert_eq!(Outcome::<i32>::Loading.into_result(), None);
        assert!(Outcome::<i32>::Loading.user_message().is_none());
    }

    #[tokio::test]
    async fn test_channel_goes_from_loading_to_terminal() {
        let channel = OutcomeChannel::new();
        let mut receiver = channel.subscribe();
        assert!(receiver.borrow().is_loading());

        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(channel.run(async move {
            let _ = release_rx.await;
            Outcome::Success(vec![1, 2, 3])
        }));

        assert!(receiver.borrow().is_loading());
        release_tx.send(()).unwrap();

        let terminal = wait_terminal(&mut receiver).await;
        assert_eq!(terminal, Outcome::Success(vec![1, 2, 3]));
        assert_eq!(task.await.unwrap(), Outcome::Success(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_spawn_keeps_running_after_receiver_dropped() {
        let (handle, receiver) =
            OutcomeChannel::spawn(async { Outcome::<u32>::Success(7) });
        drop(receiver);
        assert_eq!(handle.await.unwrap(), Outcome::Success(7));
    }

    #[tokio::test]
    async fn test_loading_result_is_converted_to_error() {
        let outcome = OutcomeChannel::<u8>::new()
            .run(async { Outcome::Loading })
            .await;
        assert!(matches!(
            outcome.cause(),
            Some(Failure::Service(ServiceError::Malformed(_)))
        ));
    }
}
