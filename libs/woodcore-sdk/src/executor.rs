use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared, WeakShared};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::trace;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::pages::{self, PageStream};
use crate::request::{Params, RequestDescriptor};
use crate::transport::Transport;

type CallFuture = BoxFuture<'static, Result<Value, Error>>;
type SharedCall = Shared<CallFuture>;

/// Executes request descriptors against the WoodCore API.
///
/// An executor coalesces concurrent identical calls: while a request is in
/// flight, an invocation with an equal descriptor joins it instead of
/// sending a second one, and both receive the same outcome. The slot is
/// released as soon as the call settles. Clones share the slot; executors
/// obtained separately from [`WoodCore`](crate::WoodCore) do not.
#[derive(Clone)]
pub struct Executor {
    transport: Transport,
    slot: Arc<Mutex<Slot>>,
}

#[derive(Default)]
struct Slot {
    next_generation: u64,
    pending: Option<Pending>,
}

struct Pending {
    descriptor: RequestDescriptor,
    generation: u64,
    call: WeakShared<CallFuture>,
}

/// Clears the slot entry it was created for when the call settles or is dropped.
struct SlotRelease {
    slot: Arc<Mutex<Slot>>,
    generation: u64,
}

impl Drop for SlotRelease {
    fn drop(&mut self) {
        let mut slot = self.slot.lock();
        if slot
            .pending
            .as_ref()
            .is_some_and(|pending| pending.generation == self.generation)
        {
            slot.pending = None;
        }
    }
}

enum InFlight {
    Joined(SharedCall),
    Busy(SharedCall),
    Idle,
}

impl Executor {
    pub(crate) fn new(http_client: reqwest::Client, config: Arc<ClientConfig>) -> Self {
        Self {
            transport: Transport::new(http_client, config),
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Execute one request and return the parsed JSON body.
    ///
    /// GET descriptors that carry a query get `perPage = 10` and `page = 1`
    /// when those are absent.
    ///
    /// # Errors
    /// [`Error::RemoteApi`] for non-success responses, [`Error::Transport`]
    /// when no response was received.
    pub async fn execute(&self, descriptor: RequestDescriptor) -> Result<Value, Error> {
        let descriptor = descriptor.with_default_pagination();
        match self.join_or_start(&descriptor) {
            Some(call) => call.await,
            None => self.transport.send(&descriptor).await,
        }
    }

    /// Build the descriptor for a table endpoint and execute it.
    ///
    /// # Errors
    /// [`Error::InvalidRequest`] if the params do not resolve the path,
    /// otherwise as [`Executor::execute`].
    pub async fn call(&self, endpoint: &Endpoint, params: &Params) -> Result<Value, Error> {
        let descriptor = endpoint.descriptor(params)?;
        self.execute(descriptor).await
    }

    /// Lazily fetch every page of a GET descriptor, one response body per item.
    ///
    /// Non-GET descriptors produce an empty stream without any request.
    #[must_use]
    pub fn pages(&self, descriptor: RequestDescriptor) -> PageStream {
        pages::page_stream(self.clone(), descriptor)
    }

    /// Join the in-flight call for `descriptor`, or start one if the slot is
    /// free. `None` means the slot is busy with a different request.
    fn join_or_start(&self, descriptor: &RequestDescriptor) -> Option<SharedCall> {
        let mut slot = self.slot.lock();
        let in_flight = match slot.pending.as_ref() {
            Some(pending) => match pending.call.upgrade() {
                Some(call) if pending.descriptor == *descriptor => InFlight::Joined(call),
                Some(call) => InFlight::Busy(call),
                None => InFlight::Idle,
            },
            None => InFlight::Idle,
        };

        match in_flight {
            InFlight::Joined(call) => {
                trace!(path = descriptor.path(), "joining in-flight request");
                Some(call)
            }
            InFlight::Busy(other) => {
                // Dropping the last handle may settle the slot, which locks it.
                drop(slot);
                drop(other);
                None
            }
            InFlight::Idle => {
                let generation = slot.next_generation;
                slot.next_generation = generation.wrapping_add(1);

                let call = self.start(descriptor.clone(), generation);
                slot.pending = call.downgrade().map(|weak| Pending {
                    descriptor: descriptor.clone(),
                    generation,
                    call: weak,
                });
                Some(call)
            }
        }
    }

    fn start(&self, descriptor: RequestDescriptor, generation: u64) -> SharedCall {
        let transport = self.transport.clone();
        let release = SlotRelease {
            slot: Arc::clone(&self.slot),
            generation,
        };
        async move {
            let _release = release;
            transport.send(&descriptor).await
        }
        .boxed()
        .shared()
    }

    #[cfg(test)]
    fn has_pending(&self) -> bool {
        self.slot.lock().pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::transport::build_http_client;
    use futures::StreamExt;
    use httpmock::prelude::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn executor_for(server: &MockServer) -> Executor {
        let config = ClientConfig::new("wc_test_secretkey")
            .unwrap()
            .with_base_url(server.base_url())
            .unwrap();
        let http_client = build_http_client(&config).unwrap();
        Executor::new(http_client, Arc::new(config))
    }

    fn clients_query() -> RequestDescriptor {
        RequestDescriptor::builder()
            .path("/clients")
            .with_query()
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_slot_is_released_after_success() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/clients");
            then.status(200).json_body(json!({"status": "success"}));
        });

        let executor = executor_for(&server);
        executor.execute(clients_query()).await.unwrap();
        assert!(!executor.has_pending());
    }

    #[tokio::test]
    async fn test_slot_is_released_after_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/clients");
            then.status(500).json_body(json!({"message": "boom"}));
        });

        let executor = executor_for(&server);
        assert!(executor.execute(clients_query()).await.is_err());
        assert!(!executor.has_pending());
    }

    #[tokio::test]
    async fn test_abandoned_call_releases_slot() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/clients");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({}));
        });

        let executor = executor_for(&server);
        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), executor.execute(clients_query())).await;
        assert!(abandoned.is_err());
        assert!(!executor.has_pending());
    }

    #[tokio::test]
    async fn test_clones_share_the_slot() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/clients");
            then.status(200)
                .delay(Duration::from_millis(200))
                .json_body(json!({"data": []}));
        });

        let executor = executor_for(&server);
        let clone = executor.clone();
        let (a, b) = tokio::join!(
            executor.execute(clients_query()),
            clone.execute(clients_query())
        );
        assert_eq!(a.unwrap(), b.unwrap());
        mock.assert_calls(1);
    }

    #[test]
    fn test_post_pages_end_without_polling_the_network() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.path("/loans");
            then.status(200).json_body(json!({}));
        });

        let descriptor = RequestDescriptor::builder()
            .method(http::Method::POST)
            .path("/loans")
            .build()
            .unwrap();
        let mut pages = executor_for(&server).pages(descriptor);
        let mut next = tokio_test::task::spawn(pages.next());
        assert!(tokio_test::assert_ready!(next.poll()).is_none());
        mock.assert_calls(0);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_api_key_is_not_logged() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/clients")
                .header("Authorization", "Bearer wc_test_secretkey");
            then.status(200).json_body(json!({}));
        });

        let executor = executor_for(&server);
        executor.execute(clients_query()).await.unwrap();
        assert!(logs_contain("dispatching request"));
        assert!(!logs_contain("secretkey"));
    }
}
