//! Async driver for a long-lived [`WeatherView`].
//!
//! Every navigation that yields a ticket spawns one fetch task into a
//! `JoinSet`. Completions are applied in arrival order; the view's token
//! check drops anything that is no longer current. A task that panics is
//! applied as a failed lookup.

use std::{collections::HashMap, sync::Arc};

use tokio::task::{Id, JoinSet};
use tracing::{debug, error};

use crate::{
    model::WeatherSnapshot,
    provider::{ProviderError, WeatherProvider},
    view::{FetchTicket, Rendered, Resolution, ViewState, WeatherView},
};

#[derive(Debug)]
pub struct WeatherSession {
    provider: Arc<dyn WeatherProvider>,
    view: WeatherView,
    tasks: JoinSet<Result<WeatherSnapshot, ProviderError>>,
    tickets: HashMap<Id, FetchTicket>,
}

impl WeatherSession {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider, view: WeatherView::new(), tasks: JoinSet::new(), tickets: HashMap::new() }
    }

    /// Navigate to `city`, starting a request if the city changed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn navigate(&mut self, city: Option<&str>) {
        let Some(ticket) = self.view.set_city(city) else {
            return;
        };

        debug!(city = %ticket.city, token = ticket.token, "starting weather lookup");

        let provider = Arc::clone(&self.provider);
        let city = ticket.city.clone();
        let handle = self.tasks.spawn(async move { provider.current(&city).await });
        self.tickets.insert(handle.id(), ticket);
    }

    /// Wait for the next request to finish and apply it.
    ///
    /// Cancel-safe. Returns `None` when nothing is in flight.
    pub async fn next_update(&mut self) -> Option<Resolution> {
        let (id, result) = match self.tasks.join_next_with_id().await? {
            Ok((id, result)) => (id, result),
            Err(err) => {
                error!(error = %err, "weather lookup task failed");
                (err.id(), Err(ProviderError::Task(err)))
            }
        };

        let ticket = self.tickets.remove(&id)?;
        Some(self.view.resolve(ticket, result))
    }

    /// Number of spawned requests that have not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn state(&self) -> &ViewState {
        self.view.state()
    }

    pub fn render(&self) -> Rendered {
        self.view.render()
    }
}
