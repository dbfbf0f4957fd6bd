//! Weather view state machine.
//!
//! A view tracks which city it is showing and what it currently knows about
//! it. Each navigation to a new city hands out a [`FetchTicket`]; only the
//! result for the most recently issued ticket is allowed to change the state,
//! so an older response that arrives late never overwrites a newer city.

use std::fmt;

use tracing::{debug, warn};

use crate::{
    model::{WeatherSnapshot, format_two_decimals},
    provider::ProviderError,
};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const NOT_FOUND_MESSAGE: &str = "Weather data not found.";
pub const NO_CITY_MESSAGE: &str = "No city specified.";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// A request is in flight.
    Loading,
    /// No city was given, so nothing will be fetched.
    NoCity,
    /// The last request finished without usable data.
    NotFound,
    Loaded(WeatherSnapshot),
}

/// One outstanding lookup. Must be turned into exactly one provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: u64,
    pub city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The ticket was superseded by a later navigation.
    Discarded,
}

#[derive(Debug)]
pub struct WeatherView {
    city: Option<String>,
    token: u64,
    navigated: bool,
    state: ViewState,
}

impl Default for WeatherView {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherView {
    pub fn new() -> Self {
        Self { city: None, token: 0, navigated: false, state: ViewState::Loading }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Point the view at `city`. Returns a ticket when a request is needed.
    ///
    /// Repeating the current city is a no-op; blank input counts as absent.
    pub fn set_city(&mut self, city: Option<&str>) -> Option<FetchTicket> {
        let city = city.map(str::trim).filter(|c| !c.is_empty()).map(str::to_owned);

        if self.navigated && city == self.city {
            return None;
        }

        self.navigated = true;
        self.token += 1;
        self.city = city;

        match &self.city {
            None => {
                self.state = ViewState::NoCity;
                None
            }
            Some(city) => {
                self.state = ViewState::Loading;
                Some(FetchTicket { token: self.token, city: city.clone() })
            }
        }
    }

    /// Apply the outcome of a ticket's request.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<WeatherSnapshot, ProviderError>,
    ) -> Resolution {
        if ticket.token != self.token {
            debug!(city = %ticket.city, token = ticket.token, current = self.token, "discarding stale weather response");
            return Resolution::Discarded;
        }

        self.state = match result {
            Ok(snapshot) => ViewState::Loaded(snapshot),
            Err(err) => {
                warn!(city = %ticket.city, error = %err, "weather lookup failed");
                ViewState::NotFound
            }
        };

        Resolution::Applied
    }

    pub fn render(&self) -> Rendered {
        render(&self.state)
    }
}

/// Output of [`render`]: either a bare status message or a weather summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Message(&'static str),
    Summary { heading: String, lines: Vec<String> },
}

pub fn render(state: &ViewState) -> Rendered {
    match state {
        ViewState::Loading => Rendered::Message(LOADING_MESSAGE),
        ViewState::NoCity => Rendered::Message(NO_CITY_MESSAGE),
        ViewState::NotFound => Rendered::Message(NOT_FOUND_MESSAGE),
        ViewState::Loaded(s) => Rendered::Summary {
            heading: format!("Weather in {}", s.location_name),
            lines: vec![
                format!(
                    "Temperature: {}°C / {}°F",
                    s.temperature_c,
                    format_two_decimals(s.temperature_f())
                ),
                format!("Humidity: {}%", s.humidity_pct),
                format!("Wind Speed: {} km/h", s.wind_kph),
                format!("Condition: {}", s.condition),
            ],
        },
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Message(msg) => f.write_str(msg),
            Rendered::Summary { heading, lines } => {
                write!(f, "{heading}")?;
                for line in lines {
                    write!(f, "\n  {line}")?;
                }
                Ok(())
            }
        }
    }
}
