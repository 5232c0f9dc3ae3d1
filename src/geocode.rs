use std::{
    thread::sleep,
    time::{Duration, Instant},
};

use _model::Contact;
use anyhow::{bail, Result};
use geo::Point;
use serde::Deserialize;
use serde_json::Value;
use ureq::Agent;

use crate::utils::progress_bar;

pub const GOOGLE_MAPS_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

pub trait Geocoder {
    /// Candidate matches for a one-line address, best first.
    fn geocode(&self, address: &str) -> Result<Vec<Candidate>>;
}

/// A geocoder match. Coordinates are `None` when the service sent something
/// other than a number.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Candidate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
        }
    }

    pub fn point(&self) -> Option<Point> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Point::new(lng, lat))
            }
            _ => None,
        }
    }
}

pub struct GoogleMaps {
    agent: Agent,
    endpoint: String,
    api_key: String,
}

impl GoogleMaps {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(GOOGLE_MAPS_ENDPOINT.to_string(), api_key)
    }

    pub fn with_endpoint(endpoint: String, api_key: String) -> Self {
        Self {
            agent: Agent::new(),
            endpoint,
            api_key,
        }
    }
}

impl Geocoder for GoogleMaps {
    fn geocode(&self, address: &str) -> Result<Vec<Candidate>> {
        log::debug!("Geocoding {address:?}");
        let response: GeocodeResponse = self
            .agent
            .get(&self.endpoint)
            .query("address", address)
            .query("key", &self.api_key)
            .call()?
            .into_json()?;

        response.candidates()
    }
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<RawResult>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct RawResult {
    geometry: RawGeometry,
}

#[derive(Deserialize)]
struct RawGeometry {
    location: RawLocation,
}

// kept loose so a malformed coordinate is a soft failure, not a parse error
#[derive(Deserialize)]
struct RawLocation {
    #[serde(default)]
    lat: Value,
    #[serde(default)]
    lng: Value,
}

impl GeocodeResponse {
    fn candidates(self) -> Result<Vec<Candidate>> {
        match self.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(self
                .results
                .into_iter()
                .map(|x| x.geometry.location.refine())
                .collect()),
            status => bail!(
                "Geocoding request failed with status {status}: {}",
                self.error_message.as_deref().unwrap_or("no error message")
            ),
        }
    }
}

impl RawLocation {
    // any JSON number is accepted, integral degrees included
    fn refine(self) -> Candidate {
        Candidate {
            lat: self.lat.as_f64(),
            lng: self.lng.as_f64(),
        }
    }
}

/// Keeps calls at least `interval` apart, measured from the start of the
/// previous call.
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let remaining = self.interval.saturating_sub(last.elapsed());
            if !remaining.is_zero() {
                sleep(remaining);
            }
        }
        self.last = Some(Instant::now());
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Resolved {
    pub located: usize,
    pub unlocated: usize,
}

/// Geocodes every contact in order and stores the first match's position.
/// Contacts the service can't place keep `position: None`.
pub fn resolve<G: Geocoder>(
    contacts: &mut [Contact],
    geocoder: &G,
    throttle: &mut Throttle,
) -> Result<Resolved> {
    let mut output = Resolved::default();
    let pb = progress_bar(contacts.len() as u64);

    for contact in contacts.iter_mut() {
        throttle.wait();
        let candidates = geocoder
            .geocode(&contact.address_one_line())
            .inspect_err(|_| pb.finish_and_clear())?;
        pb.inc(1);

        let point = match candidates.first() {
            None => {
                pb.suspend(|| log::warn!("No geocoding results for {}", contact.full_name()));
                None
            }
            Some(x) => {
                let point = x.point();
                if point.is_none() {
                    pb.suspend(|| log::warn!("Bad lat/lon for {}", contact.full_name()));
                }
                point
            }
        };

        match point {
            Some(p) => {
                contact.position = Some(p);
                output.located += 1;
            }
            None => output.unlocated += 1,
        }
    }
    pb.finish_and_clear();

    log::info!(
        "Geocoded {} of {} addresses",
        output.located,
        output.located + output.unlocated
    );
    Ok(output)
}
