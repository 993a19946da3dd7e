//! Aerograph domain model.
//!
//! Plain data records for the aviation graph (aircraft, airports, flights,
//! onboard systems, components, sensors, readings, maintenance events, delays)
//! with validation on construction. Entities carry no behavior beyond data
//! holding; persistence lives in `aerograph-client`.

mod common;

pub mod entities;
pub mod error;

pub use entities::{
    Aircraft, Airport, Component, ComponentFault, Delay, DelayedFlight, Flight, FlightArrival,
    MaintenanceEvent, Reading, Sensor, Severity, System,
};

pub use error::DomainError;
