//! Per-entity repositories over parameterized Cypher.
//!
//! Each repository wraps one [`Session`] and translates method calls into
//! bound-parameter queries; result rows map back into `aerograph-domain`
//! entities. Repositories never talk to each other.

use crate::connection::Session;

mod helpers;

mod aircraft_repo;
mod airport_repo;
mod component_repo;
mod delay_repo;
mod flight_repo;
mod maintenance_event_repo;
mod reading_repo;
mod sensor_repo;
mod system_repo;

#[cfg(test)]
mod integration_tests;

pub use aircraft_repo::AircraftRepo;
pub use airport_repo::AirportRepo;
pub use component_repo::ComponentRepo;
pub use delay_repo::DelayRepo;
pub use flight_repo::FlightRepo;
pub use maintenance_event_repo::MaintenanceEventRepo;
pub use reading_repo::ReadingRepo;
pub use sensor_repo::SensorRepo;
pub use system_repo::SystemRepo;

/// Conventional bound for `find_all` scans.
pub const DEFAULT_LIMIT: i64 = 100;

/// All repositories over one session.
pub struct Repositories {
    pub aircraft: AircraftRepo,
    pub airport: AirportRepo,
    pub flight: FlightRepo,
    pub system: SystemRepo,
    pub component: ComponentRepo,
    pub sensor: SensorRepo,
    pub reading: ReadingRepo,
    pub maintenance_event: MaintenanceEventRepo,
    pub delay: DelayRepo,
}

impl Repositories {
    pub fn new(session: Session) -> Self {
        Self {
            aircraft: AircraftRepo::new(session.clone()),
            airport: AirportRepo::new(session.clone()),
            flight: FlightRepo::new(session.clone()),
            system: SystemRepo::new(session.clone()),
            component: ComponentRepo::new(session.clone()),
            sensor: SensorRepo::new(session.clone()),
            reading: ReadingRepo::new(session.clone()),
            maintenance_event: MaintenanceEventRepo::new(session.clone()),
            delay: DelayRepo::new(session),
        }
    }
}
