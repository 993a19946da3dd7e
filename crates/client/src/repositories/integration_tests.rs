//! Integration tests against real Neo4j via testcontainers.

use chrono::{DateTime, TimeZone, Utc};

use aerograph_domain::{
    Aircraft, Airport, Component, Delay, Flight, MaintenanceEvent, Reading, Sensor, Severity,
    System,
};

use crate::repositories::Repositories;
use crate::schema::ensure_schema;
use crate::test_harness::Neo4jTestHarness;

fn dt(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn sample_aircraft(id: &str, tail: &str) -> Aircraft {
    Aircraft::new(id, tail, "A1B2C3", "Boeing 737-800", "Test Airlines", "Boeing")
        .expect("valid aircraft")
}

fn sample_airport(id: &str, iata: &str, icao: &str, name: &str) -> Airport {
    Airport::new(id, iata, icao, name, "Test City", "Testland", 33.94, -118.41)
        .expect("valid airport")
}

fn sample_flight(id: &str, aircraft_id: &str, dest: &str, departure_hour: u32) -> Flight {
    Flight::new(
        id,
        format!("TA{departure_hour}"),
        aircraft_id,
        "Test Airlines",
        "LAX",
        dest,
        dt(departure_hour),
        dt(departure_hour + 5),
    )
    .expect("valid flight")
}

fn sample_event(
    id: &str,
    component_id: &str,
    severity: Severity,
    reported_hour: u32,
) -> MaintenanceEvent {
    MaintenanceEvent::new(
        id,
        "AC-1",
        "SYS-1",
        component_id,
        "hydraulic pressure loss",
        severity,
        dt(reported_hour),
        "replaced seal",
    )
    .expect("valid event")
}

fn repos(harness: &Neo4jTestHarness) -> Repositories {
    Repositories::new(harness.session().expect("session"))
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn aircraft_create_then_find_round_trips_all_fields() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let repos = repos(&harness);

    let aircraft = sample_aircraft("AC-1", "N12345");
    let created = repos.aircraft.create(&aircraft).await.expect("create");
    assert_eq!(created, aircraft);

    let found = repos
        .aircraft
        .find_by_id("AC-1")
        .await
        .expect("find_by_id")
        .expect("present");
    assert_eq!(found, aircraft);

    let by_tail = repos
        .aircraft
        .find_by_tail_number("N12345")
        .await
        .expect("find_by_tail_number")
        .expect("present");
    assert_eq!(by_tail.aircraft_id, "AC-1");

    assert!(repos
        .aircraft
        .find_by_id("NONEXISTENT")
        .await
        .expect("lookup is not an error")
        .is_none());
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn create_twice_with_same_key_updates_in_place() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let repos = repos(&harness);

    let first = sample_aircraft("AC-1", "N11111");
    repos.aircraft.create(&first).await.expect("create");

    let mut second = sample_aircraft("AC-1", "N22222");
    second.operator = "Other Airlines".to_string();
    repos.aircraft.create(&second).await.expect("upsert");

    let all = repos.aircraft.find_all(10).await.expect("find_all");
    assert_eq!(all.len(), 1, "upsert must not duplicate the node");

    let found = repos
        .aircraft
        .find_by_id("AC-1")
        .await
        .expect("find_by_id")
        .expect("present");
    assert_eq!(found.tail_number, "N22222");
    assert_eq!(found.operator, "Other Airlines");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn delete_reports_whether_anything_existed() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let repos = repos(&harness);

    repos
        .aircraft
        .create(&sample_aircraft("AC-1", "N12345"))
        .await
        .expect("create");

    assert!(repos.aircraft.delete("AC-1").await.expect("delete"));
    assert!(repos
        .aircraft
        .find_by_id("AC-1")
        .await
        .expect("find_by_id")
        .is_none());
    assert!(
        !repos.aircraft.delete("AC-1").await.expect("second delete"),
        "deleting a missing key is false, not an error"
    );
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn update_requires_an_existing_key() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let repos = repos(&harness);

    let ghost = sample_aircraft("AC-GHOST", "N00000");
    let err = repos
        .aircraft
        .update(&ghost)
        .await
        .expect_err("update must fail on a missing key");
    assert!(err.is_not_found());

    let mut aircraft = sample_aircraft("AC-1", "N12345");
    repos.aircraft.create(&aircraft).await.expect("create");

    aircraft.model = "Airbus A320".to_string();
    let updated = repos.aircraft.update(&aircraft).await.expect("update");
    assert_eq!(updated.model, "Airbus A320");
    assert_eq!(updated.aircraft_id, "AC-1");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn find_all_is_bounded_and_ordered() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let repos = repos(&harness);

    for i in 0..5 {
        repos
            .aircraft
            .create(&sample_aircraft(&format!("AC-{i}"), &format!("N-{i}")))
            .await
            .expect("create");
    }

    let bounded = repos.aircraft.find_all(3).await.expect("find_all");
    assert_eq!(bounded.len(), 3);

    let all = repos.aircraft.find_all(10).await.expect("find_all");
    assert_eq!(all.len(), 5);

    let tails: Vec<_> = all.iter().map(|a| a.tail_number.clone()).collect();
    let mut sorted = tails.clone();
    sorted.sort();
    assert_eq!(tails, sorted, "find_all orders by tail number");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn flights_by_aircraft_come_back_newest_first() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let repos = repos(&harness);

    repos
        .aircraft
        .create(&sample_aircraft("AC-1", "N12345"))
        .await
        .expect("create aircraft");
    repos
        .aircraft
        .create(&sample_aircraft("AC-2", "N67890"))
        .await
        .expect("create aircraft");

    for (flight_id, hour) in [("FL-1", 8), ("FL-2", 12), ("FL-3", 10)] {
        repos
            .flight
            .create(&sample_flight(flight_id, "AC-1", "JFK", hour))
            .await
            .expect("create flight");
    }
    repos
        .flight
        .create(&sample_flight("FL-OTHER", "AC-2", "JFK", 9))
        .await
        .expect("create flight");

    let flights = repos
        .flight
        .find_by_aircraft("AC-1", 10)
        .await
        .expect("find_by_aircraft");
    let ids: Vec<_> = flights.iter().map(|f| f.flight_id.clone()).collect();
    assert_eq!(ids, ["FL-2", "FL-3", "FL-1"]);

    // The property-match fallback sees the same set when edges exist.
    let by_property = repos
        .flight
        .find_by_aircraft_id("AC-1", 10)
        .await
        .expect("find_by_aircraft_id");
    let property_ids: Vec<_> = by_property.iter().map(|f| f.flight_id.clone()).collect();
    assert_eq!(property_ids, ids);

    let limited = repos
        .flight
        .find_by_aircraft("AC-1", 2)
        .await
        .expect("find_by_aircraft");
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn latest_destinations_pair_flight_with_airport() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let repos = repos(&harness);

    repos
        .airport
        .create(&sample_airport("AP-LAX", "LAX", "KLAX", "Los Angeles Intl"))
        .await
        .expect("create airport");
    repos
        .airport
        .create(&sample_airport("AP-JFK", "JFK", "KJFK", "John F. Kennedy Intl"))
        .await
        .expect("create airport");

    // Created after the airports, so the ARRIVES_AT edge is written.
    repos
        .flight
        .create(&sample_flight("FL-1", "AC-1", "JFK", 9))
        .await
        .expect("create flight");

    let arrivals = repos
        .flight
        .find_latest_destinations(10)
        .await
        .expect("find_latest_destinations");

    let jfk = arrivals
        .iter()
        .find(|a| a.flight.flight_id == "FL-1")
        .expect("FL-1 arrival present");
    assert_eq!(jfk.flight.destination, "JFK");
    assert_eq!(jfk.destination.iata, "JFK");
    assert_eq!(jfk.destination.name, "John F. Kennedy Intl");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn missing_components_return_only_critical_faults() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let repos = repos(&harness);

    repos
        .component
        .create(&Component::new("C1", "SYS-1", "Hydraulic Pump", "pump").expect("valid component"))
        .await
        .expect("create component");
    repos
        .component
        .create(&Component::new("C2", "SYS-1", "Fuel Valve", "valve").expect("valid component"))
        .await
        .expect("create component");

    repos
        .maintenance_event
        .create(&sample_event("EV-CRIT", "C1", Severity::Critical, 10))
        .await
        .expect("create event");
    repos
        .maintenance_event
        .create(&sample_event("EV-WARN", "C2", Severity::Warning, 11))
        .await
        .expect("create event");

    let faults = repos
        .maintenance_event
        .find_missing_components(10)
        .await
        .expect("find_missing_components");
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].component.component_id, "C1");
    assert_eq!(faults[0].event.severity, Severity::Critical);

    let critical = repos
        .maintenance_event
        .find_by_severity(Severity::Critical, 10)
        .await
        .expect("find_by_severity");
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].event_id, "EV-CRIT");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn significant_delays_filter_and_order_by_minutes() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let repos = repos(&harness);

    repos
        .flight
        .create(&sample_flight("FL-1", "AC-1", "JFK", 9))
        .await
        .expect("create flight");

    for (delay_id, minutes) in [("DL-1", 15), ("DL-2", 45), ("DL-3", 90)] {
        repos
            .delay
            .create(&Delay::new(delay_id, "FL-1", "weather", minutes).expect("valid delay"))
            .await
            .expect("create delay");
    }

    let significant = repos
        .delay
        .find_significant_delays(30, 10)
        .await
        .expect("find_significant_delays");
    let minutes: Vec<_> = significant.iter().map(|d| d.minutes).collect();
    assert_eq!(minutes, [90, 45]);

    let delayed = repos
        .flight
        .find_with_delays(30, 10)
        .await
        .expect("find_with_delays");
    assert_eq!(delayed.len(), 2);
    assert_eq!(delayed[0].flight.flight_id, "FL-1");
    assert_eq!(delayed[0].delay.minutes, 90);

    let by_flight = repos
        .delay
        .find_by_flight("FL-1")
        .await
        .expect("find_by_flight");
    assert_eq!(by_flight.len(), 3);
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn onboard_hierarchy_traverses_by_parent() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let repos = repos(&harness);

    repos
        .aircraft
        .create(&sample_aircraft("AC-1", "N12345"))
        .await
        .expect("create aircraft");
    repos
        .system
        .create(&System::new("SYS-1", "AC-1", "Hydraulics", "hydraulic").expect("valid system"))
        .await
        .expect("create system");
    repos
        .component
        .create(&Component::new("C1", "SYS-1", "Hydraulic Pump", "pump").expect("valid component"))
        .await
        .expect("create component");
    repos
        .sensor
        .create(
            &Sensor::new("SN-1", "SYS-1", "Pressure Sensor", "pressure", "psi")
                .expect("valid sensor"),
        )
        .await
        .expect("create sensor");

    let systems = repos.aircraft.get_systems("AC-1").await.expect("systems");
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0].system_id, "SYS-1");

    let systems = repos
        .system
        .find_by_aircraft("AC-1")
        .await
        .expect("systems by aircraft");
    assert_eq!(systems.len(), 1);

    let components = repos
        .component
        .find_by_system("SYS-1")
        .await
        .expect("components by system");
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].component_id, "C1");

    let across_systems = repos
        .aircraft
        .get_components("AC-1")
        .await
        .expect("components by aircraft");
    assert_eq!(across_systems.len(), 1);

    let sensors = repos
        .sensor
        .find_by_system("SYS-1")
        .await
        .expect("sensors by system");
    assert_eq!(sensors.len(), 1);
    assert_eq!(sensors[0].unit, "psi");

    for (reading_id, hour) in [("RD-1", 8), ("RD-2", 10)] {
        repos
            .reading
            .create(&Reading::new(reading_id, "SN-1", dt(hour), 3000.5).expect("valid reading"))
            .await
            .expect("create reading");
    }
    let readings = repos
        .reading
        .find_by_sensor("SN-1", 10)
        .await
        .expect("readings by sensor");
    let ids: Vec<_> = readings.iter().map(|r| r.reading_id.clone()).collect();
    assert_eq!(ids, ["RD-2", "RD-1"], "newest reading first");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn ensure_schema_is_idempotent() {
    let harness = Neo4jTestHarness::start().await.expect("harness");
    let session = harness.session().expect("session");

    ensure_schema(&session).await.expect("first run");
    ensure_schema(&session).await.expect("second run");
}
