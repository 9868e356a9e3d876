//! Integration tests for the doorbell controller

use rs_doorbell::hal::{MockDelay, MockIndicatorLine, MockMqtt};
use rs_doorbell::{
    Config, ConnectionState, Doorbell, Indicator, MqttPublisher, PressOutcome, RunState,
    CONNECT_RETRY_DELAY_MS, PRESS_PAYLOAD,
};

fn bell_with(mqtt: MockMqtt) -> Doorbell<MockMqtt, MockIndicatorLine, MockDelay> {
    let config = Config::default().with_client_id("doorbell_abc123");
    let indicator = Indicator::pair(MockIndicatorLine::new(), MockIndicatorLine::new());
    Doorbell::new(mqtt, indicator, MockDelay::new(), &config)
}

#[test]
fn connect_succeeds_first_try() {
    let mut bell = bell_with(MockMqtt::new());
    bell.connect();

    assert_eq!(bell.run_state(), RunState::Ready);
    assert_eq!(bell.mqtt().connect_attempts, 1);
    assert_eq!(bell.mqtt().connection_state(), ConnectionState::Connected);
    // No retry wait was ever taken
    assert_eq!(bell.delay().count_of(CONNECT_RETRY_DELAY_MS), 0);
}

#[test]
fn connect_retries_with_burst_and_fixed_delay() {
    let mut bell = bell_with(MockMqtt::failing_connects(3));
    bell.connect();

    assert_eq!(bell.run_state(), RunState::Ready);
    // Exactly three failed attempts before the successful fourth
    assert_eq!(bell.mqtt().connect_attempts, 4);
    // Each failure waits the fixed 5 s, never more, never fewer
    assert_eq!(bell.delay().count_of(CONNECT_RETRY_DELAY_MS), 3);
    // Each failure plays the 3-cycle burst (200 ms off / 100 ms on)
    assert_eq!(bell.delay().count_of(200), 9);
    assert_eq!(bell.delay().count_of(100), 9);
}

#[test]
fn press_publishes_fixed_payload_to_wire_topic() {
    let mut bell = bell_with(MockMqtt::new());
    bell.connect();

    assert_eq!(bell.handle_press(), PressOutcome::Published);

    let published = &bell.mqtt().published;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, "doorbell/doorbell_abc123");
    assert_eq!(published[0].1, PRESS_PAYLOAD);

    // Success blink: 40 half-periods of 200 ms, settling steady-on
    assert_eq!(bell.delay().count_of(200), 40);
    assert!(bell.indicator().lines().iter().all(|l| l.level));
}

#[test]
fn each_press_publishes_once() {
    let mut bell = bell_with(MockMqtt::new());
    bell.connect();

    bell.handle_press();
    bell.handle_press();
    bell.handle_press();
    assert_eq!(bell.mqtt().published.len(), 3);
}

#[test]
fn publish_failure_degrades_to_error_blink() {
    let mut bell = bell_with(MockMqtt::new());
    bell.connect();
    bell.mqtt_mut().fail_publish = true;

    assert_eq!(bell.handle_press(), PressOutcome::PublishFailed);
    assert!(bell.mqtt().published.is_empty());

    // Error blink: 66 cycles of 100 ms off / 50 ms on
    assert_eq!(bell.delay().count_of(100), 66);
    assert_eq!(bell.delay().count_of(50), 66);
}

#[test]
fn failed_press_leaves_next_press_serviceable() {
    let mut bell = bell_with(MockMqtt::new());
    bell.connect();

    bell.mqtt_mut().fail_publish = true;
    assert_eq!(bell.handle_press(), PressOutcome::PublishFailed);

    // The transport recovers; nothing in the controller is stuck
    bell.mqtt_mut().fail_publish = false;
    assert_eq!(bell.handle_press(), PressOutcome::Published);
    assert_eq!(bell.mqtt().published.len(), 1);
}

#[test]
fn press_before_connect_fails_gracefully() {
    let mut bell = bell_with(MockMqtt::new());

    // No connect() yet: publish on a disconnected client is an error,
    // not an implicit reconnect
    assert_eq!(bell.handle_press(), PressOutcome::PublishFailed);
    assert!(bell.mqtt().published.is_empty());
    assert_eq!(bell.mqtt().connect_attempts, 0);
}

#[test]
fn dropped_connection_surfaces_as_publish_error() {
    let mut bell = bell_with(MockMqtt::new());
    bell.connect();

    bell.mqtt_mut().drop_connection();
    assert_eq!(bell.handle_press(), PressOutcome::PublishFailed);
    // The handler leaves the connection as the transport left it
    assert_eq!(
        bell.mqtt().connection_state(),
        ConnectionState::Disconnected
    );
}

#[test]
fn indicator_lines_stay_mirrored_across_the_run() {
    let mut bell = bell_with(MockMqtt::failing_connects(2));
    bell.connect();
    bell.handle_press();
    bell.mqtt_mut().fail_publish = true;
    bell.handle_press();

    let lines = bell.indicator().lines();
    assert_eq!(lines[0].history, lines[1].history);
}
