//! Control task behaviour against mock actuators.

use edge_executor::LocalExecutor;
use embassy_time::{Duration, Timer};
use futures_lite::future::block_on;

use greenhaus::app::snapshot::{SensorSnapshot, SnapshotStore};
use greenhaus::config::Thresholds;
use greenhaus::tasks::control::control_loop;
use greenhaus::tasks::Shutdown;

use crate::mock_hw::RecordingActuator;

const TICK: Duration = Duration::from_millis(20);

fn snapshot(temperature_c: f32, humidity_pct: f32, light_lux: f32) -> SensorSnapshot {
    SensorSnapshot {
        temperature_c,
        humidity_pct,
        pressure_hpa: 1012.0,
        light_lux,
    }
}

#[test]
fn commands_are_reissued_every_cycle() {
    let store = SnapshotStore::new();
    let shutdown = Shutdown::new();
    // Hot greenhouse the whole time: the fan command never changes, yet
    // must be issued on every cycle (open-loop self-healing).
    store.update(snapshot(35.0, 50.0, 300.0));

    let fan = RecordingActuator::new();
    let pump = RecordingActuator::new();
    let light = RecordingActuator::new();

    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();
    let task = executor.spawn(control_loop(
        &store,
        Thresholds::default(),
        Some(fan.clone()),
        Some(pump.clone()),
        Some(light.clone()),
        TICK,
        &shutdown,
    ));

    block_on(executor.run(async {
        Timer::after(Duration::from_millis(150)).await;
        shutdown.request();
        task.await;
    }));

    let fan_commands = fan.commands();
    // ~7 cycles in 150 ms at a 20 ms tick; allow scheduling slack. The
    // final `false` is the shutdown safe-state command.
    assert!(
        fan_commands.len() >= 4,
        "expected repeated commands, got {fan_commands:?}"
    );
    assert!(fan_commands[..fan_commands.len() - 1].iter().all(|&on| on));
    assert_eq!(fan_commands.last(), Some(&false));
    assert!(pump.commands().iter().all(|&on| !on));
    assert!(light.commands().iter().all(|&on| !on));
}

#[test]
fn threshold_rules_drive_the_relays() {
    let store = SnapshotStore::new();
    let shutdown = Shutdown::new();
    // Dry and dark: pump + light on, fan off.
    store.update(snapshot(22.0, 35.0, 100.0));

    let fan = RecordingActuator::new();
    let pump = RecordingActuator::new();
    let light = RecordingActuator::new();

    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();
    let task = executor.spawn(control_loop(
        &store,
        Thresholds::default(),
        Some(fan.clone()),
        Some(pump.clone()),
        Some(light.clone()),
        TICK,
        &shutdown,
    ));

    block_on(executor.run(async {
        Timer::after(Duration::from_millis(50)).await;
        assert_eq!(fan.last(), Some(false));
        assert_eq!(pump.last(), Some(true));
        assert_eq!(light.last(), Some(true));

        // The greenhouse warms up and brightens: next cycles flip the
        // commands without any task restart.
        store.update(snapshot(32.0, 55.0, 400.0));
        Timer::after(Duration::from_millis(50)).await;
        assert_eq!(fan.last(), Some(true));
        assert_eq!(pump.last(), Some(false));
        assert_eq!(light.last(), Some(false));

        shutdown.request();
        task.await;
    }));
}

#[test]
fn absent_actuators_are_skipped_without_error() {
    let store = SnapshotStore::new();
    let shutdown = Shutdown::new();
    store.update(snapshot(35.0, 35.0, 100.0));

    // Only the pump is configured; fan and light slots are empty.
    let pump = RecordingActuator::new();

    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();
    let task = executor.spawn(control_loop(
        &store,
        Thresholds::default(),
        None::<RecordingActuator>,
        Some(pump.clone()),
        None::<RecordingActuator>,
        TICK,
        &shutdown,
    ));

    block_on(executor.run(async {
        Timer::after(Duration::from_millis(70)).await;
        shutdown.request();
        task.await;
    }));

    assert!(pump.commands().len() >= 2);
}

#[test]
fn shutdown_leaves_actuators_off() {
    let store = SnapshotStore::new();
    let shutdown = Shutdown::new();
    store.update(snapshot(40.0, 10.0, 0.0)); // everything would be on

    let fan = RecordingActuator::new();
    let pump = RecordingActuator::new();
    let light = RecordingActuator::new();

    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();
    let task = executor.spawn(control_loop(
        &store,
        Thresholds::default(),
        Some(fan.clone()),
        Some(pump.clone()),
        Some(light.clone()),
        TICK,
        &shutdown,
    ));

    block_on(executor.run(async {
        Timer::after(Duration::from_millis(70)).await;
        shutdown.request();
        task.await;
    }));

    assert_eq!(fan.last(), Some(false));
    assert_eq!(pump.last(), Some(false));
    assert_eq!(light.last(), Some(false));
}
