//! Headless demo: scripted grab, drag and anchor-edit session
//!
//! Runs the force servo on a simulated device while a frame loop plays the
//! role of the graphics/interaction thread. Useful for exercising the whole
//! stack without haptic hardware attached.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use glam::Vec3;

use tangible_bridge::{
    ControlAction, InputEvent, ProxySample, ServoLoop, SimulatedDevice, shared_scene,
};
use tangible_core::{HapticObject, InteractionSession, ObjectRegistry, SceneConfig, box_mesh};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tangible_app=debug,tangible_bridge=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting tangible demo");

    // Scene from a config file if one is given, otherwise the built-in layout
    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load(&path)?,
        None => SceneConfig::default(),
    };
    tracing::info!(scene = %config.name, objects = config.objects.len(), "scene loaded");

    let mut registry = ObjectRegistry::new();
    for object in &config.objects {
        registry.insert(
            HapticObject::new(&object.name, box_mesh([1.0; 3])?)
                .with_transform(object.transform())
                .with_material(object.material),
        );
    }
    let plate = registry.object(0).id;

    let mut session = InteractionSession::new();
    session.set_ring_count(config.ring_count);
    session.set_spring_stiffness(config.spring_stiffness);

    let scene = shared_scene(registry, session);
    let device = SimulatedDevice::new();

    let shutdown = Arc::new(AtomicBool::new(false));
    let servo = ServoLoop::new(device.clone(), scene.clone());
    let servo_thread = {
        let shutdown = shutdown.clone();
        std::thread::spawn(move || servo.run(Duration::from_millis(1), shutdown))
    };

    // ===== Scripted interaction =====

    let frame = Duration::from_millis(4);
    let mut position = Vec3::new(0.5, 0.5, 0.5);
    device.set_position(position);

    // Touch the plate and grab it
    let sample = ProxySample::at(position);
    scene.lock().handle_event(InputEvent::Touch(plate), &sample)?;
    scene
        .lock()
        .handle_event(InputEvent::ButtonDown(plate), &sample)?;
    tracing::info!(state = ?scene.lock().session.state(), "grabbed plate");

    // Drag it 0.3 units along +x
    for _ in 0..30 {
        position += Vec3::new(0.01, 0.0, 0.0);
        device.set_position(position);
        let sample = ProxySample::at(position);
        let mut scene = scene.lock();
        scene.handle_event(InputEvent::Motion(plate), &sample)?;
        scene.frame_update(&sample)?;
        drop(scene);
        std::thread::sleep(frame);
    }
    tracing::info!(
        transform = ?scene.lock().registry.get(plate).map(|o| o.transform.w_axis),
        "drag finished"
    );

    // Enter anchor-edit at the current contact and widen the deformation
    let sample = ProxySample::at(position);
    {
        let mut scene = scene.lock();
        scene.handle_control(ControlAction::ToggleAnchorEdit, &sample)?;
        scene.handle_control(ControlAction::IncreaseRingCount, &sample)?;
        tracing::info!(state = ?scene.session.state(), "anchor edit entered");
    }
    let baseline: Vec<Vec3> = scene
        .lock()
        .registry
        .object(0)
        .mesh
        .positions()
        .to_vec();

    // Pull away from the anchor; the servo deforms the mesh each tick
    for _ in 0..40 {
        position += Vec3::new(0.0, 0.005, 0.0);
        device.set_position(position);
        let sample = ProxySample::at(position);
        scene.lock().frame_update(&sample)?;
        std::thread::sleep(frame);
    }

    // Leave anchor-edit, release the plate
    let sample = ProxySample::at(position);
    scene
        .lock()
        .handle_control(ControlAction::ToggleAnchorEdit, &sample)?;
    scene.lock().handle_event(InputEvent::ButtonUp, &sample)?;

    let snapshot = scene.lock().render_snapshot(sample.proxy_transform);
    let deformed = &snapshot.objects[0];
    let max_displacement = deformed
        .positions
        .iter()
        .zip(&baseline)
        .map(|(now, before)| (*now - *before).length())
        .fold(0.0_f32, f32::max);
    tracing::info!(max_displacement, "session finished");

    shutdown.store(true, Ordering::Relaxed);
    match servo_thread.join() {
        Ok(result) => result?,
        Err(_) => tracing::error!("servo thread panicked"),
    }
    Ok(())
}
