///! Orbital scene: planets, sampled asteroids and the debris backdrop.

mod types;
pub use types::*;

mod population;
pub use population::{generate_asteroids, generate_debris_field, planet_bodies};

mod simulator;
pub use simulator::{NOMINAL_FRAME_DT, OrbitalSimulator, OrbitingBody, advance_phase, orbital_position};

mod controls;
pub use controls::{CameraResetWatcher, SceneControls};

mod ticker;
pub use ticker::AnimationLoop;
