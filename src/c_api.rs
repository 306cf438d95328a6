use crate::{body::Body, simulation::Simulation, world::DecorativeMarker};
use tracing::warn;
use ultraviolet::Vec2;

#[unsafe(no_mangle)]
pub extern "C" fn Arena_Create(seed: u64) -> *mut Simulation {
    match Simulation::with_config(Default::default(), Simulation::DEFAULT_DT, seed) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            warn!(%err, "failed to create arena");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// Steps once with `dt`. Returns 0 on success, -1 on a rejected step or null handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_Step(handle: *mut Simulation, dt: f32) -> i32 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    match sim.set_dt(dt).and_then(|()| sim.step()) {
        Ok(()) => 0,
        Err(err) => {
            warn!(%err, "step rejected");
            -1
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_Reset(handle: *mut Simulation, seed: u64) -> i32 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    match sim.reset(seed) {
        Ok(()) => 0,
        Err(err) => {
            warn!(%err, "reset rejected");
            -1
        }
    }
}

/// Sets the force and torque the input layer wants on the craft for the next step.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_SetCraftLoad(handle: *mut Simulation, fx: f32, fy: f32, torque: f32) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.world.craft.force = Vec2::new(fx, fy);
        sim.world.craft.torque = torque;
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_GetFrame(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.frame)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_GetCraft(handle: *const Simulation) -> *const Body {
    unsafe { handle.as_ref() }.map_or(std::ptr::null(), |sim| &sim.world.craft as *const Body)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_GetDebrisCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.world.debris.len())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_GetDebris(handle: *const Simulation) -> *const Body {
    unsafe { handle.as_ref() }.map_or(std::ptr::null(), |sim| sim.world.debris.as_ptr())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_GetMarker(handle: *const Simulation) -> *const DecorativeMarker {
    unsafe { handle.as_ref() }.map_or(std::ptr::null(), |sim| &sim.world.marker as *const _)
}
