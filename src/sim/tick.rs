//! Per-tick simulation update and the player command set
//!
//! Commands are discrete single-press actions delivered through a queue and
//! applied exactly once at a tick boundary; nothing is buffered across
//! ticks. The tick itself integrates every movable, scans candidate
//! collision pairs, regenerates energy at 1 Hz, expires cloaks, ages
//! effects, and resets the round once a dead ship's effects have drained.

use super::entity::ShipId;
use super::physics::{integrate_projectile, integrate_ship};
use super::response;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Discrete player commands
///
/// Each maps to one keystroke on the platform side; gameplay commands are
/// honored only while the simulation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Rotate(ShipId, i32),
    Thrust(ShipId),
    FireSlug(ShipId),
    FireTorpedo(ShipId),
    Cloak(ShipId),
    Hyperspace(ShipId),
    TransferShieldToWeapon(ShipId),
    TransferWeaponToShield(ShipId),
    /// Starts from the title screen, otherwise toggles pause
    TogglePause,
    Quit,
}

/// Apply one command at a tick boundary
pub fn apply_command(state: &mut GameState, cmd: Command, now_secs: u64) {
    match cmd {
        Command::TogglePause => {
            state.phase = match state.phase {
                GamePhase::Pre => GamePhase::Running,
                GamePhase::Running => GamePhase::Paused,
                GamePhase::Paused => GamePhase::Running,
                GamePhase::Over => GamePhase::Over,
            };
        }
        Command::Quit => state.phase = GamePhase::Over,
        _ if state.phase != GamePhase::Running => {}
        Command::Rotate(id, delta) => state.ship_mut(id).rotate(delta),
        Command::Thrust(id) => state.ship_mut(id).thrust(),
        Command::FireSlug(id) => state.fire_slug(id),
        Command::FireTorpedo(id) => state.fire_torpedo(id),
        Command::Cloak(id) => state.cloak(id, now_secs),
        Command::Hyperspace(id) => state.hyperspace(id),
        Command::TransferShieldToWeapon(id) => state.ship_mut(id).transfer_shield_to_weapon(),
        Command::TransferWeaponToShield(id) => state.ship_mut(id).transfer_weapon_to_shield(),
    }
}

/// Advance the simulation one tick
///
/// `now_secs` is whole wall-clock seconds, used only for the 1 Hz energy
/// regeneration and cloak expiry.
pub fn tick(state: &mut GameState, now_secs: u64) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.time_ticks += 1;

    update_slugs(state);
    update_torpedoes(state);
    update_ships(state, now_secs);

    // Ship-ship, then each ship against the planet
    let (first, rest) = state.ships.split_at_mut(1);
    response::ship_ship(&mut first[0], &mut rest[0], (ShipId::P1, ShipId::P2), &mut state.fx);
    response::ship_planet(&mut state.ships[0], ShipId::P1, &state.planet, &mut state.fx);
    response::ship_planet(&mut state.ships[1], ShipId::P2, &state.planet, &mut state.fx);

    state.fx.step();
    check_round_end(state);
}

/// Slugs: integrate, collide against the planet, both ships, every
/// torpedo, and every other slug (the slug-slug gate always fails, but
/// each pair is still evaluated). Iterated back to front so dead slugs
/// can be removed in place.
fn update_slugs(state: &mut GameState) {
    for i in (0..state.slugs.len()).rev() {
        integrate_projectile(&mut state.slugs[i]);

        response::projectile_planet(&mut state.slugs[i], &state.planet, &mut state.fx);
        response::ship_projectile(
            &mut state.ships[0],
            ShipId::P1,
            &mut state.slugs[i],
            &mut state.fx,
        );
        response::ship_projectile(
            &mut state.ships[1],
            ShipId::P2,
            &mut state.slugs[i],
            &mut state.fx,
        );
        for j in (0..state.torpedoes.len()).rev() {
            response::projectile_projectile(
                &mut state.torpedoes[j],
                &mut state.slugs[i],
                &mut state.fx,
            );
        }
        {
            let (head, tail) = state.slugs.split_at_mut(i);
            for other in head {
                response::projectile_projectile(&mut tail[0], other, &mut state.fx);
            }
        }

        if !state.slugs[i].alive {
            state.slugs.remove(i);
        }
    }
}

/// Torpedoes: integrate, collide against the planet, both ships, and each
/// earlier torpedo (torpedo-vs-slug pairs were already covered by the slug
/// pass). Removal also sweeps torpedoes killed during the slug pass.
fn update_torpedoes(state: &mut GameState) {
    for i in (0..state.torpedoes.len()).rev() {
        integrate_projectile(&mut state.torpedoes[i]);

        response::projectile_planet(&mut state.torpedoes[i], &state.planet, &mut state.fx);
        response::ship_projectile(
            &mut state.ships[0],
            ShipId::P1,
            &mut state.torpedoes[i],
            &mut state.fx,
        );
        response::ship_projectile(
            &mut state.ships[1],
            ShipId::P2,
            &mut state.torpedoes[i],
            &mut state.fx,
        );
        {
            let (head, tail) = state.torpedoes.split_at_mut(i);
            for other in head {
                response::projectile_projectile(&mut tail[0], other, &mut state.fx);
            }
        }

        if !state.torpedoes[i].alive {
            state.torpedoes.remove(i);
        }
    }
}

/// Ships: integrate under gravity, regenerate one energy point per
/// wall-clock second, and drop an expired cloak
fn update_ships(state: &mut GameState, now_secs: u64) {
    for ship in &mut state.ships {
        integrate_ship(ship);

        if now_secs > ship.last_regen_secs {
            ship.regen();
            ship.last_regen_secs = now_secs;
        }

        // Only a cloak makes a live ship invisible; a dead ship stays
        // hidden until the round resets
        if ship.alive
            && !ship.body.visible
            && now_secs > ship.last_cloak_secs + CLOAK_SECONDS
        {
            ship.body.visible = true;
        }
    }
}

/// Once a dead ship's transient effects have all expired, credit the
/// opponent and reinitialize the round
fn check_round_end(state: &mut GameState) {
    if !state.fx.effects.is_empty() {
        return;
    }
    for id in [ShipId::P2, ShipId::P1] {
        if !state.ship(id).alive {
            state.wins[id.opponent().index()] += 1;
            state.reset_round();
            return;
        }
    }
}
