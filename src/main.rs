//! Starwell entry point
//!
//! Wires the platform shell together: settings, a line-based stdin input
//! thread, and the scheduler with the headless render/audio/asset seams.
//!
//! Key layout (press Enter to submit a batch of keys):
//! - Player 1: `a`/`d` rotate, `s` thrust, `q` slug, `e` torpedo,
//!   `w` cloak, `x` hyperspace, `z` shield-to-weapon, `c` weapon-to-shield
//! - Player 2: the numpad equivalents `4`/`6`, `5`, `7`, `9`, `8`, `2`,
//!   `1`, `3`
//! - `p` toggles pause (and starts the game), `.` quits

use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::time::{SystemTime, UNIX_EPOCH};

use starwell::Settings;
use starwell::assets::NullAssets;
use starwell::audio::NullAudio;
use starwell::renderer::NullRenderer;
use starwell::scheduler::Scheduler;
use starwell::sim::{Command, GameState, ShipId};

const SETTINGS_PATH: &str = "starwell_settings.json";

/// Map one key to a command; unknown keys are ignored
fn key_command(key: char) -> Option<Command> {
    use ShipId::{P1, P2};
    match key {
        'q' => Some(Command::FireSlug(P1)),
        'w' => Some(Command::Cloak(P1)),
        'e' => Some(Command::FireTorpedo(P1)),
        'a' => Some(Command::Rotate(P1, -1)),
        's' => Some(Command::Thrust(P1)),
        'd' => Some(Command::Rotate(P1, 1)),
        'z' => Some(Command::TransferShieldToWeapon(P1)),
        'x' => Some(Command::Hyperspace(P1)),
        'c' => Some(Command::TransferWeaponToShield(P1)),

        '7' => Some(Command::FireSlug(P2)),
        '8' => Some(Command::Cloak(P2)),
        '9' => Some(Command::FireTorpedo(P2)),
        '4' => Some(Command::Rotate(P2, -1)),
        '5' => Some(Command::Thrust(P2)),
        '6' => Some(Command::Rotate(P2, 1)),
        '1' => Some(Command::TransferShieldToWeapon(P2)),
        '2' => Some(Command::Hyperspace(P2)),
        '3' => Some(Command::TransferWeaponToShield(P2)),

        'p' => Some(Command::TogglePause),
        '.' => Some(Command::Quit),
        _ => None,
    }
}

/// Read stdin lines and feed commands until the channel closes
fn input_loop(tx: Sender<Command>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        for key in line.chars() {
            if let Some(cmd) = key_command(key.to_ascii_lowercase()) {
                if tx.send(cmd).is_err() {
                    return;
                }
            }
        }
    }
    // Stdin closed; ask the game to shut down
    let _ = tx.send(Command::Quit);
}

fn main() {
    env_logger::init();
    log::info!("Starwell starting...");

    let settings = Settings::load(Path::new(SETTINGS_PATH));

    let seed = settings.rng_seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("seed: {seed}");

    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || input_loop(tx));

    let scheduler = Scheduler::new(
        GameState::new(seed),
        rx,
        NullRenderer,
        NullAudio,
        NullAssets,
        settings.clone(),
    );
    scheduler.run();

    settings.save(Path::new(SETTINGS_PATH));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_map_covers_both_players() {
        assert!(matches!(key_command('s'), Some(Command::Thrust(ShipId::P1))));
        assert!(matches!(key_command('5'), Some(Command::Thrust(ShipId::P2))));
        assert!(matches!(key_command('p'), Some(Command::TogglePause)));
        assert!(key_command('!').is_none());
    }
}
