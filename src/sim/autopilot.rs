//! Demo autopilot - plays the game for attract mode and headless runs

use super::kinematics::MoveKeys;
use super::state::GameState;
use super::tick::TickInput;

/// How far down the lane (z) the autopilot looks for threats
const LOOKAHEAD: f32 = 6.0;
/// Keep this much room from the lane edge
const EDGE_MARGIN: f32 = 1.0;
/// Jump when a threat is this close on z and cannot be dodged
const JUMP_DISTANCE: f32 = 1.2;

/// Build the input the autopilot would give this frame
pub fn autopilot_input(state: &GameState, now_ms: f64) -> TickInput {
    let mut input = TickInput {
        now_ms,
        ..Default::default()
    };
    let Some(player) = state.player.as_ref() else {
        return input;
    };

    if state.powerups.has_raygun() {
        input.activate_time_stop = true;
    }

    let half = player.scale / 2.0;
    let limit = state.tuning.lane_half_width() - half - EDGE_MARGIN;

    // Nearest obstacle approaching on an overlapping column
    let threat = state
        .entities
        .obstacles
        .iter()
        .filter(|o| {
            let dz = player.pos.z - o.pos.z;
            dz > -o.half_extent && dz < LOOKAHEAD && (o.pos.x - player.pos.x).abs() < half + o.half_extent + 0.3
        })
        .min_by(|a, b| b.pos.z.total_cmp(&a.pos.z));

    let mut keys = MoveKeys::default();
    if let Some(obstacle) = threat {
        let go_left = obstacle.pos.x >= player.pos.x;
        if go_left && player.pos.x > -limit {
            keys.left = true;
        } else if !go_left && player.pos.x < limit {
            keys.right = true;
        } else if player.pos.x > 0.0 {
            keys.left = true;
        } else {
            keys.right = true;
        }
        input.jump = player.pos.z - obstacle.pos.z < JUMP_DISTANCE;
    } else if let Some(pickup) = state
        .entities
        .shields
        .iter()
        .chain(state.entities.rayguns.iter())
        .find(|p| p.pos.z < player.pos.z)
    {
        // Line up with the nearest pickup
        let target = pickup.pos.x.clamp(-limit, limit);
        keys.left = target < player.pos.x - 0.1;
        keys.right = target > player.pos.x + 0.1;
    } else if player.pos.x.abs() > 0.2 {
        keys.left = player.pos.x > 0.0;
        keys.right = player.pos.x < 0.0;
    }
    input.keys = keys;
    input
}
