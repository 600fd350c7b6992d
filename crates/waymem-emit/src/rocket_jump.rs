//! `LoadPlayerLearnedRJ_<map>`: cluster representatives of successful
//! rocket jumps.

use waymem_core::models::{EventRecord, Position};
use waymem_scanner::RocketJump;

fn vector(p: &Position) -> String {
    format!("'{:.1} {:.1} {:.1}'", p.x, p.y, p.z)
}

pub fn render_rocket_jumps(map: &str, jumps: &[EventRecord<RocketJump>]) -> String {
    if jumps.is_empty() {
        return "// No successful rocket jumps detected\n".to_string();
    }

    let mut lines = vec![
        format!("// ===== {} ROCKET JUMP WAYPOINTS =====", map.to_uppercase()),
        format!(
            "// Generated: {} validated RJ techniques from player observation",
            jumps.len()
        ),
        "// Format: SpawnLearnedRJ(origin, angles, velocity_gain, technique_type)".to_string(),
        String::new(),
        format!("void() LoadPlayerLearnedRJ_{map} ="),
        "{".to_string(),
    ];

    for (i, jump) in jumps.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        let rj = &jump.meta;
        lines.push(format!(
            "    // RJ #{}: vel_gain={:.1} u/s, height~{:.0}u",
            i + 1,
            jump.score,
            rj.height_gain()
        ));
        lines.push(format!(
            "    SpawnLearnedRJ({}, {}, {:.1}, \"rj_vertical\");",
            vector(&jump.position),
            vector(&rj.angles),
            jump.score
        ));
    }

    lines.push("};".to_string());
    lines.push(String::new());
    lines.join("\n")
}
