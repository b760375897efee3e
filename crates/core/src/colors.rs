//! Consistent task colours for terminal output

use colored::Color;

// Jewel tones that stay distinct from the red/yellow/green used for status
const PALETTE: [Color; 6] = [
    Color::TrueColor { r: 147, g: 112, b: 219 },
    Color::TrueColor { r: 64, g: 224, b: 208 },
    Color::TrueColor { r: 255, g: 140, b: 0 },
    Color::TrueColor { r: 199, g: 21, b: 133 },
    Color::TrueColor { r: 72, g: 209, b: 204 },
    Color::TrueColor { r: 138, g: 43, b: 226 },
];

/// Colour derived from a hash of the task name, stable across runs
pub fn get_task_color(task_name: &str) -> Color {
    let hash = task_name
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));

    PALETTE[(hash % PALETTE.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_stable() {
        assert_eq!(get_task_color("build"), get_task_color("build"));
        assert!(PALETTE.contains(&get_task_color("docker-build")));
    }
}
