//! Match clock formatting.

/// Format a match clock as `MM:SS`.
///
/// The seconds component is always shown as a magnitude, so the pre-game
/// countdown (negative clock) reads as time remaining: `-15` -> `00:15`.
pub fn format_clock(clock: i32) -> String {
    let mins = clock / 60;
    let secs = (clock % 60).abs();
    format!("{mins:02}:{secs:02}")
}
