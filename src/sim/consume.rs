//! Cupcake consumption

use glam::Vec2;

use super::level::Cupcake;

/// Eat every cupcake strictly closer than `chomp_radius` to the head
///
/// The scan finishes before anything is removed. Returns how many were eaten.
pub fn consume_cupcakes(cupcakes: &mut Vec<Cupcake>, head: Vec2, chomp_radius: f32) -> usize {
    let eaten: Vec<usize> = cupcakes
        .iter()
        .enumerate()
        .filter(|(_, cupcake)| cupcake.pos.distance(head) < chomp_radius)
        .map(|(i, _)| i)
        .collect();

    if eaten.is_empty() {
        return 0;
    }

    let mut index = 0;
    cupcakes.retain(|_| {
        let keep = !eaten.contains(&index);
        index += 1;
        keep
    });
    eaten.len()
}
