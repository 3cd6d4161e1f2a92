use rand::Rng;

use crate::models::particle::Particle;

/// Draws `count` particles with uniform attributes. `palette_size` must be
/// non-zero.
pub fn generate_population<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    palette_size: usize,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            horizontal_factor: rng.gen::<f32>(),
            depth: rng.gen::<f32>(),
            color_index: rng.gen_range(0..palette_size),
            vertical_offset: rng.gen::<f32>(),
        })
        .collect()
}
