use rand::Rng;

use crate::{
    frame::FrameBuffer,
    grid::{Occupancy, ReflectiveSurface},
    material::Color,
    math::{Lerp, Ray, Vector2},
};

use super::{occluded, PointLight};

/// How far a reflected ray travels, exclusive, in cells.
pub const REFLECTION_RANGE: u32 = 40;

/// How strongly a surface's own color tints the light it reflects.
pub const SURFACE_TINT: f64 = 0.7;

/// The direction light leaves a surface after bouncing off it, or `None`
/// when the geometry is degenerate.
///
/// Each component is jittered by up to `diffusion / 2` either way before the
/// result is normalized again.
pub fn reflected_direction<R: Rng + ?Sized>(
    light: Vector2,
    surface: &ReflectiveSurface,
    diffusion: f64,
    rng: &mut R,
) -> Option<Vector2> {
    let normal = surface.normal.normalize()?;
    let to_light = (light - Vector2::from_cell(surface.cell)).normalize()?;

    let mut reflected = to_light.reflect(normal);
    if diffusion > 0. {
        reflected.x += (rng.gen::<f64>() - 0.5) * diffusion;
        reflected.y += (rng.gen::<f64>() - 0.5) * diffusion;
    }
    reflected.normalize()
}

/// Bounce light off one surface and spread it over the open cells the
/// reflected ray crosses. Returns how many cells received energy.
pub fn reflect_surface<R: Rng + ?Sized>(
    frame: &mut FrameBuffer,
    occupancy: &Occupancy,
    light: &PointLight,
    surface: &ReflectiveSurface,
    diffusion: f64,
    rng: &mut R,
) -> usize {
    let origin = light.origin();
    let distance = (Vector2::from_cell(surface.cell) - origin).magnitude();
    if distance <= 0. || occluded(occupancy, origin, surface.cell, Some(surface.cell)) {
        return 0;
    }

    let direction = match reflected_direction(origin, surface, diffusion, rng) {
        Some(d) => d,
        None => return 0,
    };

    let strength = light.reflection_strength(distance);
    let tint = reflection_tint(light, surface.color);
    let ray = Ray::new(Vector2::from_cell(surface.cell), direction);

    let grid = *occupancy.grid();
    let mut touched = 0;
    for (t, cell) in (1..REFLECTION_RANGE).zip(ray.march(1..REFLECTION_RANGE)) {
        if !grid.contains(cell) || occupancy.is_occupied(cell) {
            break;
        }

        frame.deposit(cell, strength / (t as f64 * 0.5), tint);
        touched += 1;
    }
    touched
}

/// Bounce light off every reflective surface, in order.
pub fn reflect_all<R: Rng + ?Sized>(
    frame: &mut FrameBuffer,
    occupancy: &Occupancy,
    light: &PointLight,
    diffusion: f64,
    rng: &mut R,
) -> usize {
    occupancy
        .surfaces
        .iter()
        .map(|surface| reflect_surface(frame, occupancy, light, surface, diffusion, rng))
        .sum()
}

/// The color a surface lends to the light it reflects.
pub fn reflection_tint(light: &PointLight, surface: Color) -> Color {
    light.color.lerp(surface, SURFACE_TINT)
}
