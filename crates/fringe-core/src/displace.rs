use glam::{Vec2, Vec3, Vec4};

// ---------------------------------------------------------------------------
// Displacement math — per-channel UV scaling about the texture centre
// ---------------------------------------------------------------------------

/// Displacement applied when nothing else is configured.
pub const DEFAULT_DISPLACEMENT: f32 = 0.1;

/// Upper bound of the useful displacement range. Beyond this the red and
/// blue footprints drift so far apart the image stops reading as one.
pub const MAX_DISPLACEMENT: f32 = 0.5;

/// Scaling pivot: the centre of UV space.
const CENTER: Vec2 = Vec2::splat(0.5);

/// Clamp a displacement value into `[0, MAX_DISPLACEMENT]`.
pub fn clamp_displacement(displacement: f32) -> f32 {
    displacement.clamp(0.0, MAX_DISPLACEMENT)
}

/// Scale `uv` about the centre point (0.5, 0.5) by `factor`.
///
/// The centre is a fixed point of this transform for every factor, so the
/// middle of the image never shifts no matter how strong the effect is.
pub fn scale_about_center(uv: Vec2, factor: f32) -> Vec2 {
    (uv - CENTER) * factor + CENTER
}

/// The three sample coordinates of one fragment: red from a slightly
/// expanded footprint, green untouched, blue slightly contracted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelUvs {
    pub red: Vec2,
    pub green: Vec2,
    pub blue: Vec2,
}

/// Compute the per-channel sample coordinates for `uv`.
///
/// Red scales by `1 + displacement`, blue by `1 - displacement`, green is
/// passed through. Results may land outside `[0, 1]` near the image edge;
/// how that resolves is the sampler's addressing mode, not ours.
pub fn channel_uvs(uv: Vec2, displacement: f32) -> ChannelUvs {
    ChannelUvs {
        red: scale_about_center(uv, 1.0 + displacement),
        green: uv,
        blue: scale_about_center(uv, 1.0 - displacement),
    }
}

// ---------------------------------------------------------------------------
// CPU references of the two shader stages
// ---------------------------------------------------------------------------

/// Reference implementation of the fragment stage.
///
/// `sample` stands in for the bound texture + sampler: it maps a UV to an
/// RGBA texel. The output takes the red channel of the red-displaced
/// sample, green of the centre sample, blue of the blue-displaced sample,
/// and pins alpha to exactly 1.0.
pub fn aberrate<F>(sample: F, uv: Vec2, displacement: f32) -> Vec4
where
    F: Fn(Vec2) -> Vec4,
{
    let uvs = channel_uvs(uv, displacement);
    Vec4::new(
        sample(uvs.red).x,
        sample(uvs.green).y,
        sample(uvs.blue).z,
        1.0,
    )
}

/// Reference implementation of the vertex stage: the input position is
/// already clip space, so this only homogenises it. UVs ride along
/// untouched (see `ChannelUvs` for what happens to them later).
pub fn clip_position(position: Vec3) -> Vec4 {
    position.extend(1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn assert_vec2_eq(a: Vec2, b: Vec2) {
        assert!((a - b).length() < EPS, "got {a}, expected {b}");
    }

    // --- clamp_displacement ---------------------------------------------------

    #[test]
    fn clamp_rejects_negative() {
        assert_eq!(clamp_displacement(-0.3), 0.0);
    }

    #[test]
    fn clamp_caps_at_max() {
        assert_eq!(clamp_displacement(0.7), MAX_DISPLACEMENT);
    }

    #[test]
    fn clamp_passes_valid_values() {
        assert_eq!(clamp_displacement(DEFAULT_DISPLACEMENT), 0.1);
        assert_eq!(clamp_displacement(0.0), 0.0);
        assert_eq!(clamp_displacement(0.5), 0.5);
    }

    // --- scale_about_center ---------------------------------------------------

    #[test]
    fn center_is_fixed_point_for_any_factor() {
        let c = Vec2::new(0.5, 0.5);
        for factor in [0.0, 0.5, 0.9, 1.0, 1.1, 2.0, 100.0] {
            assert_vec2_eq(scale_about_center(c, factor), c);
        }
    }

    #[test]
    fn unit_factor_is_identity() {
        let uv = Vec2::new(0.123, 0.877);
        assert_vec2_eq(scale_about_center(uv, 1.0), uv);
    }

    #[test]
    fn scaling_moves_away_from_center() {
        // (1.0, 0.5) is 0.5 right of centre; factor 1.1 pushes it to 1.05.
        let scaled = scale_about_center(Vec2::new(1.0, 0.5), 1.1);
        assert_vec2_eq(scaled, Vec2::new(1.05, 0.5));
    }

    // --- channel_uvs ----------------------------------------------------------

    #[test]
    fn center_collapses_all_channels() {
        // At the exact centre every channel samples the same point, for
        // any displacement.
        let c = Vec2::new(0.5, 0.5);
        for d in [0.0, 0.04, 0.1, 0.25, 0.5] {
            let uvs = channel_uvs(c, d);
            assert_vec2_eq(uvs.red, c);
            assert_vec2_eq(uvs.green, c);
            assert_vec2_eq(uvs.blue, c);
        }
    }

    #[test]
    fn right_edge_offsets_by_five_percent() {
        // uv = (1.0, 0.5), d = 0.1: red at 1.05, green at 1.0, blue at 0.95.
        let uvs = channel_uvs(Vec2::new(1.0, 0.5), 0.1);
        assert_vec2_eq(uvs.red, Vec2::new(1.05, 0.5));
        assert_vec2_eq(uvs.green, Vec2::new(1.0, 0.5));
        assert_vec2_eq(uvs.blue, Vec2::new(0.95, 0.5));
    }

    #[test]
    fn green_is_always_passthrough() {
        let uv = Vec2::new(0.2, 0.9);
        for d in [0.0, 0.1, 0.5] {
            assert_vec2_eq(channel_uvs(uv, d).green, uv);
        }
    }

    #[test]
    fn offsets_scale_linearly_from_center() {
        // (uvR - c) = (1+d)(uv - c) and (uvB - c) = (1-d)(uv - c) at
        // arbitrary points, not just along an axis.
        let c = Vec2::splat(0.5);
        let d = 0.25;
        for uv in [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.75, 0.3),
            Vec2::new(0.1, 0.95),
            Vec2::new(1.0, 1.0),
        ] {
            let uvs = channel_uvs(uv, d);
            assert_vec2_eq(uvs.red - c, (uv - c) * (1.0 + d));
            assert_vec2_eq(uvs.blue - c, (uv - c) * (1.0 - d));
        }
    }

    #[test]
    fn red_and_blue_mirror_about_the_input() {
        // The red and blue offsets from the input UV are equal and
        // opposite: uvR - uv = -(uvB - uv).
        let uv = Vec2::new(0.8, 0.35);
        let uvs = channel_uvs(uv, 0.1);
        assert_vec2_eq(uvs.red - uv, -(uvs.blue - uv));
    }

    #[test]
    fn out_of_range_uvs_are_not_clamped() {
        // Addressing is the sampler's job; the math must not clip.
        let uvs = channel_uvs(Vec2::new(1.0, 1.0), 0.5);
        assert_vec2_eq(uvs.red, Vec2::new(1.25, 1.25));
        assert_vec2_eq(uvs.blue, Vec2::new(0.75, 0.75));
    }

    // --- aberrate -------------------------------------------------------------

    /// A synthetic texture whose texel value encodes its own UV, so tests
    /// can see exactly where each channel sampled.
    fn uv_probe(uv: Vec2) -> Vec4 {
        Vec4::new(uv.x, uv.y, uv.x + uv.y, 0.25)
    }

    #[test]
    fn aberrate_picks_one_channel_per_sample() {
        let out = aberrate(uv_probe, Vec2::new(1.0, 0.5), 0.1);
        // red channel of the sample at (1.05, 0.5) → 1.05
        assert!((out.x - 1.05).abs() < EPS, "got {}", out.x);
        // green channel of the sample at (1.0, 0.5) → 0.5
        assert!((out.y - 0.5).abs() < EPS, "got {}", out.y);
        // blue channel of the sample at (0.95, 0.5) → 0.95 + 0.5
        assert!((out.z - 1.45).abs() < EPS, "got {}", out.z);
    }

    #[test]
    fn aberrate_at_center_matches_plain_sample() {
        let c = Vec2::new(0.5, 0.5);
        let out = aberrate(uv_probe, c, 0.1);
        let texel = uv_probe(c);
        assert!((out.x - texel.x).abs() < EPS);
        assert!((out.y - texel.y).abs() < EPS);
        assert!((out.z - texel.z).abs() < EPS);
    }

    #[test]
    fn aberrate_alpha_is_always_one() {
        // The source alpha (0.25 above) must never leak through.
        for uv in [Vec2::ZERO, Vec2::splat(0.5), Vec2::ONE] {
            for d in [0.0, 0.1, 0.5] {
                assert_eq!(aberrate(uv_probe, uv, d).w, 1.0);
            }
        }
    }

    #[test]
    fn zero_displacement_is_identity_sampling() {
        let uv = Vec2::new(0.3, 0.6);
        let out = aberrate(uv_probe, uv, 0.0);
        let texel = uv_probe(uv);
        assert!((out.x - texel.x).abs() < EPS);
        assert!((out.y - texel.y).abs() < EPS);
        assert!((out.z - texel.z).abs() < EPS);
    }

    // --- clip_position --------------------------------------------------------

    #[test]
    fn clip_position_is_identity_with_unit_w() {
        let p = clip_position(Vec3::new(-0.25, 0.75, 0.5));
        assert_eq!(p, Vec4::new(-0.25, 0.75, 0.5, 1.0));
    }

    #[test]
    fn clip_position_applies_no_scaling() {
        // A clip-space corner stays a corner.
        let p = clip_position(Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(p, Vec4::new(1.0, -1.0, 0.0, 1.0));
    }
}
