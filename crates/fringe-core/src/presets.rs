use crate::displace::DEFAULT_DISPLACEMENT;

/// Named displacement strengths the app binds to the digit keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Off,
    Subtle,
    Classic,
    Heavy,
}

impl Intensity {
    pub const ALL: [Intensity; 4] = [
        Intensity::Off,
        Intensity::Subtle,
        Intensity::Classic,
        Intensity::Heavy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Intensity::Off => "Off",
            Intensity::Subtle => "Subtle",
            Intensity::Classic => "Classic",
            Intensity::Heavy => "Heavy",
        }
    }

    /// The displacement value this preset dials in.
    pub fn displacement(self) -> f32 {
        match self {
            Intensity::Off => 0.0,
            Intensity::Subtle => 0.04,
            Intensity::Classic => DEFAULT_DISPLACEMENT,
            Intensity::Heavy => 0.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::displace::{clamp_displacement, MAX_DISPLACEMENT};

    #[test]
    fn all_contains_four_intensities() {
        assert_eq!(Intensity::ALL.len(), 4);
    }

    #[test]
    fn all_names_are_nonempty() {
        for i in Intensity::ALL {
            assert!(!i.name().is_empty(), "{i:?} has empty name");
        }
    }

    #[test]
    fn all_names_are_unique() {
        let names: Vec<_> = Intensity::ALL.iter().map(|i| i.name()).collect();
        let mut seen = std::collections::HashSet::new();
        for name in &names {
            assert!(seen.insert(*name), "duplicate intensity name: {name}");
        }
    }

    #[test]
    fn classic_matches_the_default_displacement() {
        assert_eq!(Intensity::Classic.displacement(), DEFAULT_DISPLACEMENT);
    }

    #[test]
    fn off_disables_the_effect() {
        assert_eq!(Intensity::Off.displacement(), 0.0);
    }

    #[test]
    fn displacements_increase_monotonically() {
        let values: Vec<f32> = Intensity::ALL.iter().map(|i| i.displacement()).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]), "{values:?}");
    }

    #[test]
    fn all_displacements_survive_clamping() {
        for i in Intensity::ALL {
            let d = i.displacement();
            assert!(d <= MAX_DISPLACEMENT);
            assert_eq!(clamp_displacement(d), d);
        }
    }
}
