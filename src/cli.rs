use clap::Parser;

use crate::field::{FieldConfig, DEFAULT_PARALLAX_STRENGTH, DEFAULT_PARTICLE_COUNT, MAX_PARTICLES};

/// An animated starfield with an interactive skill tree
#[derive(Parser, Debug)]
#[command()]
pub struct Args {
    /// Number of stars
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PARTICLE_COUNT,
        value_parser = clap::value_parser!(u32).range(1..=MAX_PARTICLES as i64)
    )]
    pub particles: u32,

    /// Frame cap, `0` renders as fast as the display allows
    #[arg(short, long, default_value_t = 60)]
    pub framerate: u32,

    /// How far stars shift with the pointer, per pixel of distance from the center
    #[arg(long, default_value_t = DEFAULT_PARALLAX_STRENGTH)]
    pub parallax: f32,

    /// Seed for star placement, random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Start with the skill tree hidden
    #[arg(long)]
    pub no_skills: bool,
}

impl Args {
    pub fn field_config(&self) -> FieldConfig {
        FieldConfig {
            particle_count: self.particles,
            parallax_strength: self.parallax,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["starfield"]).unwrap();
        assert_eq!(args.framerate, 60);
        assert!(!args.no_skills);
        assert_eq!(args.field_config(), FieldConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "starfield",
            "--particles",
            "500",
            "--parallax",
            "0.05",
            "--seed",
            "7",
            "--no-skills",
        ])
        .unwrap();

        let config = args.field_config();
        assert_eq!(config.particle_count, 500);
        assert_eq!(config.parallax_strength, 0.05);
        assert_eq!(config.seed, Some(7));
        assert!(args.no_skills);
    }

    #[test]
    fn test_particle_count_range() {
        for count in ["0", "20001", "50000000", "4294967496", "-5"] {
            let parsed = Args::try_parse_from(["starfield", "--particles", count]);
            assert!(parsed.is_err(), "{count} particles should be rejected");
        }

        let args = Args::try_parse_from(["starfield", "-p", "20000"]).unwrap();
        assert_eq!(args.field_config().particle_count, MAX_PARTICLES);
    }
}
