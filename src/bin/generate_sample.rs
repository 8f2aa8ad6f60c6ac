use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sunmap::config::DEFAULT_DATA_FILE;
use sunmap::data::model::{SolarClass, SolarRecord};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in [lo, hi).
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn classify(pvout: f64) -> SolarClass {
    if pvout >= 3.2 {
        SolarClass::High
    } else if pvout >= 2.8 {
        SolarClass::Medium
    } else {
        SolarClass::Low
    }
}

/// (city, region, latitude, longitude)
const SITES: [(&str, &str, f64, f64); 16] = [
    ("Westminster", "Greater London", 51.4975, -0.1357),
    ("Camden", "Greater London", 51.5390, -0.1426),
    ("Greenwich", "Greater London", 51.4826, -0.0077),
    ("Croydon", "Greater London", 51.3762, -0.0982),
    ("Richmond", "Greater London", 51.4613, -0.3037),
    ("Brighton", "South East", 50.8225, -0.1372),
    ("Guildford", "South East", 51.2362, -0.5704),
    ("Canterbury", "South East", 51.2802, 1.0789),
    ("Oxford", "South East", 51.7520, -1.2577),
    ("Cambridge", "East of England", 52.2053, 0.1218),
    ("Norwich", "East of England", 52.6309, 1.2974),
    ("Colchester", "East of England", 51.8959, 0.8919),
    ("Bristol", "South West", 51.4545, -2.5879),
    ("Exeter", "South West", 50.7184, -3.5339),
    ("Plymouth", "South West", 50.3755, -4.1427),
    ("Truro", "South West", 50.2632, -5.0510),
];

const QUALITIES: [&str; 3] = ["High", "Medium", "Low"];

/// Write a synthetic UK solar-irradiance dataset as JSON.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write a synthetic solar-irradiance sample file")]
struct Args {
    /// Output JSON file
    #[arg(default_value = DEFAULT_DATA_FILE)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let output_path = Args::parse().output;

    let mut rng = SimpleRng::new(42);

    let records: Vec<SolarRecord> = SITES
        .iter()
        .map(|&(city, region, latitude, longitude)| {
            // Irradiance rises towards the south west.
            let south_west = (52.7 - latitude) * 0.25 + (-longitude).max(0.0) * 0.05;
            let ghi = round_to(2.7 + south_west + rng.uniform(-0.1, 0.1), 2);
            let pvout = round_to(ghi * rng.uniform(0.86, 0.94), 2);
            let dni = round_to(ghi * rng.uniform(0.78, 0.9), 2);
            let dhi = round_to(ghi * rng.uniform(0.48, 0.56), 2);
            let quality = QUALITIES[(rng.next_u64() % QUALITIES.len() as u64) as usize];

            SolarRecord {
                city: city.to_string(),
                region: region.to_string(),
                latitude,
                longitude,
                pvout_daily: pvout,
                ghi_daily: ghi,
                dni_daily: dni,
                dhi_daily: dhi,
                elevation: rng.uniform(5.0, 120.0).round(),
                air_temperature: round_to(10.0 + south_west * 0.8 + rng.uniform(-0.3, 0.3), 1),
                sunshine_hours: round_to(4.0 + south_west * 0.5 + rng.uniform(-0.2, 0.2), 1),
                solar_class: classify(pvout),
                data_quality: quality.to_string(),
            }
        })
        .collect();

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&records).context("serializing records")?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!(
        "Wrote {} locations to {}",
        records.len(),
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_defaults_to_sample_file() {
        let args = Args::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(args.output, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_output_path_argument() {
        let args = Args::try_parse_from(["generate_sample", "out/sites.json"]).unwrap();
        assert_eq!(args.output, PathBuf::from("out/sites.json"));
    }
}
