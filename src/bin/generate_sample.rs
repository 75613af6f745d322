use anyhow::{Context, Result};

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let stations = [
        ("North", 8.0, 78.0),
        ("South", 16.5, 62.0),
        ("East", 12.0, 70.0),
        ("West", 14.0, 55.0),
    ];
    let operators = ["Alice", "Bob"];
    let readings_per_station = 50;

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer
        .write_record([
            "reading_id",
            "station",
            "operator",
            "temperature",
            "humidity",
            "battery",
        ])
        .context("writing header")?;

    let mut reading_id: i64 = 0;
    for (station, base_temp, base_humidity) in stations {
        for _ in 0..readings_per_station {
            let operator = operators[(rng.next_u64() % operators.len() as u64) as usize];
            let temperature = rng.gauss(base_temp, 2.5);
            let humidity = (rng.gauss(base_humidity, 6.0)).clamp(0.0, 100.0);

            // Occasional missing battery reading, so the dashboard's
            // missing-value handling has something to chew on.
            let battery = if rng.next_f64() < 0.05 {
                String::new()
            } else {
                format!("{:.1}", 20.0 + 80.0 * rng.next_f64())
            };

            writer
                .write_record([
                    reading_id.to_string(),
                    station.to_string(),
                    operator.to_string(),
                    format!("{temperature:.2}"),
                    format!("{humidity:.1}"),
                    battery,
                ])
                .with_context(|| format!("writing reading {reading_id}"))?;
            reading_id += 1;
        }
    }

    writer.flush().context("flushing output")?;
    println!(
        "Wrote {} readings from {} stations to {output_path}",
        reading_id,
        stations.len()
    );
    Ok(())
}
