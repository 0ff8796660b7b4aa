//! Random array inputs

use rand::Rng;

/// A random array of 5 to 14 values between 1 and 50
pub fn random_values<R: Rng + ?Sized>(rng: &mut R) -> Vec<i64> {
    let len = rng.gen_range(5..=14);
    (0..len).map(|_| rng.gen_range(1..=50)).collect()
}

/// Render values the way the values field expects them
pub fn format_values(values: &[i64]) -> String {
    values.iter().map(i64::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::parse_numbers;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let values = random_values(&mut rng);
            assert!((5..=14).contains(&values.len()));
            assert!(values.iter().all(|v| (1..=50).contains(v)));
        }
    }

    #[test]
    fn formatted_values_parse_back() {
        let values = vec![3, 41, 7];
        assert_eq!(parse_numbers(&format_values(&values)).unwrap(), values);
    }
}
