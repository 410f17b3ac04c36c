//! Bundled Vietnamese coffee market history, 2015–2023.
//!
//! Rainfall in mm, temperature in °C, supply and demand in tonnes. Price
//! levels were bucketed from the export price per kg (2.10–2.40 USD).

use crate::dataset::{FeatureVector, Observation, PriceLevel};

const RECORDS: [(i32, f64, f64, f64, f64, PriceLevel); 9] = [
    (2015, 1980.0, 24.3, 1_500_000.0, 1_850_000.0, PriceLevel::Low),
    (2016, 1920.0, 24.4, 1_600_000.0, 1_900_000.0, PriceLevel::Medium),
    (2017, 2030.0, 24.5, 1_550_000.0, 1_950_000.0, PriceLevel::Low),
    (2018, 1950.0, 24.7, 1_750_000.0, 1_970_000.0, PriceLevel::Low),
    (2019, 1870.0, 24.8, 1_800_000.0, 1_990_000.0, PriceLevel::Medium),
    (2020, 1900.0, 24.6, 1_700_000.0, 2_010_000.0, PriceLevel::Medium),
    (2021, 1940.0, 24.9, 1_850_000.0, 2_030_000.0, PriceLevel::High),
    (2022, 1890.0, 25.1, 1_900_000.0, 2_050_000.0, PriceLevel::High),
    (2023, 1950.0, 25.0, 1_950_000.0, 2_070_000.0, PriceLevel::High),
];

/// The nine historical records, oldest first.
pub fn coffee_history() -> Vec<Observation> {
    RECORDS
        .iter()
        .map(
            |&(year, rainfall, temperature, supply, demand, price)| Observation {
                year,
                rainfall,
                temperature,
                supply,
                demand,
                price,
            },
        )
        .collect()
}

/// The 2024 conditions the forecaster was first run against.
pub fn sample_2024() -> FeatureVector {
    FeatureVector::new(1800.0, 25.3, 2_100_000.0, 2_080_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_years_in_order() {
        let history = coffee_history();
        assert_eq!(history.len(), 9);
        let years: Vec<i32> = history.iter().map(|o| o.year).collect();
        assert_eq!(years, (2015..=2023).collect::<Vec<_>>());
    }

    #[test]
    fn three_of_each_level() {
        let history = coffee_history();
        for level in [PriceLevel::Low, PriceLevel::Medium, PriceLevel::High] {
            assert_eq!(history.iter().filter(|o| o.price == level).count(), 3);
        }
    }
}
