use flotilla::{generate_fleet, validate_fleet, Coord, FLEET_CELLS, REQUIRED_SIZES};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn chebyshev(a: Coord, b: Coord) -> i8 {
    (a.row - b.row).abs().max((a.col - b.col).abs())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_fleet_always_validates(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut fleet = generate_fleet(&mut rng).unwrap();
        prop_assert!(validate_fleet(&mut fleet).is_ok());
    }

    #[test]
    fn generated_fleet_has_required_sizes(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = generate_fleet(&mut rng).unwrap();

        let mut sizes: Vec<usize> = fleet.ships().iter().map(|s| s.len()).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(sizes, REQUIRED_SIZES.to_vec());

        // disjoint ships: 20 cells placed, 20 distinct cells occupied
        let occupied = fleet.occupied_cells();
        prop_assert_eq!(occupied.len(), FLEET_CELLS);
        for cell in occupied {
            prop_assert!(cell.in_bounds());
        }
    }

    #[test]
    fn ships_never_touch_even_diagonally(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = generate_fleet(&mut rng).unwrap();

        for (i, a) in fleet.ships().iter().enumerate() {
            for b in fleet.ships().iter().skip(i + 1) {
                for &ca in a.cells() {
                    for &cb in b.cells() {
                        prop_assert!(
                            chebyshev(ca, cb) >= 2,
                            "cells {} and {} of different ships too close",
                            ca,
                            cb
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_fleet(seed in any::<u64>()) {
        let mut rng1 = SmallRng::seed_from_u64(seed);
        let mut rng2 = SmallRng::seed_from_u64(seed);
        let f1 = generate_fleet(&mut rng1).unwrap();
        let f2 = generate_fleet(&mut rng2).unwrap();
        prop_assert_eq!(f1, f2);
    }
}
