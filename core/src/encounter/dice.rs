use rand::Rng;

use crate::types::Stats;

pub fn roll_dice<R: Rng>(rng: &mut R, sides: i32, modifier: i32) -> i32 {
    rng.random_range(1..=sides) + modifier
}

/// d20 plus the dexterity modifier.
pub fn roll_initiative<R: Rng>(rng: &mut R, stats: &Stats) -> i32 {
    roll_dice(rng, 20, stats.dexterity.modifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_initiative_stays_in_d20_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let stats = Stats::from_values([10, 14, 10, 10, 10, 10]);
        for _ in 0..1000 {
            let initiative = roll_initiative(&mut rng, &stats);
            assert!((3..=22).contains(&initiative), "rolled {initiative}");
        }
    }

    #[test]
    fn test_roll_dice_hits_both_ends() {
        let mut rng = StdRng::seed_from_u64(42);
        let rolls: Vec<i32> = (0..2000).map(|_| roll_dice(&mut rng, 20, 0)).collect();
        assert!(rolls.contains(&1));
        assert!(rolls.contains(&20));
    }
}
