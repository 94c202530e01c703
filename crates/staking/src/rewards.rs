//! Per-epoch reward arithmetic. The only tricky part is
//! ordering: multiply everything out in a 128-bit intermediate before
//! dividing once, or the result is off by a noticeable margin (see the
//! calibration test below) and, for large stakes, a 64-bit intermediate
//! would overflow outright.

use coin::{Coin, MintAuthority, StakeToken};

/// `stake * rate * success / (denom * total)`, truncated to `u64`. Returns 0
/// if `total` or `denom` is zero rather than dividing by zero.
pub fn calculate_rewards(stake: u64, success: u64, total: u64, rate: u64, denom: u64) -> u64 {
    if total == 0 || denom == 0 {
        return 0;
    }
    let numerator = (stake as u128) * (rate as u128) * (success as u128);
    let denominator = (denom as u128) * (total as u128);
    (numerator / denominator) as u64
}

/// Compute the reward owed to `bucket` given its validator's performance and
/// the configured rate, mint it, and merge it in. Returns the minted amount
/// (0 if the bucket is empty or the formula yields 0).
pub fn distribute(
    bucket: &mut Coin<StakeToken>,
    success: u64,
    total: u64,
    rate: u64,
    denom: u64,
    mint_authority: &MintAuthority,
) -> u64 {
    let reward = calculate_rewards(bucket.value(), success, total, rate, denom);
    if reward == 0 {
        return 0;
    }
    bucket.merge(Coin::mint(reward, mint_authority));
    reward
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_calibration_case() {
        // naive division-first would give 1791; the spec requires 1792
        assert_eq!(calculate_rewards(2000, 199, 200, 700, 777), 1792);
    }

    #[test]
    fn large_stake_does_not_overflow() {
        assert_eq!(
            calculate_rewards(100_000_000_000_000_000, 9999, 10000, 3_141_592, 10_000_000),
            31_412_778_408_000_000
        );
    }

    #[test]
    fn zero_total_or_denom_yields_zero() {
        assert_eq!(calculate_rewards(1000, 5, 0, 1, 100), 0);
        assert_eq!(calculate_rewards(1000, 5, 10, 1, 0), 0);
    }

    #[test]
    fn distribute_mints_into_empty_bucket_when_reward_is_zero() {
        let (mint, _burn) = coin::test_authorities();
        let mut bucket: Coin<StakeToken> = Coin::zero();
        let minted = distribute(&mut bucket, 0, 10, 1, 100, &mint);
        assert_eq!(minted, 0);
        assert_eq!(bucket.value(), 0);
    }

    #[test]
    fn distribute_merges_reward_into_bucket() {
        let (mint, _burn) = coin::test_authorities();
        let mut bucket: Coin<StakeToken> = Coin::mint(200, &mint);
        let minted = distribute(&mut bucket, 100, 100, 1, 100, &mint);
        assert_eq!(minted, 2);
        assert_eq!(bucket.value(), 202);
    }
}
