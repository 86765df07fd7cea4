multiversx_sc::imports!();

use crate::errors::*;
use crate::types::{VestingRelease, VestingSchedule, MAX_VESTING_SCHEDULES, MEMBERSHIP_ASSET};

/// Per-holder vesting schedules plus the DAO-wide unvested counter.
///
/// Matured schedules are pruned whenever the holder is touched, so no call
/// does more than `MAX_VESTING_SCHEDULES` units of cleanup work and the
/// total vested supply stays an O(1) read.
#[multiversx_sc::module]
pub trait VestingModule:
    crate::ledger::LedgerModule + crate::config::ConfigModule + crate::events::EventsModule
{
    /// Adds `amount` unlocking at `unlock_height`, merging with an existing
    /// schedule of the same height.
    fn add_vesting_schedule(&self, holder: &ManagedAddress, amount: &BigUint, unlock_height: u64) {
        let now = self.current_height();
        self.release_vested(holder, now);

        let mut schedules = self.vesting_schedules(holder);
        let mut merged = false;
        for index in 1..=schedules.len() {
            let mut schedule = schedules.get(index);
            if schedule.unlock_height == unlock_height {
                schedule.amount += amount;
                schedules.set(index, &schedule);
                merged = true;
                break;
            }
        }

        if !merged {
            require!(schedules.len() < MAX_VESTING_SCHEDULES, ERR_TOO_MANY_SCHEDULES);
            schedules.push(&VestingSchedule {
                amount: amount.clone(),
                unlock_height,
            });
        }

        self.total_unvested_supply().update(|t| *t += amount);
    }

    /// Drops every schedule with `unlock_height <= now` and returns the
    /// amount that became vested.
    fn release_vested(&self, holder: &ManagedAddress, now: u64) -> BigUint {
        let mut schedules = self.vesting_schedules(holder);
        let mut released = BigUint::zero();
        let mut index = 1;
        while index <= schedules.len() {
            let schedule = schedules.get(index);
            if schedule.unlock_height <= now {
                self.record_release(holder, &schedule, now);
                released += &schedule.amount;
                schedules.swap_remove(index);
            } else {
                index += 1;
            }
        }

        if released > 0u64 {
            self.total_unvested_supply().update(|t| *t -= &released);
            self.vesting_released_event(holder, &released);
        }
        released
    }

    /// Folds a matured schedule into the holder's release mark. The mark
    /// starts over once it is older than any election that could still be open.
    fn record_release(
        &self,
        holder: &ManagedAddress,
        schedule: &VestingSchedule<Self::Api>,
        now: u64,
    ) {
        let election_duration = self.config().get().election_duration;
        let mark_mapper = self.vesting_release(holder);

        let mark = if mark_mapper.is_empty() {
            None
        } else {
            Some(mark_mapper.get())
        };

        let updated = match mark {
            Some(mark) if mark.unlock_height + election_duration > now => VestingRelease {
                unlock_height: core::cmp::max(mark.unlock_height, schedule.unlock_height),
                amount: &mark.amount + &schedule.amount,
            },
            _ => VestingRelease {
                unlock_height: schedule.unlock_height,
                amount: schedule.amount.clone(),
            },
        };
        mark_mapper.set(&updated);
    }

    fn unvested_amount(&self, holder: &ManagedAddress) -> BigUint {
        let mut total = BigUint::zero();
        for schedule in self.vesting_schedules(holder).iter() {
            total += &schedule.amount;
        }
        total
    }

    /// Prunes the holder's matured schedules, then returns the vested balance.
    fn vested_balance(&self, holder: &ManagedAddress, now: u64) -> BigUint {
        self.release_vested(holder, now);
        let balance = self.balance(holder, MEMBERSHIP_ASSET).get();
        let unvested = self.unvested_amount(holder);
        if balance > unvested {
            balance - unvested
        } else {
            BigUint::zero()
        }
    }

    /// Vested balance frozen at `election_start`: anything that matured after
    /// the election started is excluded.
    fn vested_balance_at_start(
        &self,
        holder: &ManagedAddress,
        election_start: u64,
        now: u64,
    ) -> BigUint {
        self.release_vested(holder, now);
        let balance = self.balance(holder, MEMBERSHIP_ASSET).get();
        let mut frozen = self.unvested_amount(holder);

        let mark_mapper = self.vesting_release(holder);
        if !mark_mapper.is_empty() {
            let mark = mark_mapper.get();
            if mark.unlock_height > election_start {
                frozen += &mark.amount;
            }
        }

        if balance > frozen {
            balance - frozen
        } else {
            BigUint::zero()
        }
    }

    /// Membership in circulation that carries governance weight. The
    /// contract's own purchase reserve is not counted.
    #[view(getTotalVestedSupply)]
    fn total_vested_supply(&self) -> BigUint {
        let supply = self.total_supply(MEMBERSHIP_ASSET).get();
        let reserve = self
            .balance(&self.blockchain().get_sc_address(), MEMBERSHIP_ASSET)
            .get();
        let excluded = self.total_unvested_supply().get() + reserve;
        if supply > excluded {
            supply - excluded
        } else {
            BigUint::zero()
        }
    }

    /// Read-only: same result `vested_balance` would return, without pruning.
    #[view(getVestedBalance)]
    fn get_vested_balance(&self, holder: &ManagedAddress) -> BigUint {
        let now = self.current_height();
        let balance = self.balance(holder, MEMBERSHIP_ASSET).get();
        let mut unvested = BigUint::zero();
        for schedule in self.vesting_schedules(holder).iter() {
            if schedule.unlock_height > now {
                unvested += &schedule.amount;
            }
        }
        if balance > unvested {
            balance - unvested
        } else {
            BigUint::zero()
        }
    }

    #[view(getVestingSchedules)]
    fn get_vesting_schedules(
        &self,
        holder: &ManagedAddress,
    ) -> MultiValueEncoded<VestingSchedule<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for schedule in self.vesting_schedules(holder).iter() {
            result.push(schedule);
        }
        result
    }

    #[endpoint(releaseVested)]
    fn release_vested_endpoint(&self, holder: ManagedAddress) -> BigUint {
        let now = self.current_height();
        self.release_vested(&holder, now)
    }

    #[view(getTotalUnvestedSupply)]
    #[storage_mapper("totalUnvestedSupply")]
    fn total_unvested_supply(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("vestingSchedules")]
    fn vesting_schedules(&self, holder: &ManagedAddress) -> VecMapper<VestingSchedule<Self::Api>>;

    #[storage_mapper("vestingRelease")]
    fn vesting_release(&self, holder: &ManagedAddress) -> SingleValueMapper<VestingRelease<Self::Api>>;
}
