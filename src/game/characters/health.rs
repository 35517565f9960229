// Hit points for anything a swing can hurt

use crate::game::host::Damageable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Fraction of health left (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

impl Damageable for Health {
    fn take_damage(&mut self, amount: i32) {
        if self.is_dead() {
            log::trace!("Ignoring {amount} damage, already dead");
            return;
        }

        self.current = self.current.saturating_sub(amount).clamp(0, self.max);
        log::debug!("Took {} damage, {}/{} left", amount, self.current, self.max);

        if self.is_dead() {
            log::info!("Target destroyed");
        }
    }
}
