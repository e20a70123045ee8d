// Bear hit points

/// Result of applying damage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Already dead or non-positive damage
    Ignored,
    /// Took damage and survived
    Hurt { remaining: f32 },
    /// This hit brought health to zero
    Killed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BearHealth {
    max: f32,
    current: f32,
}

impl BearHealth {
    pub fn new(max: f32) -> Self {
        Self { max, current: max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Remaining health as a fraction of the maximum
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            (self.current / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_dead() || amount.is_nan() || amount <= 0.0 {
            return DamageOutcome::Ignored;
        }

        self.current = (self.current - amount).max(0.0);
        if self.is_dead() {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt {
                remaining: self.current,
            }
        }
    }

    /// Back to full health
    pub fn restore(&mut self) {
        self.current = self.max;
    }
}
