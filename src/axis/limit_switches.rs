/// Limit-switch engagement on one axis. The binary protocol variant
/// spoken here does not report limit-switch bits, so status queries
/// always yield `None`; the richer variants are kept for hosts that
/// merge state from other sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimitSwitches {
    #[default]
    None,
    Upper,
    Lower,
    Both,
}

impl LimitSwitches {
    pub fn has_upper(&self) -> bool {
        matches!(self, LimitSwitches::Upper | LimitSwitches::Both)
    }

    pub fn has_lower(&self) -> bool {
        matches!(self, LimitSwitches::Lower | LimitSwitches::Both)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, LimitSwitches::None)
    }

    pub fn any_active(&self) -> bool {
        !self.is_clear()
    }
}
