//! XP rank ladder
//!
//! Maps lifetime XP to a display rank for the stats screen.

/// Rank definition
#[derive(Debug, Clone)]
pub struct Rank {
    pub title: &'static str,
    pub xp_required: u64,
}

/// All ranks, sorted by XP threshold
pub static RANKS: &[Rank] = &[
    Rank { title: "ECG Intern", xp_required: 0 },
    Rank { title: "ECG Resident", xp_required: 500 },
    Rank { title: "ECG Cadet", xp_required: 1_000 },
    Rank { title: "Rhythm Specialist", xp_required: 2_500 },
    Rank { title: "Wave Virtuoso", xp_required: 5_000 },
    Rank { title: "ECG Grandmaster", xp_required: 8_000 },
    Rank { title: "Cardiac Supreme", xp_required: 12_000 },
];

impl Rank {
    /// Highest rank the given XP qualifies for
    pub fn for_xp(xp: u64) -> &'static Rank {
        RANKS
            .iter()
            .rev()
            .find(|r| xp >= r.xp_required)
            .unwrap_or(&RANKS[0])
    }

    /// Next rank above the given XP (None at the top)
    pub fn next_for_xp(xp: u64) -> Option<&'static Rank> {
        RANKS.iter().find(|r| r.xp_required > xp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_for_xp() {
        assert_eq!(Rank::for_xp(0).title, "ECG Intern");
        assert_eq!(Rank::for_xp(499).title, "ECG Intern");
        assert_eq!(Rank::for_xp(500).title, "ECG Resident");
        assert_eq!(Rank::for_xp(11_999).title, "ECG Grandmaster");
        assert_eq!(Rank::for_xp(50_000).title, "Cardiac Supreme");
    }

    #[test]
    fn test_next_rank() {
        assert_eq!(Rank::next_for_xp(0).unwrap().title, "ECG Resident");
        assert!(Rank::next_for_xp(12_000).is_none());
    }
}
