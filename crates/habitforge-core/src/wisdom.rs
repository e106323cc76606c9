//! Daily wisdom: short habit-building tips and motivational quotes.

use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub category: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

pub const TIPS: &[Tip] = &[
    Tip {
        category: "Atomic Habits",
        title: "Habit Stacking",
        content: "Anchor a new habit to one you already have: \
                  'After [CURRENT HABIT], I will [NEW HABIT].'",
    },
    Tip {
        category: "Productivity",
        title: "The 2-Minute Rule",
        content: "If a new habit feels heavy, shrink it to something that takes under two \
                  minutes. 'Read a book' becomes 'Read one page'.",
    },
    Tip {
        category: "Consistency",
        title: "Never Miss Twice",
        content: "Missing once is normal. Never miss twice in a row; get back on track \
                  as soon as you can.",
    },
    Tip {
        category: "Environment",
        title: "Design Your Environment",
        content: "Want to drink more water? Keep a bottle on your desk. Make the cue for \
                  a habit obvious.",
    },
    Tip {
        category: "Identity",
        title: "Identity-Based Habits",
        content: "Focus on who you want to become, not what you want to achieve. Not \
                  'I want to run a marathon' but 'I am a runner'.",
    },
    Tip {
        category: "Motivation",
        title: "The Goldilocks Rule",
        content: "Motivation peaks on tasks right at the edge of your ability: not too \
                  hard, not too easy.",
    },
    Tip {
        category: "Reward",
        title: "Immediate Rewards",
        content: "Give yourself a small reward right after finishing a hard habit. The \
                  brain prioritises instant gratification.",
    },
];

pub const QUOTES: &[&str] = &[
    "Consistency is the key.",
    "A journey of a thousand miles begins with a single step.",
    "Today is a chance to get a little better.",
    "Focus on the process, not the outcome.",
    "Every small step counts.",
];

pub fn random_tip() -> &'static Tip {
    choose_tip(&mut rand::thread_rng())
}

pub fn choose_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static Tip {
    TIPS.choose(rng).unwrap_or(&TIPS[0])
}

/// Tip of the day: stable for a given date, rotating through the catalog.
pub fn tip_for(date: NaiveDate) -> &'static Tip {
    let idx = date.num_days_from_ce().rem_euclid(TIPS.len() as i32) as usize;
    &TIPS[idx]
}

pub fn random_quote() -> &'static str {
    QUOTES.choose(&mut rand::thread_rng()).copied().unwrap_or(QUOTES[0])
}

/// Quote of the day, rotating the same way as [`tip_for`].
pub fn quote_for(date: NaiveDate) -> &'static str {
    let idx = date.num_days_from_ce().rem_euclid(QUOTES.len() as i32) as usize;
    QUOTES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn tip_of_the_day_is_stable_and_rotates() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(tip_for(d), tip_for(d));
        assert_ne!(tip_for(d), tip_for(d.succ_opt().unwrap()));
    }

    #[test]
    fn seeded_choice_comes_from_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        let tip = choose_tip(&mut rng);
        assert!(TIPS.contains(tip));
    }

    #[test]
    fn quote_comes_from_catalog() {
        assert!(QUOTES.contains(&random_quote()));
    }

    #[test]
    fn quote_of_the_day_is_stable_and_rotates() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(quote_for(d), quote_for(d));
        assert_ne!(quote_for(d), quote_for(d.succ_opt().unwrap()));
    }
}
