pub mod aggregate;
pub mod followup;

pub use aggregate::{count_by_status, percentages, StatusCounts, StatusFractions};
pub use followup::{
    follow_up_board, follow_up_board_from_counters, score, FollowUpCounters, FollowUpEntry,
    FollowUpFlag, FollowUpLabel, FollowUpScorer,
};
