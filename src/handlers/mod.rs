pub mod extractors;
pub mod polls;
pub mod votes;

pub use polls::{
    create_poll_handler, get_poll_handler, latest_poll_handler, list_polls_handler,
    poll_results_handler,
};
pub use votes::{add_vote_handler, get_option_handler, option_votes_handler};
