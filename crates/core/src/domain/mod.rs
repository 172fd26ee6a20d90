pub mod company;
pub mod insight;
pub mod sentiment;
