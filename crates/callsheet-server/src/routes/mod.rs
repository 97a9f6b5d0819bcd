pub mod events;
pub mod gameplan;
pub mod help;
pub mod init;
pub mod journal;
pub mod opponents;
pub mod playpool;
pub mod scouting;
pub mod session;
pub mod teams;
pub mod terminology;
