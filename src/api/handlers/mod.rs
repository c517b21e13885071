pub mod announcements;
pub mod checkins;
pub mod events;
pub mod root;
