//! Authentication: turning submitted credentials into a session change.

pub mod login;
