pub mod admin;
pub mod feed;
pub mod permissions;
pub mod profiles;
pub mod rankings;
